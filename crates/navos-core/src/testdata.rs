//! A small seed shared by the unit tests.

use crate::{Catalog, CatalogData, Edge, Node, NodeType, Relation};

pub(crate) const SEED: &str = r#"{
  "nodes": [
    {"id": "L0", "name": "Jornada", "type": "LAYER", "level": 0, "summary_leigo": "Ponto de partida"},
    {"id": "L1_BUILD", "name": "Construir", "type": "LAYER", "level": 1, "summary_leigo": "Ferramentas para criar apps"},
    {"id": "L1_AI", "name": "Inteligencia Artificial", "type": "LAYER", "level": 1, "summary_leigo": "Modelos e agentes"},
    {"id": "C_DB", "name": "Banco de Dados", "type": "CATEGORY", "level": 2, "summary_leigo": "Onde os dados ficam", "tags": ["dados"]},
    {"id": "C_AGENTS", "name": "Agentes", "type": "CATEGORY", "level": 2, "summary_leigo": "IA que executa tarefas"},
    {"id": "P_CRM_SIMPLE", "name": "CRM Simples", "type": "PLAYBOOK", "level": 2, "summary_leigo": "Gerencie contatos e vendas"},
    {"id": "T_SUPABASE", "name": "Supabase", "type": "TOOL", "level": 3, "summary_leigo": "Postgres com login pronto", "tags": ["db", "auth"]},
    {"id": "T_POSTGRES", "name": "Postgres", "type": "TOOL", "level": 3, "summary_leigo": "Banco relacional", "tags": ["sql"]},
    {"id": "K_RAG", "name": "RAG", "type": "CONCEPT", "level": 3, "summary_leigo": "Respostas com base nos seus documentos", "tags": ["memoria"]}
  ],
  "edges": [
    {"from": "L0", "to": "L1_BUILD", "relation": "BELONGS_TO"},
    {"from": "L0", "to": "L1_AI", "relation": "BELONGS_TO"},
    {"from": "L1_BUILD", "to": "C_DB", "relation": "BELONGS_TO"},
    {"from": "L1_AI", "to": "C_AGENTS", "relation": "BELONGS_TO"},
    {"from": "L1_BUILD", "to": "P_CRM_SIMPLE", "relation": "BELONGS_TO"},
    {"from": "C_DB", "to": "T_SUPABASE", "relation": "BELONGS_TO"},
    {"from": "C_DB", "to": "T_POSTGRES", "relation": "BELONGS_TO"},
    {"from": "C_AGENTS", "to": "K_RAG", "relation": "BELONGS_TO"},
    {"from": "T_SUPABASE", "to": "T_POSTGRES", "relation": "USES"},
    {"from": "K_RAG", "to": "T_SUPABASE", "relation": "RECOMMENDED_WITH"},
    {"from": "P_CRM_SIMPLE", "to": "T_SUPABASE", "relation": "REQUIRES"}
  ],
  "playbooks": [
    {
      "id": "P_CRM_SIMPLE",
      "goal": "Um CRM para pequenas equipes",
      "steps": ["Modelar contatos", "Criar pipeline"],
      "prompt_generator": {
        "inputs": [{"id": "app", "label": "App", "placeholder": "CRM"}],
        "template": "Build a {{app}} using {{ stack_recomendada }}"
      }
    }
  ],
  "decision_rules": [
    {"id": "R1", "if": {"app_type": "crm"}, "then": {"primary_stack": ["Next.js", "Supabase"], "tools_to_master": ["Supabase"]}, "explain_leigo": "CRM"},
    {"id": "R2", "if": {"app_type": "saas", "needs_auth": true}, "then": {"primary_stack": ["Lovable", "Supabase"]}, "explain_leigo": "SaaS"}
  ]
}"#;

pub(crate) fn seed_data() -> CatalogData {
    serde_json::from_str(SEED).expect("seed fixture parses")
}

pub(crate) fn catalog() -> Catalog {
    Catalog::from_data(seed_data()).expect("seed fixture indexes")
}

pub(crate) fn node(id: &str, level: u32) -> Node {
    Node {
        id: id.to_string(),
        name: id.to_string(),
        node_type: NodeType::Concept,
        level,
        summary: String::new(),
        details: Default::default(),
        tags: Vec::new(),
    }
}

pub(crate) fn belongs_to(parent: &str, child: &str) -> Edge {
    Edge {
        from: parent.to_string(),
        to: child.to_string(),
        relation: Relation::BelongsTo,
    }
}
