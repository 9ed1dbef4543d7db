use std::collections::HashMap;
use std::sync::LazyLock;

use navos_core::{AdvisorSettings, Playbook};
use regex::{Captures, Regex};
use tracing::debug;

/// `{{ id }}` where the id is any brace-free text, surrounding whitespace excluded.
/// Blank ids (`{{ }}`) are not placeholders.
static PLACEHOLDER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([^{}\s](?:[^{}]*[^{}\s])?)\s*\}\}").expect("Invalid regex")
});

/// Placeholder ids used by `template`, first occurrence order, without repeats.
pub fn placeholders(template: &str) -> Vec<String> {
    let mut seen = Vec::new();
    for caps in PLACEHOLDER_PATTERN.captures_iter(template) {
        let id = caps[1].to_string();
        if !seen.contains(&id) {
            seen.push(id);
        }
    }
    seen
}

/// Substitute every `{{ id }}` in `template`.
///
/// Supplied inputs win; `stack_placeholder` becomes the comma-joined stack;
/// anything else renders as an empty string.
pub fn render_prompt(
    template: &str,
    inputs: &HashMap<String, String>,
    current_stack: &[String],
    stack_placeholder: &str,
) -> String {
    PLACEHOLDER_PATTERN
        .replace_all(template, |caps: &Captures| {
            let id = &caps[1];
            match inputs.get(id) {
                Some(value) => value.clone(),
                None if id == stack_placeholder => current_stack.join(", "),
                None => {
                    debug!(placeholder = id, "no value for placeholder");
                    String::new()
                }
            }
        })
        .into_owned()
}

/// Render a playbook's prompt generator. `None` when the playbook has none.
pub fn render_playbook_prompt(
    playbook: &Playbook,
    inputs: &HashMap<String, String>,
    current_stack: &[String],
    settings: &AdvisorSettings,
) -> Option<String> {
    let generator = playbook.prompt_generator.as_ref()?;
    Some(render_prompt(
        &generator.template,
        inputs,
        current_stack,
        &settings.stack_placeholder,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use navos_core::{PromptGenerator, PromptInput};
    use pretty_assertions::assert_eq;

    fn inputs(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn stack() -> Vec<String> {
        vec!["Next.js".to_string(), "Postgres".to_string()]
    }

    #[test]
    fn substitutes_inputs_and_stack() {
        let out = render_prompt(
            "Build a {{app}} using {{stack_recomendada}}",
            &inputs(&[("app", "CRM")]),
            &stack(),
            "stack_recomendada",
        );
        assert_eq!(out, "Build a CRM using Next.js, Postgres");
    }

    #[test]
    fn whitespace_around_ids_is_ignored() {
        let out = render_prompt(
            "{{ app }}|{{app}}|{{   stack_recomendada\t}}",
            &inputs(&[("app", "CRM")]),
            &stack(),
            "stack_recomendada",
        );
        assert_eq!(out, "CRM|CRM|Next.js, Postgres");
    }

    #[test]
    fn missing_values_render_empty() {
        let out = render_prompt(
            "Audience: {{audience}}.",
            &HashMap::new(),
            &stack(),
            "stack_recomendada",
        );
        assert_eq!(out, "Audience: .");
        assert_eq!(
            render_prompt("{{stack_recomendada}}", &HashMap::new(), &[], "stack_recomendada"),
            ""
        );
    }

    #[test]
    fn text_that_is_not_a_placeholder_is_kept() {
        let out = render_prompt("{{ }} {app} {{}} {{a{b}}", &inputs(&[("app", "x")]), &[], "s");
        assert_eq!(out, "{{ }} {app} {{}} {{a{b}}");
    }

    #[test]
    fn ids_with_accents_and_spaces_are_substituted() {
        let out = render_prompt(
            "Para {{público}} e {{ nome do app }}.",
            &inputs(&[("público", "devs"), ("nome do app", "Agenda")]),
            &[],
            "stack_recomendada",
        );
        assert_eq!(out, "Para devs e Agenda.");

        let unfilled = render_prompt("Para {{ público alvo }}!", &HashMap::new(), &[], "s");
        assert_eq!(unfilled, "Para !");
        assert_eq!(
            placeholders("{{público}} {{ nome do app }}"),
            vec!["público", "nome do app"]
        );
    }

    #[test]
    fn lists_placeholders_once() {
        assert_eq!(
            placeholders("{{a}} {{ b }} {{a}} {{stack_recomendada}}"),
            vec!["a", "b", "stack_recomendada"]
        );
    }

    #[test]
    fn playbook_without_generator_renders_nothing() {
        let mut playbook = Playbook {
            id: "P".to_string(),
            goal: String::new(),
            prerequisites: vec![],
            steps: vec![],
            pitfalls: vec![],
            done_definition: String::new(),
            stack_variants: Default::default(),
            prompts: vec![],
            prompt_generator: None,
        };
        let settings = AdvisorSettings::default();
        assert_eq!(
            render_playbook_prompt(&playbook, &HashMap::new(), &stack(), &settings),
            None
        );

        playbook.prompt_generator = Some(PromptGenerator {
            inputs: vec![PromptInput {
                id: "app".to_string(),
                label: "App".to_string(),
                placeholder: "CRM".to_string(),
            }],
            template: "{{app}} on {{ stack_recomendada }}".to_string(),
        });
        assert_eq!(
            render_playbook_prompt(&playbook, &inputs(&[("app", "Shop")]), &stack(), &settings),
            Some("Shop on Next.js, Postgres".to_string())
        );
    }
}
