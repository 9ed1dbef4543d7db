use navos_core::{AdvisorSettings, DecisionRule, RuleOutcome};
use serde::Serialize;
use tracing::{debug, warn};

use crate::wizard::Answers;
use crate::{AdvisorError, Result};

pub const APP_TYPE_WEIGHT: u32 = 10;
pub const NEEDS_RAG_WEIGHT: u32 = 5;
pub const BUDGET_WEIGHT: u32 = 4;
pub const NEEDS_AUTH_WEIGHT: u32 = 3;
pub const NEEDS_DB_WEIGHT: u32 = 3;

/// The chosen rule and its payload adjusted for the user.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Selection<'a> {
    pub rule: &'a DecisionRule,
    pub score: u32,
    pub result: RuleOutcome,
}

fn weight_if<T: PartialEq>(condition: Option<&T>, answer: &T, weight: u32) -> u32 {
    match condition {
        Some(c) if c == answer => weight,
        _ => 0,
    }
}

/// Sum of weights for every condition the answers satisfy. Absent conditions add nothing.
pub fn score(rule: &DecisionRule, answers: &Answers) -> u32 {
    let c = &rule.condition;
    weight_if(c.app_type.as_ref(), &answers.app_type, APP_TYPE_WEIGHT)
        + weight_if(c.needs_rag.as_ref(), &answers.needs_rag, NEEDS_RAG_WEIGHT)
        + weight_if(c.budget.as_ref(), &answers.budget, BUDGET_WEIGHT)
        + weight_if(c.needs_auth.as_ref(), &answers.needs_auth, NEEDS_AUTH_WEIGHT)
        + weight_if(c.needs_db.as_ref(), &answers.needs_db, NEEDS_DB_WEIGHT)
}

/// Highest-scoring rule; on ties the earliest in table order wins.
pub fn best_rule<'a>(rules: &'a [DecisionRule], answers: &Answers) -> Option<(&'a DecisionRule, u32)> {
    let mut best: Option<(&DecisionRule, u32)> = None;
    for rule in rules {
        let s = score(rule, answers);
        debug!(rule = %rule.id, score = s, "scored rule");
        if best.map_or(true, |(_, top)| s > top) {
            best = Some((rule, s));
        }
    }
    best
}

/// The designated default rule, else the first one.
pub fn fallback_rule<'a>(rules: &'a [DecisionRule], default_id: &str) -> Option<&'a DecisionRule> {
    rules
        .iter()
        .find(|r| r.id == default_id)
        .or_else(|| rules.first())
}

fn has_builder(stack: &[String], markers: &[String]) -> bool {
    stack.iter().any(|entry| {
        let entry = entry.to_lowercase();
        markers.iter().any(|m| entry.contains(&m.to_lowercase()))
    })
}

/// Copy of `outcome` adjusted for the user's level. Beginners whose stack has no
/// no-code builder get one put first in `tools_to_master`.
pub fn adjust_for_level(outcome: &RuleOutcome, answers: &Answers, settings: &AdvisorSettings) -> RuleOutcome {
    let mut adjusted = outcome.clone();
    if answers.user_level == settings.beginner_level
        && !has_builder(&adjusted.primary_stack, &settings.builder_markers)
    {
        adjusted
            .tools_to_master
            .insert(0, settings.builder_recommendation.clone());
    }
    adjusted
}

/// Pick a rule for `answers` and adjust its payload. Fails only on an empty table.
pub fn select_rule<'a>(
    rules: &'a [DecisionRule],
    answers: &Answers,
    settings: &AdvisorSettings,
) -> Result<Selection<'a>> {
    let (rule, score) = match best_rule(rules, answers) {
        Some(found) => found,
        None => {
            let rule = fallback_rule(rules, &settings.default_rule_id)
                .ok_or(AdvisorError::EmptyRuleTable)?;
            warn!(rule = %rule.id, "no rule scored, using fallback");
            (rule, 0)
        }
    };
    debug!(rule = %rule.id, score, "selected rule");
    Ok(Selection {
        rule,
        score,
        result: adjust_for_level(&rule.outcome, answers, settings),
    })
}
