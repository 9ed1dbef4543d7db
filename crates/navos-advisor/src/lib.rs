pub mod engine;
mod error;
pub mod prompt;
pub mod wizard;

use navos_core::{AdvisorSettings, Catalog, Playbook};
use serde::Serialize;

pub use engine::{adjust_for_level, score, select_rule, Selection};
pub use error::{AdvisorError, Result};
pub use prompt::{placeholders, render_playbook_prompt, render_prompt};
pub use wizard::{AnswerSet, AnswerValue, Answers, Question, QuestionId, Wizard, WizardProgress, QUESTIONS};

/// A stack recommendation ready for display.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Recommendation<'a> {
    #[serde(flatten)]
    pub selection: Selection<'a>,
    pub answers: Answers,
    /// Step-by-step guide for the chosen app type, when the catalog has one.
    pub playbook: Option<&'a Playbook>,
}

/// Playbook suggested for an app type, if the mapping names one the catalog holds.
pub fn recommended_playbook<'a>(
    catalog: &'a Catalog,
    app_type: &str,
    settings: &AdvisorSettings,
) -> Option<&'a Playbook> {
    let id = settings.playbooks_by_app_type.get(app_type)?;
    catalog.playbook(id)
}

/// Match `answers` against the catalog's rule table.
pub fn recommend<'a>(
    catalog: &'a Catalog,
    answers: &Answers,
    settings: &AdvisorSettings,
) -> Result<Recommendation<'a>> {
    let selection = select_rule(catalog.rules(), answers, settings)?;
    tracing::info!(
        rule = %selection.rule.id,
        score = selection.score,
        app_type = %answers.app_type,
        "recommendation ready"
    );
    Ok(Recommendation {
        selection,
        answers: answers.clone(),
        playbook: recommended_playbook(catalog, &answers.app_type, settings),
    })
}
