use thiserror::Error;

use crate::wizard::QuestionId;

pub type Result<T> = std::result::Result<T, AdvisorError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdvisorError {
    /// No decision rules at all: nothing can be recommended
    #[error("the decision rule table is empty")]
    EmptyRuleTable,

    #[error("unanswered questions: {}", join_ids(.missing))]
    IncompleteAnswers { missing: Vec<QuestionId> },

    #[error("unknown question '{0}'")]
    UnknownQuestion(String),

    #[error("'{value}' is not an option for {question}")]
    InvalidAnswer { question: QuestionId, value: String },

    /// The wizard cannot move past a question without an answer
    #[error("select an option for {0} to continue")]
    Unanswered(QuestionId),
}

fn join_ids(ids: &[QuestionId]) -> String {
    ids.iter().map(|q| q.as_str()).collect::<Vec<_>>().join(", ")
}
