//! The stack questionnaire: six fixed questions answered one step at a time.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{AdvisorError, Result};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum QuestionId {
    AppType,
    NeedsAuth,
    NeedsDb,
    NeedsRag,
    Budget,
    UserLevel,
}

impl QuestionId {
    pub const ALL: [QuestionId; 6] = [
        QuestionId::AppType,
        QuestionId::NeedsAuth,
        QuestionId::NeedsDb,
        QuestionId::NeedsRag,
        QuestionId::Budget,
        QuestionId::UserLevel,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            QuestionId::AppType => "app_type",
            QuestionId::NeedsAuth => "needs_auth",
            QuestionId::NeedsDb => "needs_db",
            QuestionId::NeedsRag => "needs_rag",
            QuestionId::Budget => "budget",
            QuestionId::UserLevel => "user_level",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|q| q.as_str() == s)
    }

    pub fn question(self) -> &'static Question {
        &QUESTIONS[self as usize]
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A wizard answer: yes/no questions take a flag, the rest a choice value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum AnswerValue {
    Flag(bool),
    Choice(String),
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerValue::Flag(b) => write!(f, "{b}"),
            AnswerValue::Choice(s) => f.write_str(s),
        }
    }
}

impl From<bool> for AnswerValue {
    fn from(b: bool) -> Self {
        AnswerValue::Flag(b)
    }
}

impl From<&str> for AnswerValue {
    fn from(s: &str) -> Self {
        AnswerValue::Choice(s.to_string())
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum OptionValue {
    Flag(bool),
    Choice(&'static str),
}

impl OptionValue {
    fn matches(self, answer: &AnswerValue) -> bool {
        match (self, answer) {
            (OptionValue::Flag(a), AnswerValue::Flag(b)) => a == *b,
            (OptionValue::Choice(a), AnswerValue::Choice(b)) => a == b,
            _ => false,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct QuestionOption {
    pub value: OptionValue,
    pub label: &'static str,
    pub desc: &'static str,
}

#[derive(Debug, Serialize)]
pub struct Question {
    pub id: QuestionId,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub options: &'static [QuestionOption],
}

impl Question {
    pub fn accepts(&self, value: &AnswerValue) -> bool {
        self.options.iter().any(|o| o.value.matches(value))
    }
}

const fn opt(value: OptionValue, label: &'static str, desc: &'static str) -> QuestionOption {
    QuestionOption { value, label, desc }
}

use OptionValue::{Choice, Flag};

/// In `QuestionId` order.
pub static QUESTIONS: [Question; 6] = [
    Question {
        id: QuestionId::AppType,
        title: "What kind of application do you want to build?",
        subtitle: "Pick the closest match to your goal.",
        options: &[
            opt(Choice("landing"), "Landing Page", "Lead capture page"),
            opt(Choice("saas"), "SaaS / Web App", "Login, CRUD, dashboard"),
            opt(Choice("crm"), "CRM", "Contacts, sales and pipeline"),
            opt(Choice("dashboard"), "Dashboard", "Analytics panel with KPIs and charts"),
            opt(Choice("agent"), "AI Agent", "AI that runs tasks with tools"),
            opt(Choice("automation"), "Automation", "Workflows and integrations"),
            opt(Choice("bot_whatsapp"), "WhatsApp Bot", "Chatbot with automatic replies"),
            opt(Choice("ecommerce"), "E-commerce", "Online store with cart and payment"),
            opt(Choice("marketplace"), "Marketplace", "Platform with sellers and buyers"),
            opt(Choice("internal_tool"), "Internal Tool", "System for the team"),
            opt(Choice("mobile"), "Mobile App", "iOS/Android application"),
        ],
    },
    Question {
        id: QuestionId::NeedsAuth,
        title: "Does it need login and authentication?",
        subtitle: "Do users create accounts and sign in?",
        options: &[
            opt(Flag(true), "Yes", "Login, sign-up, user profiles"),
            opt(Flag(false), "No", "Public access, no account"),
        ],
    },
    Question {
        id: QuestionId::NeedsDb,
        title: "Does it need a database?",
        subtitle: "Will it store users, products, transactions?",
        options: &[
            opt(Flag(true), "Yes", "Store and query data"),
            opt(Flag(false), "No", "Static or external content"),
        ],
    },
    Question {
        id: QuestionId::NeedsRag,
        title: "Does it need AI with memory (RAG)?",
        subtitle: "A chat that answers from your documents or data?",
        options: &[
            opt(Flag(true), "Yes", "Chat over documents, semantic search"),
            opt(Flag(false), "No", "No RAG needed"),
        ],
    },
    Question {
        id: QuestionId::Budget,
        title: "What is your budget and pace?",
        subtitle: "This shapes how complex the recommended stack is.",
        options: &[
            opt(Choice("low"), "Fast and cheap", "MVP with free or cheap tools"),
            opt(Choice("medium"), "Balanced", "Good value, scalable"),
            opt(Choice("high"), "Robust and complete", "Invest in quality and monitoring"),
        ],
    },
    Question {
        id: QuestionId::UserLevel,
        title: "What is your technical level?",
        subtitle: "This calibrates the recommendations.",
        options: &[
            opt(Choice("beginner"), "Beginner", "Never coded, uses no-code tools"),
            opt(Choice("intermediate"), "Intermediate", "Knows the basics, codes with AI"),
            opt(Choice("advanced"), "Advanced", "Codes with AI assistance"),
        ],
    },
];

/// Answers collected so far.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnswerSet(BTreeMap<QuestionId, AnswerValue>);

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer, checking it against the question's options.
    pub fn set(&mut self, id: QuestionId, value: AnswerValue) -> Result<()> {
        if !id.question().accepts(&value) {
            return Err(AdvisorError::InvalidAnswer {
                question: id,
                value: value.to_string(),
            });
        }
        self.0.insert(id, value);
        Ok(())
    }

    /// Record an answer addressed by its question id string.
    pub fn set_by_name(&mut self, id: &str, value: AnswerValue) -> Result<()> {
        let id = QuestionId::parse(id).ok_or_else(|| AdvisorError::UnknownQuestion(id.to_string()))?;
        self.set(id, value)
    }

    pub fn get(&self, id: QuestionId) -> Option<&AnswerValue> {
        self.0.get(&id)
    }

    pub fn is_answered(&self, id: QuestionId) -> bool {
        self.0.contains_key(&id)
    }

    pub fn missing(&self) -> Vec<QuestionId> {
        QuestionId::ALL
            .into_iter()
            .filter(|q| !self.is_answered(*q))
            .collect()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    fn choice(&self, id: QuestionId) -> Option<String> {
        match self.0.get(&id)? {
            AnswerValue::Choice(s) => Some(s.clone()),
            AnswerValue::Flag(_) => None,
        }
    }

    fn flag(&self, id: QuestionId) -> Option<bool> {
        match self.0.get(&id)? {
            AnswerValue::Flag(b) => Some(*b),
            AnswerValue::Choice(_) => None,
        }
    }

    /// All six answers, or the list of questions still open.
    pub fn complete(&self) -> Result<Answers> {
        let missing = self.missing();
        if !missing.is_empty() {
            return Err(AdvisorError::IncompleteAnswers { missing });
        }
        let incomplete = || AdvisorError::IncompleteAnswers {
            missing: self.missing(),
        };
        Ok(Answers {
            app_type: self.choice(QuestionId::AppType).ok_or_else(incomplete)?,
            needs_auth: self.flag(QuestionId::NeedsAuth).ok_or_else(incomplete)?,
            needs_db: self.flag(QuestionId::NeedsDb).ok_or_else(incomplete)?,
            needs_rag: self.flag(QuestionId::NeedsRag).ok_or_else(incomplete)?,
            budget: self.choice(QuestionId::Budget).ok_or_else(incomplete)?,
            user_level: self.choice(QuestionId::UserLevel).ok_or_else(incomplete)?,
        })
    }
}

/// A fully answered questionnaire. Rule matching only ever sees this.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Answers {
    pub app_type: String,
    pub needs_auth: bool,
    pub needs_db: bool,
    pub needs_rag: bool,
    pub budget: String,
    pub user_level: String,
}

/// Where the wizard went after `next()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardProgress {
    Advanced(usize),
    Finished(Answers),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Wizard {
    step: usize,
    answers: AnswerSet,
}

impl Wizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn current(&self) -> &'static Question {
        &QUESTIONS[self.step]
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    /// Answer the current question. Re-answering overwrites.
    pub fn answer(&mut self, value: impl Into<AnswerValue>) -> Result<()> {
        let id = self.current().id;
        self.answers.set(id, value.into())
    }

    /// Move forward, or finish on the last question.
    pub fn next(&mut self) -> Result<WizardProgress> {
        let id = self.current().id;
        if !self.answers.is_answered(id) {
            return Err(AdvisorError::Unanswered(id));
        }
        if self.step + 1 < QUESTIONS.len() {
            self.step += 1;
            Ok(WizardProgress::Advanced(self.step))
        } else {
            self.answers.complete().map(WizardProgress::Finished)
        }
    }

    /// Step back. Returns false on the first question.
    pub fn back(&mut self) -> bool {
        if self.step == 0 {
            return false;
        }
        self.step -= 1;
        true
    }

    pub fn restart(&mut self) {
        self.step = 0;
        self.answers.clear();
    }
}
