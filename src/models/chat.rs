use serde::{Deserialize, Serialize};
use std::fmt::Display;

use super::Book;

/// Author of a conversation turn
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl Display for ChatRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChatRole::User => write!(f, "Usuario"),
            ChatRole::Assistant => write!(f, "Asistente"),
        }
    }
}

/// A single message in the client-supplied conversation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Reply text plus the books it recommends, in presentation order
#[derive(Debug, Clone, PartialEq)]
pub struct ChatOutcome {
    pub reply: String,
    pub recommendations: Vec<Book>,
}

/// Result of interpreting raw model output
#[derive(Debug, Clone, PartialEq)]
pub enum ModelReply {
    Parsed { answer: String, ids: Vec<i64> },
    Unparseable { reason: String },
}
