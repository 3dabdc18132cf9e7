//! Pull-based prompt protocol
//!
//! Engines never block on input. Each step call returns narration plus
//! either a `Prompt` (the engine is suspended until an answer arrives) or
//! a `Finished` payload. Every prompt carries a single-use token; resuming
//! with anything but the latest token is rejected, so a stale caller can
//! never answer a question the engine is no longer asking.

use serde::{Deserialize, Serialize};

/// Single-use handle tying an answer to the prompt that asked for it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PromptToken(pub u64);

/// Mints tokens for one engine; monotonic, never reused
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenSeq {
    next: u64,
}

impl TokenSeq {
    pub fn mint(&mut self) -> PromptToken {
        let token = PromptToken(self.next);
        self.next += 1;
        token
    }

    /// Burn the current sequence position without handing out a token
    ///
    /// Restarting an engine calls this so any prompt issued before the
    /// restart can no longer be answered.
    pub fn invalidate(&mut self) {
        self.next += 1;
    }
}

/// One selectable entry in a choice prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceDescriptor {
    /// Id to echo back in `PromptAnswer::Chosen`
    pub id: u32,
    pub label: String,
}

impl ChoiceDescriptor {
    pub fn new(id: u32, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }
}

/// What the suspended engine is asking for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PromptRequest {
    /// Pick one of the listed entries
    Choices(Vec<ChoiceDescriptor>),
    /// Press on; no decision to make
    Acknowledge,
}

/// A suspension point: the question plus the token that unlocks it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    pub token: PromptToken,
    pub request: PromptRequest,
}

impl Prompt {
    pub fn choices(token: PromptToken, choices: Vec<ChoiceDescriptor>) -> Self {
        Self {
            token,
            request: PromptRequest::Choices(choices),
        }
    }

    pub fn acknowledge(token: PromptToken) -> Self {
        Self {
            token,
            request: PromptRequest::Acknowledge,
        }
    }
}

/// Caller's reply to a prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PromptAnswer {
    /// Id of the chosen entry from a `Choices` request
    Chosen(u32),
    /// Reply to an `Acknowledge` request
    Acknowledged,
}

/// Where control sits after a step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Control<T> {
    /// Suspended; answer the prompt to continue
    Prompt(Prompt),
    /// Run complete with its payload
    Finished(T),
}

/// Narration produced by a step plus the resulting control state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step<T> {
    /// Lines to show the player, in order
    pub messages: Vec<String>,
    pub control: Control<T>,
}

impl<T> Step<T> {
    pub fn suspended(messages: Vec<String>, prompt: Prompt) -> Self {
        Self {
            messages,
            control: Control::Prompt(prompt),
        }
    }

    pub fn finished(messages: Vec<String>, value: T) -> Self {
        Self {
            messages,
            control: Control::Finished(value),
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.control, Control::Finished(_))
    }

    pub fn prompt(&self) -> Option<&Prompt> {
        match &self.control {
            Control::Prompt(p) => Some(p),
            Control::Finished(_) => None,
        }
    }
}
