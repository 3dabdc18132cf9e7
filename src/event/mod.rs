//! Narrative events: paragraph graphs walked one choice at a time
//!
//! An event is a directed graph of paragraphs. Each paragraph carries
//! display text, operations applied on arrival, and an ordered list of
//! gated choices. A choice with no target ends the event. The engine in
//! [`engine`] does the walking; this module is the data.

pub mod engine;

pub use engine::{EventEngine, EventStep};

use serde::{Deserialize, Serialize};

use crate::core::error::{GameError, Result};
use crate::core::types::ParagraphId;
use crate::script::{Condition, Operation};

/// One branch option hanging off a paragraph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub label: String,
    /// All must hold for the choice to be offered
    pub conditions: Vec<Condition>,
    /// Applied when the choice is picked
    pub operations: Vec<Operation>,
    /// Next paragraph; `None` ends the event
    pub target: Option<ParagraphId>,
}

impl Choice {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            conditions: Vec::new(),
            operations: Vec::new(),
            target: None,
        }
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn with_operation(mut self, operation: Operation) -> Self {
        self.operations.push(operation);
        self
    }

    pub fn leading_to(mut self, target: ParagraphId) -> Self {
        self.target = Some(target);
        self
    }
}

/// One narrative beat: text, arrival operations, choices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    pub text: String,
    /// Applied unconditionally when the paragraph is reached
    pub operations: Vec<Operation>,
    pub choices: Vec<Choice>,
}

impl Paragraph {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            operations: Vec::new(),
            choices: Vec::new(),
        }
    }

    pub fn with_operation(mut self, operation: Operation) -> Self {
        self.operations.push(operation);
        self
    }

    pub fn with_choice(mut self, choice: Choice) -> Self {
        self.choices.push(choice);
        self
    }
}

/// A full event graph; paragraph 0 is the root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    pub name: String,
    paragraphs: Vec<Paragraph>,
}

impl GameEvent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            paragraphs: Vec::new(),
        }
    }

    /// Append a paragraph, returning its id for wiring choices
    pub fn add_paragraph(&mut self, paragraph: Paragraph) -> ParagraphId {
        let id = ParagraphId(self.paragraphs.len() as u32);
        self.paragraphs.push(paragraph);
        id
    }

    pub fn paragraph(&self, id: ParagraphId) -> Option<&Paragraph> {
        self.paragraphs.get(id.index())
    }

    pub fn root(&self) -> ParagraphId {
        ParagraphId(0)
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    /// Check every choice edge lands on a real paragraph
    pub fn validate(&self) -> Result<()> {
        if self.paragraphs.is_empty() {
            return Err(GameError::InvalidState(format!(
                "event '{}' has no paragraphs",
                self.name
            )));
        }
        for paragraph in &self.paragraphs {
            for choice in &paragraph.choices {
                if let Some(target) = choice.target {
                    if target.index() >= self.paragraphs.len() {
                        return Err(GameError::ParagraphNotFound(target));
                    }
                }
            }
        }
        Ok(())
    }
}
