//! Event traversal engine
//!
//! Walks one `GameEvent` at a time. Each call runs until the next
//! suspension point: entering a paragraph shows its text, applies its
//! operations, filters its choices, then either prompts or finishes.
//! A paragraph whose surviving choice list is empty is terminal.

use serde::{Deserialize, Serialize};

use crate::core::error::{GameError, Result};
use crate::core::types::ParagraphId;
use crate::event::{Choice, GameEvent};
use crate::prompt::{ChoiceDescriptor, Prompt, PromptAnswer, PromptToken, Step, TokenSeq};
use crate::script::{apply_operations, evaluate_conditions};
use crate::session::GameState;

/// Step payload for events; completion carries no data
pub type EventStep = Step<()>;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ActiveEvent {
    event: GameEvent,
    /// Choices that survived the filter, in declared order; the offered
    /// id is the index into this list
    offered: Vec<Choice>,
    token: PromptToken,
}

/// Walks paragraph graphs, one active event at most
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventEngine {
    active: Option<ActiveEvent>,
    tokens: TokenSeq,
}

impl EventEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Begin an event at its root, cancelling any event already active
    ///
    /// A prompt issued by the cancelled event can no longer be answered;
    /// its token died with it.
    pub fn start(&mut self, event: GameEvent, state: &mut GameState) -> Result<EventStep> {
        event.validate()?;
        if self.active.take().is_some() {
            tracing::debug!("Event '{}' starts, cancelling the active event", event.name);
        }
        self.tokens.invalidate();
        let root = event.root();
        self.enter(event, root, state, Vec::new())
    }

    /// Deliver the answer to the pending prompt and walk to the next
    /// suspension point
    ///
    /// Rejected without effect when no event is active, the token is
    /// stale, or the answer does not fit the prompt; in the last case the
    /// prompt stays live and can be answered again.
    pub fn resume(
        &mut self,
        token: PromptToken,
        answer: PromptAnswer,
        state: &mut GameState,
    ) -> Result<EventStep> {
        let mut active = match self.active.take() {
            Some(active) => active,
            None => {
                tracing::warn!("Event answer arrived with no event awaiting one");
                return Err(GameError::InvalidState(
                    "no event is awaiting an answer".into(),
                ));
            }
        };
        if token != active.token {
            self.active = Some(active);
            tracing::warn!("Stale event prompt token ignored");
            return Err(GameError::InvalidState("prompt token is stale".into()));
        }
        let picked = match answer {
            PromptAnswer::Chosen(id) if (id as usize) < active.offered.len() => id as usize,
            _ => {
                self.active = Some(active);
                return Err(GameError::InvalidState(
                    "answer does not match the pending prompt".into(),
                ));
            }
        };

        // The prompt is consumed from here on.
        let choice = active.offered.remove(picked);
        let messages = apply_operations(&choice.operations, state);
        match choice.target {
            None => Ok(Step::finished(messages, ())),
            Some(next) => self.enter(active.event, next, state, messages),
        }
    }

    fn enter(
        &mut self,
        event: GameEvent,
        cursor: ParagraphId,
        state: &mut GameState,
        mut messages: Vec<String>,
    ) -> Result<EventStep> {
        let paragraph = match event.paragraph(cursor) {
            Some(paragraph) => paragraph.clone(),
            None => return Err(GameError::ParagraphNotFound(cursor)),
        };
        messages.push(paragraph.text.clone());
        messages.extend(apply_operations(&paragraph.operations, state));

        let offered: Vec<Choice> = paragraph
            .choices
            .iter()
            .filter(|choice| evaluate_conditions(&choice.conditions, state))
            .cloned()
            .collect();
        if offered.is_empty() {
            tracing::debug!("Event '{}' finished at paragraph {:?}", event.name, cursor);
            return Ok(Step::finished(messages, ()));
        }

        let token = self.tokens.mint();
        let descriptors = offered
            .iter()
            .enumerate()
            .map(|(id, choice)| ChoiceDescriptor::new(id as u32, choice.label.clone()))
            .collect();
        self.active = Some(ActiveEvent {
            event,
            offered,
            token,
        });
        Ok(Step::suspended(messages, Prompt::choices(token, descriptors)))
    }
}
