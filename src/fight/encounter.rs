//! Encounter templates and weighted encounter tables

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::event::GameEvent;
use crate::unit::Team;

/// Template for one fight: intro line, enemy roster, optional follow-up
///
/// The roster here is a template; the engine instantiates a fresh copy
/// per fight so one fight's damage never leaks into the next.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Encounter {
    pub intro: String,
    pub enemy_team: Team,
    /// Event to run after Victory or Escape
    pub next_event: Option<GameEvent>,
}

impl Encounter {
    pub fn new(intro: impl Into<String>, enemy_team: Team) -> Self {
        Self {
            intro: intro.into(),
            enemy_team,
            next_event: None,
        }
    }

    pub fn with_next_event(mut self, event: GameEvent) -> Self {
        self.next_event = Some(event);
        self
    }
}

/// Ordered rows of (chance, encounter); the first row whose chance fires
/// wins
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EncounterTable {
    rows: Vec<(f32, Encounter)>,
}

impl EncounterTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_row(mut self, chance: f32, encounter: Encounter) -> Self {
        self.rows.push((chance, encounter));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Roll the table top to bottom
    ///
    /// Each row fires when a fresh draw in [0, 1) lands under its chance,
    /// so 1.0 always fires and 0.0 never does.
    pub fn roll<R: Rng>(&self, rng: &mut R) -> Option<&Encounter> {
        self.rows
            .iter()
            .find(|(chance, _)| rng.gen::<f32>() < *chance)
            .map(|(_, encounter)| encounter)
    }
}
