//! Turn-based combat
//!
//! A fight runs in rounds: every alive player unit queues one action
//! (or the party escapes), the enemy AI queues one action per alive
//! enemy, the merged list executes in descending speed order, and the
//! outcome is re-evaluated. The engine in [`engine`] drives this loop
//! through the prompt protocol; [`Fight`] is the serializable session
//! state it drives.

pub mod action;
pub mod ai;
pub mod encounter;
pub mod engine;

pub use action::{order_by_speed, CombatAction, Side, UnitRef};
pub use ai::{EnemyAi, FirstTargetAi, RandomTargetAi};
pub use encounter::{Encounter, EncounterTable};
pub use engine::{FightEngine, FightStep};

use serde::{Deserialize, Serialize};

use crate::core::types::UnitId;
use crate::event::GameEvent;
use crate::item::Item;
use crate::unit::Team;

/// Where a fight stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FightOutcome {
    NotFinished,
    Victory,
    Defeat,
    Escape,
}

impl FightOutcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, FightOutcome::NotFinished)
    }
}

/// Live combat session state
///
/// Everything a fight accumulates lives here so an intermediate round
/// can be serialized and rebuilt exactly. The driving engine holds the
/// AI and prompt bookkeeping separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fight {
    pub enemy_team: Team,
    /// Actions queued for the round in progress; drained at execution,
    /// never read again once the outcome is terminal
    pub actions: Vec<CombatAction>,
    /// Loot accrued from kills, handed over on Victory
    pub loot: Vec<Item>,
    /// XP accrued from kills, granted on Victory
    pub xp: u32,
    pub escape: bool,
    /// Unit currently being prompted for its action
    pub current_actor: Option<UnitId>,
    pub outcome: FightOutcome,
}

impl Fight {
    pub fn new(enemy_team: Team) -> Self {
        Self {
            enemy_team,
            actions: Vec::new(),
            loot: Vec::new(),
            xp: 0,
            escape: false,
            current_actor: None,
            outcome: FightOutcome::NotFinished,
        }
    }
}

/// What a finished fight hands back to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FightResult {
    pub outcome: FightOutcome,
    /// Follow-up event for Victory or Escape; Defeat ends the session
    pub next_event: Option<GameEvent>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::Unit;

    #[test]
    fn test_fight_round_trips_through_json() {
        let mut enemies = Team::new(4);
        enemies
            .add(Unit::enemy("Goblin", 10, 4, 3, 1, 5, vec![Item::relic("Fang")]))
            .unwrap();
        let mut fight = Fight::new(enemies);
        fight.xp = 12;
        fight.loot.push(Item::relic("Fang"));
        let goblin = fight.enemy_team.units()[0].id;
        fight.actions.push(CombatAction::Attack {
            actor: UnitRef::enemy(goblin),
            target: UnitRef::player(UnitId::new()),
        });
        fight.current_actor = Some(goblin);

        let json = serde_json::to_string(&fight).unwrap();
        let restored: Fight = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, fight);
    }
}
