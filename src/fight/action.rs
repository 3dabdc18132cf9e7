//! Combat actions and round ordering

use serde::{Deserialize, Serialize};

use crate::core::types::UnitId;
use crate::item::Item;
use crate::unit::{Team, Unit};

/// Which roster a unit reference points into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Enemy,
}

/// Weak reference to a unit in the fight's live teams
///
/// Actions hold references, never units: a target that dies before its
/// turn still resolves, and the effect decides what a dead target means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitRef {
    pub side: Side,
    pub id: UnitId,
}

impl UnitRef {
    pub fn player(id: UnitId) -> Self {
        Self {
            side: Side::Player,
            id,
        }
    }

    pub fn enemy(id: UnitId) -> Self {
        Self {
            side: Side::Enemy,
            id,
        }
    }

    pub fn resolve<'a>(&self, players: &'a Team, enemies: &'a Team) -> Option<&'a Unit> {
        match self.side {
            Side::Player => players.unit(self.id),
            Side::Enemy => enemies.unit(self.id),
        }
    }

    pub fn resolve_mut<'a>(
        &self,
        players: &'a mut Team,
        enemies: &'a mut Team,
    ) -> Option<&'a mut Unit> {
        match self.side {
            Side::Player => players.unit_mut(self.id),
            Side::Enemy => enemies.unit_mut(self.id),
        }
    }
}

/// One unit's queued effect for the round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatAction {
    Attack { actor: UnitRef, target: UnitRef },
    Heal { actor: UnitRef, target: UnitRef },
    UseItem {
        actor: UnitRef,
        target: UnitRef,
        item: Item,
    },
}

impl CombatAction {
    pub fn actor(&self) -> UnitRef {
        match self {
            CombatAction::Attack { actor, .. }
            | CombatAction::Heal { actor, .. }
            | CombatAction::UseItem { actor, .. } => *actor,
        }
    }

    pub fn target(&self) -> UnitRef {
        match self {
            CombatAction::Attack { target, .. }
            | CombatAction::Heal { target, .. }
            | CombatAction::UseItem { target, .. } => *target,
        }
    }
}

/// Sort a round's actions by strictly descending actor speed
///
/// The sort is stable: equal speeds keep append order, which is the only
/// tiebreak contract. An actor that no longer resolves sorts as speed 0.
pub fn order_by_speed(actions: &mut [CombatAction], players: &Team, enemies: &Team) {
    actions.sort_by_key(|action| {
        let speed = action
            .actor()
            .resolve(players, enemies)
            .map(|unit| unit.speed)
            .unwrap_or(0);
        std::cmp::Reverse(speed)
    });
}
