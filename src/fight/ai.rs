//! Enemy action selection
//!
//! The engine asks the AI for exactly one action per alive enemy each
//! round. Policies must be reproducible: fights are replayable when the
//! seed is fixed.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::fight::action::{CombatAction, UnitRef};
use crate::unit::Team;

/// Round-action policy for the enemy side
pub trait EnemyAi {
    /// One action per alive enemy, in enemy roster order
    fn decide(&mut self, enemies: &Team, players: &Team) -> Vec<CombatAction>;
}

/// Default policy: each enemy attacks a random alive player unit
pub struct RandomTargetAi {
    rng: ChaCha8Rng,
}

impl RandomTargetAi {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl EnemyAi for RandomTargetAi {
    fn decide(&mut self, enemies: &Team, players: &Team) -> Vec<CombatAction> {
        let targets = players.alive_ids();
        if targets.is_empty() {
            return Vec::new();
        }
        enemies
            .alive()
            .map(|enemy| {
                let target = targets[self.rng.gen_range(0..targets.len())];
                CombatAction::Attack {
                    actor: UnitRef::enemy(enemy.id),
                    target: UnitRef::player(target),
                }
            })
            .collect()
    }
}

/// Fixture policy: every enemy attacks the first alive player unit
pub struct FirstTargetAi;

impl EnemyAi for FirstTargetAi {
    fn decide(&mut self, enemies: &Team, players: &Team) -> Vec<CombatAction> {
        let Some(target) = players.alive_ids().first().copied() else {
            return Vec::new();
        };
        enemies
            .alive()
            .map(|enemy| CombatAction::Attack {
                actor: UnitRef::enemy(enemy.id),
                target: UnitRef::player(target),
            })
            .collect()
    }
}
