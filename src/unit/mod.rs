//! Units - the combat-capable entities on both sides of a fight
//!
//! One `Unit` type covers both sides; the `UnitKind` variant carries what
//! differs (characters level, enemies drop rewards). HP mutation goes
//! through `take_damage`/`heal` so the `[0, max_hp]` clamp holds
//! everywhere.

pub mod team;

pub use team::Team;

use serde::{Deserialize, Serialize};

use crate::core::types::UnitId;
use crate::item::{Item, ItemKind};

/// Side-specific unit data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitKind {
    /// Player-team member
    Character {
        /// XP accumulated toward the next level
        xp: u32,
        level: u32,
        weapon: Option<Item>,
    },
    /// Encounter-spawned foe
    Enemy { xp_reward: u32, loot: Vec<Item> },
}

/// A combat-capable unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub name: String,
    pub hp: i32,
    pub max_hp: i32,
    pub speed: i32,
    pub attack: i32,
    pub defense: i32,
    pub kind: UnitKind,
}

impl Unit {
    pub fn character(name: impl Into<String>, max_hp: i32, speed: i32, attack: i32, defense: i32) -> Self {
        Self {
            id: UnitId::new(),
            name: name.into(),
            hp: max_hp,
            max_hp,
            speed,
            attack,
            defense,
            kind: UnitKind::Character {
                xp: 0,
                level: 1,
                weapon: None,
            },
        }
    }

    pub fn enemy(
        name: impl Into<String>,
        max_hp: i32,
        speed: i32,
        attack: i32,
        defense: i32,
        xp_reward: u32,
        loot: Vec<Item>,
    ) -> Self {
        Self {
            id: UnitId::new(),
            name: name.into(),
            hp: max_hp,
            max_hp,
            speed,
            attack,
            defense,
            kind: UnitKind::Enemy { xp_reward, loot },
        }
    }

    /// Dead is derived, never stored
    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }

    pub fn is_character(&self) -> bool {
        matches!(self.kind, UnitKind::Character { .. })
    }

    pub fn is_enemy(&self) -> bool {
        matches!(self.kind, UnitKind::Enemy { .. })
    }

    /// Base attack plus equipped weapon bonus
    pub fn effective_attack(&self) -> i32 {
        let bonus = match &self.kind {
            UnitKind::Character {
                weapon: Some(item), ..
            } => match item.kind {
                ItemKind::Weapon { attack_bonus } => attack_bonus,
                _ => 0,
            },
            _ => 0,
        };
        self.attack + bonus
    }

    pub fn weapon(&self) -> Option<&Item> {
        match &self.kind {
            UnitKind::Character { weapon, .. } => weapon.as_ref(),
            UnitKind::Enemy { .. } => None,
        }
    }

    /// Swap the equipped weapon, returning the displaced one
    ///
    /// Enemies cannot equip; the offered weapon comes straight back so the
    /// caller can return it to the inventory.
    pub fn equip_weapon(&mut self, weapon: Item) -> Option<Item> {
        match &mut self.kind {
            UnitKind::Character { weapon: slot, .. } => std::mem::replace(slot, Some(weapon)),
            UnitKind::Enemy { .. } => Some(weapon),
        }
    }

    /// Apply damage, clamping HP at 0
    pub fn take_damage(&mut self, amount: i32) {
        self.hp = (self.hp - amount.max(0)).max(0);
    }

    /// Restore HP, clamping at max; returns the amount actually restored
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.hp;
        self.hp = (self.hp + amount.max(0)).min(self.max_hp);
        self.hp - before
    }

    /// Grant XP; returns the number of levels gained
    ///
    /// Reaching `xp_level_step * level` rolls the character over to the
    /// next level: +10 max HP (HP refills by the gain), +2 attack,
    /// +1 defense. Excess XP carries toward the next threshold. Enemies
    /// ignore XP.
    pub fn gain_xp(&mut self, amount: u32, xp_level_step: u32) -> u32 {
        let UnitKind::Character { xp, level, .. } = &mut self.kind else {
            return 0;
        };
        *xp += amount;
        let mut gained = 0;
        while *xp >= xp_level_step * *level {
            *xp -= xp_level_step * *level;
            *level += 1;
            gained += 1;
        }
        if gained > 0 {
            self.max_hp += 10 * gained as i32;
            self.hp = (self.hp + 10 * gained as i32).min(self.max_hp);
            self.attack += 2 * gained as i32;
            self.defense += gained as i32;
        }
        gained
    }

    pub fn level(&self) -> Option<u32> {
        match &self.kind {
            UnitKind::Character { level, .. } => Some(*level),
            UnitKind::Enemy { .. } => None,
        }
    }
}
