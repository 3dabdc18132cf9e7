//! Items and the party inventory

pub mod inventory;

pub use inventory::Inventory;

use serde::{Deserialize, Serialize};

/// What an item does when used or equipped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    /// Equippable; adds to the wielder's attack
    Weapon { attack_bonus: i32 },
    /// Consumable; restores HP to one unit
    Potion { restore: i32 },
    /// Inert loot or quest token
    Relic,
}

/// An item instance
///
/// Items are plain values: picking one up clones the template, and two
/// items with the same name are interchangeable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub kind: ItemKind,
}

impl Item {
    pub fn weapon(name: impl Into<String>, attack_bonus: i32) -> Self {
        Self {
            name: name.into(),
            kind: ItemKind::Weapon { attack_bonus },
        }
    }

    pub fn potion(name: impl Into<String>, restore: i32) -> Self {
        Self {
            name: name.into(),
            kind: ItemKind::Potion { restore },
        }
    }

    pub fn relic(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ItemKind::Relic,
        }
    }

    pub fn is_weapon(&self) -> bool {
        matches!(self.kind, ItemKind::Weapon { .. })
    }

    pub fn is_potion(&self) -> bool {
        matches!(self.kind, ItemKind::Potion { .. })
    }
}
