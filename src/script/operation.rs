//! State mutations driven by event paragraphs and choices

use serde::{Deserialize, Serialize};

use crate::core::error::{GameError, Result};
use crate::item::Item;
use crate::session::GameState;
use crate::unit::Unit;

/// A single scripted mutation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operation {
    /// Overwrite a named value
    SetValue { key: String, value: String },
    /// Add to a named numeric value, treating an absent key as 0
    AddValue { key: String, delta: f32 },
    /// Offer an item to the inventory
    GiveItem(Item),
    /// Remove the first item with this name
    RemoveItem { name: String },
    GiveMoney { amount: u32 },
    /// Take up to `amount`; the purse floors at zero
    TakeMoney { amount: u32 },
    /// Damage (negative) or heal (positive) a named team member
    ModifyHp { unit: String, delta: i32 },
    /// Add a new member to the player team
    Recruit(Unit),
}

impl Operation {
    pub fn set_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::SetValue {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn add_value(key: impl Into<String>, delta: f32) -> Self {
        Self::AddValue {
            key: key.into(),
            delta,
        }
    }

    pub fn remove_item(name: impl Into<String>) -> Self {
        Self::RemoveItem { name: name.into() }
    }

    pub fn modify_hp(unit: impl Into<String>, delta: i32) -> Self {
        Self::ModifyHp {
            unit: unit.into(),
            delta,
        }
    }

    /// Apply the mutation, returning a player-facing line when there is
    /// something to report
    ///
    /// Capacity refusals are messages, not errors; lookups that find
    /// nothing are errors the list-level applier downgrades to warnings.
    pub fn apply(&self, state: &mut GameState) -> Result<Option<String>> {
        match self {
            Operation::SetValue { key, value } => {
                state.values.set_str(key.clone(), value.clone());
                Ok(None)
            }
            Operation::AddValue { key, delta } => {
                let current = state.values.get_number(key)?.unwrap_or(0.0);
                state.values.set_number(key.clone(), current + delta);
                Ok(None)
            }
            Operation::GiveItem(item) => {
                if state.inventory.try_add(item.clone()) {
                    Ok(Some(format!("You got {} !", item.name)))
                } else {
                    Ok(Some(format!(
                        "You can't pick up {}, your inventory is full.",
                        item.name
                    )))
                }
            }
            Operation::RemoveItem { name } => match state.inventory.remove(name) {
                Some(_) => Ok(None),
                None => Err(GameError::ItemNotFound(name.clone())),
            },
            Operation::GiveMoney { amount } => {
                state.inventory.add_money(*amount);
                Ok(None)
            }
            Operation::TakeMoney { amount } => {
                state.inventory.take_money(*amount);
                Ok(None)
            }
            Operation::ModifyHp { unit, delta } => {
                let member = state
                    .team
                    .iter_mut()
                    .find(|u| u.name == *unit)
                    .ok_or_else(|| GameError::UnitNotFound(unit.clone()))?;
                if *delta >= 0 {
                    member.heal(*delta);
                } else {
                    member.take_damage(-*delta);
                }
                Ok(None)
            }
            Operation::Recruit(unit) => match state.team.add(unit.clone()) {
                Ok(()) => Ok(None),
                Err(GameError::TeamFull) => Ok(Some(format!(
                    "{} cannot join, the party is full.",
                    unit.name
                ))),
                Err(err) => Err(err),
            },
        }
    }
}
