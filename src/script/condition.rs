//! Predicates over session state

use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::session::GameState;

/// A predicate a choice can be gated on
///
/// Value predicates read the session's key-value store; an absent key is
/// always unmet, never an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Condition {
    /// Named value parses as a number >= `threshold`
    ValueAtLeast { key: String, threshold: f32 },
    /// Named value equals `expected` exactly
    ValueEquals { key: String, expected: String },
    /// Inventory holds an item with this name
    HasItem { name: String },
    /// Purse holds at least this much
    MoneyAtLeast { amount: u32 },
}

impl Condition {
    pub fn value_at_least(key: impl Into<String>, threshold: f32) -> Self {
        Self::ValueAtLeast {
            key: key.into(),
            threshold,
        }
    }

    pub fn value_equals(key: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::ValueEquals {
            key: key.into(),
            expected: expected.into(),
        }
    }

    pub fn has_item(name: impl Into<String>) -> Self {
        Self::HasItem { name: name.into() }
    }

    pub fn money_at_least(amount: u32) -> Self {
        Self::MoneyAtLeast { amount }
    }

    /// Test the predicate against current state
    ///
    /// Errors only on a value that exists but does not parse; the caller
    /// decides whether that counts as unmet.
    pub fn holds(&self, state: &GameState) -> Result<bool> {
        match self {
            Condition::ValueAtLeast { key, threshold } => {
                Ok(matches!(state.values.get_number(key)?, Some(n) if n >= *threshold))
            }
            Condition::ValueEquals { key, expected } => {
                Ok(state.values.get_str(key) == Some(expected.as_str()))
            }
            Condition::HasItem { name } => Ok(state.inventory.has_item(name)),
            Condition::MoneyAtLeast { amount } => Ok(state.inventory.money() >= *amount),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Item;

    #[test]
    fn test_absent_key_is_unmet() {
        let state = GameState::default();
        assert!(!Condition::value_at_least("met_king", 1.0)
            .holds(&state)
            .unwrap());
        assert!(!Condition::value_equals("chapter", "2").holds(&state).unwrap());
    }

    #[test]
    fn test_value_at_least_boundary() {
        let mut state = GameState::default();
        state.values.set_number("reputation", 3.0);
        assert!(Condition::value_at_least("reputation", 3.0)
            .holds(&state)
            .unwrap());
        assert!(!Condition::value_at_least("reputation", 3.1)
            .holds(&state)
            .unwrap());
    }

    #[test]
    fn test_unparseable_value_is_an_error() {
        let mut state = GameState::default();
        state.values.set_str("reputation", "plenty");
        assert!(Condition::value_at_least("reputation", 1.0)
            .holds(&state)
            .is_err());
    }

    #[test]
    fn test_item_and_money_predicates() {
        let mut state = GameState::default();
        state.inventory.try_add(Item::relic("Old Key"));
        state.inventory.add_money(50);
        assert!(Condition::has_item("Old Key").holds(&state).unwrap());
        assert!(!Condition::has_item("New Key").holds(&state).unwrap());
        assert!(Condition::money_at_least(50).holds(&state).unwrap());
        assert!(!Condition::money_at_least(51).holds(&state).unwrap());
    }
}
