//! List-level evaluation of conditions and operations

use crate::script::{Condition, Operation};
use crate::session::GameState;

/// Logical AND over the list; an empty list holds
///
/// A condition that fails to evaluate counts as unmet so a choice gated
/// on garbage never shows up.
pub fn evaluate_conditions(conditions: &[Condition], state: &GameState) -> bool {
    conditions.iter().all(|condition| match condition.holds(state) {
        Ok(met) => met,
        Err(err) => {
            tracing::warn!("Condition treated as unmet: {}", err);
            false
        }
    })
}

/// Apply each operation in listed order, collecting player-facing lines
///
/// Not transactional: a failing operation is skipped with a warning and
/// the rest still apply.
pub fn apply_operations(operations: &[Operation], state: &mut GameState) -> Vec<String> {
    let mut messages = Vec::new();
    for operation in operations {
        match operation.apply(state) {
            Ok(Some(line)) => messages.push(line),
            Ok(None) => {}
            Err(err) => tracing::warn!("Operation skipped: {}", err),
        }
    }
    messages
}
