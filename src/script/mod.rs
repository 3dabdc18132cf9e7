//! Scripting primitives: conditions gate choices, operations mutate state
//!
//! Both are plain data so event graphs can be serialized as content.
//! Evaluation is non-transactional on purpose: a bad entry skips itself
//! and the rest of the list still runs.

pub mod condition;
pub mod eval;
pub mod operation;

pub use condition::Condition;
pub use eval::{apply_operations, evaluate_conditions};
pub use operation::Operation;
