//! Thornvale - Turn-Based RPG Simulation Core

pub mod core;
pub mod event;
pub mod fight;
pub mod item;
pub mod map;
pub mod prompt;
pub mod script;
pub mod session;
pub mod unit;
pub mod values;
