use thiserror::Error;

use crate::core::types::{Coord, ParagraphId};

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("No location at {0:?}")]
    LocationNotFound(Coord),

    #[error("Unit not found: {0}")]
    UnitNotFound(String),

    #[error("Paragraph not found: {0:?}")]
    ParagraphNotFound(ParagraphId),

    #[error("Item not found: {0}")]
    ItemNotFound(String),

    #[error("Value for '{key}' is not parseable: {value:?}")]
    MalformedValue { key: String, value: String },

    #[error("Team is at capacity")]
    TeamFull,

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
