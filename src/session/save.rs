//! Save snapshots
//!
//! A save captures the key-value store, the party, the inventory, and
//! where on which map the party stands. Maps are content, not state:
//! the save stores only the map's name and the loader re-resolves it.

use serde::{Deserialize, Serialize};

use crate::core::types::Coord;
use crate::item::Inventory;
use crate::unit::Team;
use crate::values::Values;

/// A complete point-in-time snapshot of a playthrough
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedGame {
    pub values: Values,
    pub team: Team,
    pub inventory: Inventory,
    /// Name of the map the party is on
    pub map: String,
    pub location: Coord,
}
