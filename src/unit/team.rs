//! Team roster with a fixed capacity

use serde::{Deserialize, Serialize};

use crate::core::error::{GameError, Result};
use crate::core::types::UnitId;
use crate::unit::Unit;

/// An ordered roster of units
///
/// Order is insertion order and is significant: action menus and round
/// rosters present units in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    units: Vec<Unit>,
    capacity: usize,
}

impl Team {
    pub fn new(capacity: usize) -> Self {
        Self {
            units: Vec::new(),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Add a unit, refusing once the roster is at capacity
    pub fn add(&mut self, unit: Unit) -> Result<()> {
        if self.units.len() >= self.capacity {
            return Err(GameError::TeamFull);
        }
        self.units.push(unit);
        Ok(())
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.iter().find(|u| u.id == id)
    }

    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.iter_mut().find(|u| u.id == id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Unit> {
        self.units.iter().find(|u| u.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Unit> {
        self.units.iter_mut()
    }

    pub fn alive(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter().filter(|u| !u.is_dead())
    }

    /// Ids of the units alive right now, in roster order
    pub fn alive_ids(&self) -> Vec<UnitId> {
        self.alive().map(|u| u.id).collect()
    }

    /// True when no unit is alive; vacuously true for an empty roster
    pub fn all_dead(&self) -> bool {
        self.units.iter().all(|u| u.is_dead())
    }

    /// Fresh copy with new unit ids
    ///
    /// Encounter templates spawn a new roster per fight so damage to one
    /// fight's foes never leaks into the next.
    pub fn instantiate(&self) -> Team {
        let mut team = Team::new(self.capacity);
        for unit in &self.units {
            let mut copy = unit.clone();
            copy.id = UnitId::new();
            team.units.push(copy);
        }
        team
    }
}
