//! Grid maps and locations
//!
//! A map is a sparse 4-connected grid. Each location can carry the event
//! that plays on arrival and an encounter table for wandering foes.

use ahash::AHashMap;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::types::Coord;
use crate::event::GameEvent;
use crate::fight::{Encounter, EncounterTable};

/// One cell of the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    /// Played when the party arrives
    pub event: Option<GameEvent>,
    pub encounters: EncounterTable,
}

impl Location {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            event: None,
            encounters: EncounterTable::new(),
        }
    }

    pub fn with_event(mut self, event: GameEvent) -> Self {
        self.event = Some(event);
        self
    }

    pub fn with_encounters(mut self, encounters: EncounterTable) -> Self {
        self.encounters = encounters;
        self
    }

    /// Roll this location's encounter table
    pub fn random_encounter<R: Rng>(&self, rng: &mut R) -> Option<&Encounter> {
        self.encounters.roll(rng)
    }
}

/// A named, sparse grid of locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameMap {
    pub name: String,
    locations: AHashMap<Coord, Location>,
}

impl GameMap {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            locations: AHashMap::new(),
        }
    }

    pub fn add_location(&mut self, coord: Coord, location: Location) {
        self.locations.insert(coord, location);
    }

    pub fn location_at(&self, coord: Coord) -> Option<&Location> {
        self.locations.get(&coord)
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.locations.contains_key(&coord)
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Coordinates adjacent to `coord` that hold a location
    pub fn exits(&self, coord: Coord) -> Vec<Coord> {
        coord
            .neighbors()
            .into_iter()
            .filter(|c| self.contains(*c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cross_map() -> GameMap {
        // Village at the center, clearings N/E/S/W.
        let mut map = GameMap::new("Thornvale");
        map.add_location(Coord::new(0, 0), Location::new("Village"));
        map.add_location(Coord::new(0, 1), Location::new("North Clearing"));
        map.add_location(Coord::new(1, 0), Location::new("East Clearing"));
        map.add_location(Coord::new(0, -1), Location::new("South Clearing"));
        map.add_location(Coord::new(-1, 0), Location::new("West Clearing"));
        map
    }

    #[test]
    fn test_lookup_hits_and_misses() {
        let map = cross_map();
        assert_eq!(map.location_at(Coord::new(0, 0)).unwrap().name, "Village");
        assert!(map.location_at(Coord::new(5, 5)).is_none());
    }

    #[test]
    fn test_exits_follow_the_grid() {
        let map = cross_map();
        assert_eq!(map.exits(Coord::new(0, 0)).len(), 4);
        // A clearing only connects back to the village.
        assert_eq!(map.exits(Coord::new(0, 1)), vec![Coord::new(0, 0)]);
    }
}
