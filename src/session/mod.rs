//! Session context: the explicit state every engine is handed
//!
//! There are no globals. [`GameState`] bundles the tunables, the
//! key-value store, the party, and the inventory; engines take it by
//! mutable reference. [`Session`] adds the map and the party's position
//! for the navigation layer on top.

pub mod save;

pub use save::SavedGame;

use crate::core::config::GameConfig;
use crate::core::error::{GameError, Result};
use crate::core::types::Coord;
use crate::item::Inventory;
use crate::map::{GameMap, Location};
use crate::unit::Team;
use crate::values::Values;

/// Everything conditions, operations, and fights touch
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    pub values: Values,
    pub team: Team,
    pub inventory: Inventory,
}

impl GameState {
    pub fn new(config: GameConfig) -> Self {
        Self {
            team: Team::new(config.team_capacity),
            inventory: Inventory::new(config.inventory_capacity),
            values: Values::default(),
            config,
        }
    }

    /// Equip a named weapon from the inventory onto a named member
    ///
    /// The displaced weapon, if any, takes the slot the new one freed, so
    /// inventory occupancy never grows. A refused equip puts the item
    /// back untouched.
    pub fn equip_from_inventory(&mut self, member: &str, weapon: &str) -> Result<()> {
        let unit = self
            .team
            .iter_mut()
            .find(|u| u.name == member)
            .ok_or_else(|| GameError::UnitNotFound(member.to_string()))?;
        if !unit.is_character() {
            return Err(GameError::InvalidState(format!(
                "{member} cannot equip weapons"
            )));
        }
        let item = self
            .inventory
            .remove(weapon)
            .ok_or_else(|| GameError::ItemNotFound(weapon.to_string()))?;
        if !item.is_weapon() {
            let name = item.name.clone();
            self.inventory.try_add(item);
            return Err(GameError::InvalidState(format!("{name} is not a weapon")));
        }
        if let Some(displaced) = unit.equip_weapon(item) {
            self.inventory.try_add(displaced);
        }
        Ok(())
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

/// A running playthrough: state plus where the party stands
#[derive(Debug, Clone)]
pub struct Session {
    pub state: GameState,
    pub map: GameMap,
    location: Coord,
}

impl Session {
    /// Start a session at `start`, which must exist on the map
    pub fn new(state: GameState, map: GameMap, start: Coord) -> Result<Self> {
        if !map.contains(start) {
            return Err(GameError::LocationNotFound(start));
        }
        Ok(Self {
            state,
            map,
            location: start,
        })
    }

    pub fn position(&self) -> Coord {
        self.location
    }

    /// Location the party stands on
    pub fn here(&self) -> Option<&Location> {
        self.map.location_at(self.location)
    }

    /// Move one step on the grid
    ///
    /// The destination must be adjacent and must exist; a refused move
    /// leaves the party where it was.
    pub fn travel_to(&mut self, coord: Coord) -> Result<()> {
        if !self.location.is_adjacent(&coord) {
            return Err(GameError::InvalidState(format!(
                "({}, {}) is not adjacent to the party",
                coord.x, coord.y
            )));
        }
        if !self.map.contains(coord) {
            return Err(GameError::LocationNotFound(coord));
        }
        self.location = coord;
        tracing::debug!("Party travels to ({}, {})", coord.x, coord.y);
        Ok(())
    }

    /// Capture everything a save needs; the map itself is stored by name
    /// and re-resolved on restore
    pub fn snapshot(&self) -> SavedGame {
        SavedGame {
            values: self.state.values.clone(),
            team: self.state.team.clone(),
            inventory: self.state.inventory.clone(),
            map: self.map.name.clone(),
            location: self.location,
        }
    }

    /// Rebuild a session from a snapshot and the map it names
    pub fn restore(saved: SavedGame, map: GameMap, config: GameConfig) -> Result<Self> {
        if map.name != saved.map {
            return Err(GameError::InvalidState(format!(
                "save expects map '{}', not '{}'",
                saved.map, map.name
            )));
        }
        if !map.contains(saved.location) {
            return Err(GameError::LocationNotFound(saved.location));
        }
        Ok(Self {
            state: GameState {
                config,
                values: saved.values,
                team: saved.team,
                inventory: saved.inventory,
            },
            map,
            location: saved.location,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Item;
    use crate::unit::Unit;

    fn strip_map() -> GameMap {
        let mut map = GameMap::new("Thornvale");
        map.add_location(Coord::new(0, 0), Location::new("Village"));
        map.add_location(Coord::new(1, 0), Location::new("East Road"));
        map.add_location(Coord::new(2, 0), Location::new("Old Bridge"));
        map
    }

    #[test]
    fn test_travel_requires_adjacency() {
        let mut session =
            Session::new(GameState::default(), strip_map(), Coord::new(0, 0)).unwrap();
        let err = session.travel_to(Coord::new(2, 0)).unwrap_err();
        assert!(matches!(err, GameError::InvalidState(_)));
        assert_eq!(session.position(), Coord::new(0, 0));

        session.travel_to(Coord::new(1, 0)).unwrap();
        session.travel_to(Coord::new(2, 0)).unwrap();
        assert_eq!(session.here().unwrap().name, "Old Bridge");
    }

    #[test]
    fn test_travel_off_the_map_is_refused() {
        let mut session =
            Session::new(GameState::default(), strip_map(), Coord::new(0, 0)).unwrap();
        let err = session.travel_to(Coord::new(0, 1)).unwrap_err();
        assert!(matches!(err, GameError::LocationNotFound(_)));
        assert_eq!(session.position(), Coord::new(0, 0));
    }

    #[test]
    fn test_snapshot_restore_round_trip() {
        let mut state = GameState::default();
        state.team.add(Unit::character("Alden", 30, 5, 6, 2)).unwrap();
        state.values.set_str("chapter", "2");
        state.inventory.add_money(75);
        let mut session = Session::new(state, strip_map(), Coord::new(0, 0)).unwrap();
        session.travel_to(Coord::new(1, 0)).unwrap();

        let saved = session.snapshot();
        let restored = Session::restore(saved, strip_map(), GameConfig::default()).unwrap();
        assert_eq!(restored.position(), Coord::new(1, 0));
        assert_eq!(restored.state.values.get_str("chapter"), Some("2"));
        assert_eq!(restored.state.inventory.money(), 75);
        assert_eq!(restored.state.team.units()[0].name, "Alden");
    }

    #[test]
    fn test_restore_rejects_wrong_map() {
        let session =
            Session::new(GameState::default(), strip_map(), Coord::new(0, 0)).unwrap();
        let saved = session.snapshot();
        let other = GameMap::new("Duskmoor");
        assert!(Session::restore(saved, other, GameConfig::default()).is_err());
    }

    #[test]
    fn test_equip_swap_keeps_inventory_occupancy() {
        let mut state = GameState::default();
        state.team.add(Unit::character("Alden", 30, 5, 6, 2)).unwrap();
        state.inventory.try_add(Item::weapon("Iron Sword", 3));
        state.inventory.try_add(Item::weapon("Steel Sword", 5));

        state.equip_from_inventory("Alden", "Iron Sword").unwrap();
        assert_eq!(state.inventory.len(), 1);
        assert_eq!(
            state.team.find_by_name("Alden").unwrap().effective_attack(),
            9
        );

        // Swapping returns the iron sword to the freed slot.
        state.equip_from_inventory("Alden", "Steel Sword").unwrap();
        assert_eq!(state.inventory.len(), 1);
        assert!(state.inventory.has_item("Iron Sword"));
        assert_eq!(
            state.team.find_by_name("Alden").unwrap().effective_attack(),
            11
        );
    }

    #[test]
    fn test_equip_refuses_non_weapons() {
        let mut state = GameState::default();
        state.team.add(Unit::character("Alden", 30, 5, 6, 2)).unwrap();
        state.inventory.try_add(Item::potion("Minor Potion", 10));
        let err = state
            .equip_from_inventory("Alden", "Minor Potion")
            .unwrap_err();
        assert!(matches!(err, GameError::InvalidState(_)));
        // The potion went back.
        assert!(state.inventory.has_item("Minor Potion"));
    }

    #[test]
    fn test_equip_unknown_member_or_item() {
        let mut state = GameState::default();
        state.team.add(Unit::character("Alden", 30, 5, 6, 2)).unwrap();
        assert!(matches!(
            state.equip_from_inventory("Ghost", "Iron Sword"),
            Err(GameError::UnitNotFound(_))
        ));
        assert!(matches!(
            state.equip_from_inventory("Alden", "Iron Sword"),
            Err(GameError::ItemNotFound(_))
        ));
    }
}
