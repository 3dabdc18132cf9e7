//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a unit instance
///
/// Combat actions hold unit ids rather than references; a dead unit's id
/// stays resolvable for the rest of the fight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitId(pub Uuid);

impl UnitId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UnitId {
    fn default() -> Self {
        Self::new()
    }
}

/// Index of a paragraph within its event's paragraph list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParagraphId(pub u32);

impl ParagraphId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Grid coordinate on a game map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The 4 orthogonally adjacent coordinates (travel is 4-way)
    pub fn neighbors(&self) -> [Coord; 4] {
        [
            Coord::new(self.x, self.y - 1),
            Coord::new(self.x + 1, self.y),
            Coord::new(self.x, self.y + 1),
            Coord::new(self.x - 1, self.y),
        ]
    }

    pub fn is_adjacent(&self, other: &Coord) -> bool {
        self.neighbors().contains(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_id_unique() {
        let a = UnitId::new();
        let b = UnitId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_unit_id_hash() {
        use std::collections::HashMap;
        let id = UnitId::new();
        let mut map: HashMap<UnitId, &str> = HashMap::new();
        map.insert(id, "goblin");
        assert_eq!(map.get(&id), Some(&"goblin"));
    }

    #[test]
    fn test_coord_neighbors_are_adjacent() {
        let center = Coord::new(3, 3);
        for n in center.neighbors() {
            assert!(center.is_adjacent(&n));
            assert!(n.is_adjacent(&center));
        }
    }

    #[test]
    fn test_coord_diagonal_not_adjacent() {
        let a = Coord::new(0, 0);
        let b = Coord::new(1, 1);
        assert!(!a.is_adjacent(&b));
        assert!(!a.is_adjacent(&a));
    }
}
