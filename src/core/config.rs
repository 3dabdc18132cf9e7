//! Game configuration with documented constants
//!
//! All tunable numbers are collected here. The config is constructed once
//! at startup and passed by reference to whatever needs it; there is no
//! global accessor.

/// Tunables for the simulation core
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Maximum units on the player team
    ///
    /// Recruitment past this count is refused. Four keeps every member
    /// promptable within a single combat round without scrolling fatigue.
    pub team_capacity: usize,

    /// Maximum items the inventory holds
    ///
    /// Loot offered past this count is dropped with a user-visible
    /// message rather than an error.
    pub inventory_capacity: usize,

    /// Minimum damage a landed attack deals
    ///
    /// Keeps high-defense targets killable: damage is
    /// `max(damage_floor, attack - defense)`.
    pub damage_floor: i32,

    /// XP required per level, multiplied by the current level
    ///
    /// A level-1 character needs `xp_level_step` XP to reach level 2,
    /// a level-2 character needs `2 * xp_level_step` more, and so on.
    pub xp_level_step: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            team_capacity: 4,
            inventory_capacity: 20,
            damage_floor: 1,
            xp_level_step: 100,
        }
    }
}

impl GameConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.team_capacity == 0 {
            return Err("team_capacity must be at least 1".into());
        }
        if self.damage_floor < 0 {
            return Err(format!(
                "damage_floor ({}) must be non-negative",
                self.damage_floor
            ));
        }
        if self.xp_level_step == 0 {
            return Err("xp_level_step must be positive".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_team_capacity_rejected() {
        let config = GameConfig {
            team_capacity: 0,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
