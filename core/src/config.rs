//! Static configuration supplied when a session starts.
//!
//! Every type deserializes with `#[serde(default)]`, so a configuration file
//! only has to mention the values it overrides. Durations are written as
//! whole milliseconds and colors as `#rrggbb` strings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{CellCoord, Rgb, TileGrid, TowerKind};

/// Reasons a color string could not be parsed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ColorParseError {
    /// The value does not start with `#`.
    #[error("color `{0}` must start with `#`")]
    MissingHash(String),
    /// The value does not contain exactly six hex digits.
    #[error("color `{0}` must contain exactly six hex digits")]
    InvalidLength(String),
    /// The value contains a character that is not a hex digit.
    #[error("color `{0}` contains a non-hex digit")]
    InvalidDigit(String),
}

/// Reasons a [`GameConfig`] cannot be used to build a world.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The grid has no cells or a cell size that is not a positive finite number.
    #[error("grid must have at least one cell and a positive cell size")]
    EmptyGrid,
    /// The session would start without any lives.
    #[error("starting lives must be greater than zero")]
    NoLives,
    /// No waypoints were provided, so there is no path to walk.
    #[error("at least one waypoint is required")]
    MissingWaypoints,
    /// A waypoint lies outside the grid.
    #[error("waypoint ({column}, {row}) lies outside the grid")]
    WaypointOutOfBounds {
        /// Column of the offending waypoint.
        column: u32,
        /// Row of the offending waypoint.
        row: u32,
    },
    /// The wave table is empty.
    #[error("the wave table must contain at least one wave")]
    MissingWaves,
    /// Enemies would be introduced with no delay between them.
    #[error("spawn interval must be greater than zero")]
    ZeroSpawnInterval,
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let millis = u64::try_from(value.as_millis()).unwrap_or(u64::MAX);
        serializer.serialize_u64(millis)
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

/// Static stat set defining a tower variant.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TowerBlueprint {
    /// Gold debited when the tower is placed.
    pub cost: u32,
    /// Targeting radius in world units.
    pub range: f32,
    /// Delay between two shots.
    #[serde(rename = "fire_interval_ms", with = "millis")]
    pub fire_interval: Duration,
    /// Hit points removed by each projectile.
    pub damage: u32,
    /// Projectile speed in tiles per millisecond.
    pub projectile_speed: f32,
    /// Projectile draw radius in world units.
    pub projectile_radius: f32,
    /// Color of the tower and its projectiles.
    pub color: Rgb,
}

/// Catalog of every tower variant available to the player.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TowerCatalog {
    /// Balanced tower.
    pub basic: TowerBlueprint,
    /// Rapid, short-range tower.
    pub burst: TowerBlueprint,
    /// Slow, long-range tower.
    pub sniper: TowerBlueprint,
}

impl TowerCatalog {
    /// Returns the blueprint of the provided tower kind.
    #[must_use]
    pub const fn blueprint(&self, kind: TowerKind) -> &TowerBlueprint {
        match kind {
            TowerKind::Basic => &self.basic,
            TowerKind::Burst => &self.burst,
            TowerKind::Sniper => &self.sniper,
        }
    }
}

impl Default for TowerCatalog {
    fn default() -> Self {
        Self {
            basic: TowerBlueprint {
                cost: 50,
                range: 150.0,
                fire_interval: Duration::from_millis(700),
                damage: 12,
                projectile_speed: 0.5,
                projectile_radius: 6.0,
                color: Rgb::from_rgb(0x48, 0xa7, 0xff),
            },
            burst: TowerBlueprint {
                cost: 70,
                range: 110.0,
                fire_interval: Duration::from_millis(350),
                damage: 7,
                projectile_speed: 0.55,
                projectile_radius: 5.0,
                color: Rgb::from_rgb(0xff, 0x67, 0x9d),
            },
            sniper: TowerBlueprint {
                cost: 90,
                range: 240.0,
                fire_interval: Duration::from_millis(1_400),
                damage: 25,
                projectile_speed: 0.65,
                projectile_radius: 6.0,
                color: Rgb::from_rgb(0xa0, 0x6b, 0xff),
            },
        }
    }
}

/// Enemy stats used for every enemy of a wave.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WaveConfig {
    /// Hit points each enemy spawns with.
    pub hit_points: u32,
    /// Travel speed in tiles per millisecond.
    pub speed: f32,
    /// Gold paid out per kill.
    pub reward: u32,
    /// Appearance of the enemies.
    pub color: Rgb,
}

/// Ordered wave table plus the pacing rules shared by every wave.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveSchedule {
    /// Enemy stats per wave. Waves past the end reuse the last entry.
    pub waves: Vec<WaveConfig>,
    /// Enemies introduced regardless of the wave number.
    pub base_enemy_count: u32,
    /// Additional enemies introduced per wave number.
    pub enemies_per_wave: u32,
    /// Delay between two enemies entering the path.
    #[serde(rename = "spawn_interval_ms", with = "millis")]
    pub spawn_interval: Duration,
    /// Gold granted when a wave is cleared.
    pub clear_bonus: u32,
}

impl WaveSchedule {
    /// Selects the enemy stats of a wave, clamping into the table.
    #[must_use]
    pub fn config_for(&self, wave: u32) -> Option<&WaveConfig> {
        let last = self.waves.len().checked_sub(1)?;
        let index = usize::try_from(wave.saturating_sub(1)).unwrap_or(usize::MAX);
        self.waves.get(index.min(last))
    }

    /// Number of enemies a wave introduces. Grows without bound with the wave number.
    #[must_use]
    pub fn enemy_count(&self, wave: u32) -> u32 {
        self.base_enemy_count
            .saturating_add(wave.saturating_mul(self.enemies_per_wave))
    }
}

impl Default for WaveSchedule {
    fn default() -> Self {
        Self {
            waves: vec![
                WaveConfig {
                    hit_points: 60,
                    speed: 0.045,
                    reward: 10,
                    color: Rgb::from_rgb(0x6e, 0xf7, 0xb1),
                },
                WaveConfig {
                    hit_points: 80,
                    speed: 0.05,
                    reward: 12,
                    color: Rgb::from_rgb(0xff, 0xd8, 0x5c),
                },
                WaveConfig {
                    hit_points: 110,
                    speed: 0.06,
                    reward: 13,
                    color: Rgb::from_rgb(0xff, 0x6b, 0x81),
                },
                WaveConfig {
                    hit_points: 140,
                    speed: 0.065,
                    reward: 15,
                    color: Rgb::from_rgb(0xb7, 0x99, 0xff),
                },
            ],
            base_enemy_count: 5,
            enemies_per_wave: 2,
            spawn_interval: Duration::from_millis(900),
            clear_bonus: 35,
        }
    }
}

/// Complete configuration of a session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Layout of the play field.
    pub grid: TileGrid,
    /// Gold available before the first placement.
    pub starting_gold: u32,
    /// Breaches tolerated before the session ends.
    pub starting_lives: u32,
    /// Sparse waypoints the path is expanded from.
    pub waypoints: Vec<CellCoord>,
    /// Tower variants available to the player.
    pub towers: TowerCatalog,
    /// Wave table and pacing.
    pub waves: WaveSchedule,
}

impl GameConfig {
    /// Checks that a world can be built from the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let tile_length = self.grid.tile_length();
        if self.grid.columns() == 0
            || self.grid.rows() == 0
            || !tile_length.is_finite()
            || tile_length <= 0.0
        {
            return Err(ConfigError::EmptyGrid);
        }
        if self.starting_lives == 0 {
            return Err(ConfigError::NoLives);
        }
        if self.waypoints.is_empty() {
            return Err(ConfigError::MissingWaypoints);
        }
        if let Some(outside) = self
            .waypoints
            .iter()
            .find(|waypoint| !self.grid.contains(**waypoint))
        {
            return Err(ConfigError::WaypointOutOfBounds {
                column: outside.column(),
                row: outside.row(),
            });
        }
        if self.waves.waves.is_empty() {
            return Err(ConfigError::MissingWaves);
        }
        if self.waves.spawn_interval.is_zero() {
            return Err(ConfigError::ZeroSpawnInterval);
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid: TileGrid::new(15, 9, 64.0),
            starting_gold: 100,
            starting_lives: 10,
            waypoints: vec![
                CellCoord::new(0, 3),
                CellCoord::new(3, 3),
                CellCoord::new(3, 1),
                CellCoord::new(6, 1),
                CellCoord::new(6, 5),
                CellCoord::new(9, 5),
                CellCoord::new(9, 7),
            ],
            towers: TowerCatalog::default(),
            waves: WaveSchedule::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn wave_config_clamps_to_last_entry() {
        let schedule = WaveSchedule::default();
        assert_eq!(schedule.config_for(1).map(|wave| wave.hit_points), Some(60));
        assert_eq!(schedule.config_for(4).map(|wave| wave.hit_points), Some(140));
        assert_eq!(schedule.config_for(40).map(|wave| wave.hit_points), Some(140));
        assert_eq!(schedule.config_for(0).map(|wave| wave.hit_points), Some(60));
    }

    #[test]
    fn empty_wave_table_yields_no_config() {
        let schedule = WaveSchedule {
            waves: Vec::new(),
            ..WaveSchedule::default()
        };
        assert!(schedule.config_for(1).is_none());
    }

    #[test]
    fn enemy_count_keeps_growing_past_the_table() {
        let schedule = WaveSchedule::default();
        assert_eq!(schedule.enemy_count(1), 7);
        assert_eq!(schedule.enemy_count(4), 13);
        assert_eq!(schedule.enemy_count(10), 25);
    }

    #[test]
    fn validation_rejects_waypoints_outside_the_grid() {
        let config = GameConfig {
            waypoints: vec![CellCoord::new(0, 0), CellCoord::new(15, 0)],
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::WaypointOutOfBounds { column: 15, row: 0 })
        );
    }

    #[test]
    fn validation_rejects_missing_pieces() {
        let no_path = GameConfig {
            waypoints: Vec::new(),
            ..GameConfig::default()
        };
        assert_eq!(no_path.validate(), Err(ConfigError::MissingWaypoints));

        let no_grid = GameConfig {
            grid: TileGrid::new(0, 9, 64.0),
            ..GameConfig::default()
        };
        assert_eq!(no_grid.validate(), Err(ConfigError::EmptyGrid));

        for tile_length in [f32::NAN, f32::INFINITY, 0.0] {
            let bad_tiles = GameConfig {
                grid: TileGrid::new(15, 9, tile_length),
                ..GameConfig::default()
            };
            assert_eq!(bad_tiles.validate(), Err(ConfigError::EmptyGrid));
        }

        let no_lives = GameConfig {
            starting_lives: 0,
            ..GameConfig::default()
        };
        assert_eq!(no_lives.validate(), Err(ConfigError::NoLives));

        let mut no_waves = GameConfig::default();
        no_waves.waves.waves.clear();
        assert_eq!(no_waves.validate(), Err(ConfigError::MissingWaves));

        let mut no_interval = GameConfig::default();
        no_interval.waves.spawn_interval = Duration::ZERO;
        assert_eq!(no_interval.validate(), Err(ConfigError::ZeroSpawnInterval));
    }

    #[test]
    fn catalog_resolves_every_kind() {
        let catalog = TowerCatalog::default();
        assert_eq!(catalog.blueprint(TowerKind::Basic).cost, 50);
        assert_eq!(catalog.blueprint(TowerKind::Burst).cost, 70);
        assert_eq!(catalog.blueprint(TowerKind::Sniper).cost, 90);
    }
}
