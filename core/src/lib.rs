#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Waypoint Defence engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters and systems submit
//! [`Command`] values describing desired mutations, the world executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values
//! that systems and presentation layers react to. Systems consume event
//! streams, query immutable views, and respond exclusively with new command
//! batches.

use std::time::Duration;

use serde::{Deserialize, Serialize};

mod config;

pub use config::{
    ColorParseError, ConfigError, GameConfig, TowerBlueprint, TowerCatalog, WaveConfig,
    WaveSchedule,
};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Waypoint Defence.";

/// Phase of the wave state machine that governs the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WavePhase {
    /// No wave is active; towers may be placed and a wave may be started.
    Idle,
    /// A wave is active: enemies are being introduced or are still alive.
    Spawning,
    /// Lives are exhausted. Absorbing: no further transitions occur.
    GameOver,
}

impl WavePhase {
    /// Reports whether a wave is actively in progress.
    #[must_use]
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Spawning)
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests placement of a tower at the provided cell.
    PlaceTower {
        /// Type of tower to construct.
        kind: TowerKind,
        /// Cell that will hold the tower.
        cell: CellCoord,
    },
    /// Requests that the next wave begins. Ignored unless the world is idle.
    StartWave,
    /// Introduces one enemy of the current wave at the start of the path.
    SpawnEnemy,
    /// Moves every live enemy along the path and resolves breaches and deaths.
    AdvanceEnemies {
        /// Duration of simulated time the enemies travel for.
        dt: Duration,
    },
    /// Counts down the cooldown of every tower that is still reloading.
    CoolTowers {
        /// Duration of simulated time that elapsed.
        dt: Duration,
    },
    /// Requests that a ready tower launches a projectile at an enemy.
    FireProjectile {
        /// Tower that fires.
        tower: TowerId,
        /// Enemy the projectile homes onto.
        target: EnemyId,
    },
    /// Moves every in-flight projectile and resolves arrivals.
    AdvanceProjectiles {
        /// Duration of simulated time the projectiles travel for.
        dt: Duration,
    },
    /// Concludes the active wave once every enemy has been dealt with.
    ClearWave,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that a tower was placed into the world.
    TowerPlaced {
        /// Identifier assigned to the tower by the world.
        tower: TowerId,
        /// Type of tower that was placed.
        kind: TowerKind,
        /// Cell occupied by the tower.
        cell: CellCoord,
        /// Gold debited for the construction.
        cost: u32,
    },
    /// Reports that a tower placement request was rejected.
    TowerPlacementRejected {
        /// Type of tower requested for placement.
        kind: TowerKind,
        /// Cell provided in the placement request.
        cell: CellCoord,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Announces that a wave began.
    WaveStarted {
        /// Number of the wave that started.
        wave: u32,
        /// Number of enemies the wave will introduce.
        enemies: u32,
    },
    /// Confirms that an enemy entered the path.
    EnemySpawned {
        /// Identifier assigned to the enemy.
        enemy: EnemyId,
        /// Path cell the enemy starts on.
        cell: CellCoord,
    },
    /// Reports that an enemy ran out of health and paid out its reward.
    EnemyDefeated {
        /// Identifier of the removed enemy.
        enemy: EnemyId,
        /// Gold credited for the kill.
        reward: u32,
    },
    /// Reports that an enemy walked off the end of the path.
    BaseBreached {
        /// Identifier of the removed enemy.
        enemy: EnemyId,
        /// Lives left after the breach.
        lives_remaining: u32,
    },
    /// Announces that the lives were exhausted. No further events follow for the session.
    GameOver {
        /// Wave that was in progress.
        wave: u32,
    },
    /// Confirms that a tower launched a projectile.
    ProjectileFired {
        /// Identifier assigned to the projectile.
        projectile: ProjectileId,
        /// Tower that fired.
        tower: TowerId,
        /// Enemy targeted by the projectile.
        target: EnemyId,
    },
    /// Reports that a projectile reached its target and applied damage.
    ProjectileHit {
        /// Identifier of the resolved projectile.
        projectile: ProjectileId,
        /// Enemy that received the damage.
        target: EnemyId,
        /// Damage applied to the enemy.
        damage: u32,
    },
    /// Reports that a projectile was discarded because its target vanished.
    ProjectileExpired {
        /// Identifier of the discarded projectile.
        projectile: ProjectileId,
    },
    /// Announces that the active wave was cleared.
    WaveCleared {
        /// Number of the wave that was cleared.
        wave: u32,
        /// Gold bonus credited for the clear.
        bonus: u32,
    },
}

impl Event {
    /// Maps the event onto the transient message a presentation layer shows, if any.
    #[must_use]
    pub fn notification(&self) -> Option<Notification> {
        let kind = match *self {
            Self::TowerPlaced { kind, .. } => NotificationKind::TowerPlaced { kind },
            Self::TowerPlacementRejected { reason, .. } => {
                NotificationKind::PlacementBlocked { reason }
            }
            Self::WaveStarted { wave, .. } => NotificationKind::WaveStarted { wave },
            Self::BaseBreached {
                lives_remaining, ..
            } => NotificationKind::BaseBreached { lives_remaining },
            Self::WaveCleared { wave, .. } => NotificationKind::WaveCleared { wave },
            Self::GameOver { wave } => NotificationKind::GameOver { wave },
            _ => return None,
        };
        Some(Notification::new(kind))
    }
}

/// Short reason code describing a player-facing notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    /// A tower was built.
    TowerPlaced {
        /// Kind of tower that was built.
        kind: TowerKind,
    },
    /// A placement attempt was refused.
    PlacementBlocked {
        /// Reason reported by the world.
        reason: PlacementError,
    },
    /// A wave began.
    WaveStarted {
        /// Number of the wave.
        wave: u32,
    },
    /// An enemy reached the base.
    BaseBreached {
        /// Lives left after the breach.
        lives_remaining: u32,
    },
    /// A wave was cleared.
    WaveCleared {
        /// Number of the cleared wave.
        wave: u32,
    },
    /// The session ended.
    GameOver {
        /// Wave that was in progress.
        wave: u32,
    },
}

impl NotificationKind {
    /// How long the message should stay visible. [`Duration::ZERO`] means persistent.
    #[must_use]
    pub const fn display_for(self) -> Duration {
        match self {
            Self::TowerPlaced { .. } => Duration::from_millis(800),
            Self::PlacementBlocked { .. } => Duration::from_millis(1_000),
            Self::WaveStarted { .. } => Duration::from_millis(1_200),
            Self::BaseBreached { .. } => Duration::from_millis(1_100),
            Self::WaveCleared { .. } => Duration::from_millis(1_400),
            Self::GameOver { .. } => Duration::ZERO,
        }
    }
}

/// Transient message surfaced to the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Notification {
    /// Reason code of the message.
    pub kind: NotificationKind,
    /// Auto-dismiss delay; zero keeps the message until it is replaced.
    pub display_for: Duration,
}

impl Notification {
    /// Creates a notification using the default display duration of its kind.
    #[must_use]
    pub const fn new(kind: NotificationKind) -> Self {
        Self {
            kind,
            display_for: kind.display_for(),
        }
    }

    /// Reports whether the message stays visible until replaced.
    #[must_use]
    pub const fn is_persistent(&self) -> bool {
        self.display_for.is_zero()
    }
}

/// Opaque RGB color assigned to towers, projectiles and enemies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    red: u8,
    green: u8,
    blue: u8,
}

impl Rgb {
    /// Creates a new color from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Parses a `#rrggbb` hex string.
    pub fn parse_hex(value: &str) -> Result<Self, ColorParseError> {
        let digits = value
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(value.to_owned()))?;
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(ColorParseError::InvalidLength(value.to_owned()));
        }
        if !digits.chars().all(|digit| digit.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidDigit(value.to_owned()));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| ColorParseError::InvalidDigit(value.to_owned()))
        };

        Ok(Self::from_rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Red component of the color.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the color.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the color.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

impl TryFrom<String> for Rgb {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_hex(&value)
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        format!("#{:02x}{:02x}{:02x}", color.red, color.green, color.blue)
    }
}

/// Unique identifier assigned to a tower.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TowerId(u32);

impl TowerId {
    /// Creates a new tower identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the tower identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Generation-checked handle to an enemy slot.
///
/// Slots are recycled once an enemy is removed; the generation is bumped on
/// every removal so a handle held by a projectile never resolves to the
/// enemy that later reuses the slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId {
    slot: u32,
    generation: u32,
}

impl EnemyId {
    /// Creates a handle from a slot index and generation counter.
    #[must_use]
    pub const fn new(slot: u32, generation: u32) -> Self {
        Self { slot, generation }
    }

    /// Index of the arena slot.
    #[must_use]
    pub const fn slot(&self) -> u32 {
        self.slot
    }

    /// Generation the slot had when the handle was issued.
    #[must_use]
    pub const fn generation(&self) -> u32 {
        self.generation
    }
}

/// Unique identifier assigned to a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectileId(u32);

impl ProjectileId {
    /// Creates a new projectile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Returns the neighbouring cell one step closer to `target` on every misaligned axis.
    #[must_use]
    pub fn step_toward(self, target: CellCoord) -> CellCoord {
        CellCoord::new(
            step_axis(self.column, target.column),
            step_axis(self.row, target.row),
        )
    }
}

fn step_axis(from: u32, to: u32) -> u32 {
    match from.cmp(&to) {
        std::cmp::Ordering::Less => from + 1,
        std::cmp::Ordering::Greater => from - 1,
        std::cmp::Ordering::Equal => from,
    }
}

/// Position in world units (pixels).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldPoint {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

impl WorldPoint {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: WorldPoint) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Describes the discrete cell layout of the play field.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileGrid {
    columns: u32,
    rows: u32,
    tile_length: f32,
}

impl TileGrid {
    /// Creates a new tile grid description.
    #[must_use]
    pub const fn new(columns: u32, rows: u32, tile_length: f32) -> Self {
        Self {
            columns,
            rows,
            tile_length,
        }
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Side length of a single square cell expressed in world units.
    #[must_use]
    pub const fn tile_length(&self) -> f32 {
        self.tile_length
    }

    /// Reports whether the cell lies inside the grid.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.columns && cell.row() < self.rows
    }

    /// Reports whether the cell lies on the bottom row kept free as the approach lane.
    #[must_use]
    pub const fn is_approach_row(&self, cell: CellCoord) -> bool {
        self.rows > 0 && cell.row() == self.rows - 1
    }

    /// World-space center of the provided cell.
    #[must_use]
    pub fn cell_center(&self, cell: CellCoord) -> WorldPoint {
        let half = self.tile_length / 2.0;
        WorldPoint::new(
            cell.column() as f32 * self.tile_length + half,
            cell.row() as f32 * self.tile_length + half,
        )
    }

    /// Converts a world-space position into the cell beneath it.
    ///
    /// Returns `None` for positions outside the grid.
    #[must_use]
    pub fn cell_at(&self, point: WorldPoint) -> Option<CellCoord> {
        if self.tile_length <= f32::EPSILON || point.x < 0.0 || point.y < 0.0 {
            return None;
        }

        let column = (point.x / self.tile_length).floor() as u32;
        let row = (point.y / self.tile_length).floor() as u32;
        let cell = CellCoord::new(column, row);
        self.contains(cell).then_some(cell)
    }
}

/// Hit points of an enemy. May drop below zero between a hit and the next death check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Health(i32);

impl Health {
    /// Creates a new health value.
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Retrieves the raw hit points.
    #[must_use]
    pub const fn get(&self) -> i32 {
        self.0
    }

    /// Returns the health left after subtracting `damage`.
    #[must_use]
    pub fn damaged(self, damage: u32) -> Self {
        let damage = i32::try_from(damage).unwrap_or(i32::MAX);
        Self(self.0.saturating_sub(damage))
    }

    /// Reports whether the enemy owning this health is dead.
    #[must_use]
    pub const fn is_depleted(&self) -> bool {
        self.0 <= 0
    }
}

/// Types of towers that can be constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TowerKind {
    /// Balanced tower with medium range and cadence.
    Basic,
    /// Short-range tower that fires rapidly for low damage.
    Burst,
    /// Long-range tower that fires slowly for heavy damage.
    Sniper,
}

impl TowerKind {
    /// Every tower kind in catalog order.
    pub const ALL: [TowerKind; 3] = [Self::Basic, Self::Burst, Self::Sniper];

    /// Display name of the tower kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Burst => "burst",
            Self::Sniper => "sniper",
        }
    }

    /// Looks up a tower kind by its display name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

/// Reasons a tower placement request may be rejected by the world.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, thiserror::Error,
)]
pub enum PlacementError {
    /// A wave is in progress or the session is over, so placement is disabled.
    #[error("towers can only be placed between waves")]
    InvalidPhase,
    /// The requested cell lies outside the grid.
    #[error("cell lies outside the grid")]
    OutOfBounds,
    /// The requested cell lies on the reserved approach row.
    #[error("the bottom row is reserved for the approach lane")]
    ApproachRow,
    /// The requested cell is part of the enemy path.
    #[error("cell is part of the enemy path")]
    PathCell,
    /// The requested cell already holds a tower.
    #[error("cell already holds a tower")]
    Occupied,
    /// The player cannot afford the tower.
    #[error("tower costs {cost} gold but only {available} is available")]
    InsufficientGold {
        /// Cost of the requested tower.
        cost: u32,
        /// Gold available at the time of the request.
        available: u32,
    },
}

/// Immutable representation of a single tower's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TowerSnapshot {
    /// Identifier allocated to the tower by the world.
    pub id: TowerId,
    /// Kind of tower that was constructed.
    pub kind: TowerKind,
    /// Cell occupied by the tower.
    pub cell: CellCoord,
    /// World-space center of the tower.
    pub position: WorldPoint,
    /// Targeting radius in world units.
    pub range: f32,
    /// Time left until the tower may fire again.
    pub cooldown: Duration,
    /// Color shared by the tower and its projectiles.
    pub color: Rgb,
}

impl TowerSnapshot {
    /// Reports whether the tower may acquire a target this tick.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.cooldown.is_zero()
    }
}

/// Read-only snapshot describing all towers placed on the grid.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TowerView {
    snapshots: Vec<TowerSnapshot>,
}

impl TowerView {
    /// Creates a new tower view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<TowerSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured tower snapshots in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &TowerSnapshot> {
        self.snapshots.iter()
    }

    /// Looks up the snapshot of a tower.
    #[must_use]
    pub fn get(&self, tower: TowerId) -> Option<&TowerSnapshot> {
        self.snapshots
            .binary_search_by_key(&tower, |snapshot| snapshot.id)
            .ok()
            .map(|index| &self.snapshots[index])
    }

    /// Number of towers captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view contains no towers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

/// Immutable representation of a single enemy's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Handle of the enemy.
    pub id: EnemyId,
    /// World-space position of the enemy.
    pub position: WorldPoint,
    /// Current hit points.
    pub health: Health,
    /// Hit points the enemy spawned with.
    pub max_health: u32,
    /// Travel speed in tiles per millisecond.
    pub speed: f32,
    /// Gold paid out when the enemy dies.
    pub reward: u32,
    /// Index of the last path cell the enemy reached.
    pub path_index: usize,
    /// Appearance of the enemy.
    pub color: Rgb,
}

impl EnemySnapshot {
    /// Fraction of health left, clamped into `0.0..=1.0` for health bars.
    #[must_use]
    pub fn health_ratio(&self) -> f32 {
        if self.max_health == 0 {
            return 0.0;
        }
        (self.health.get().max(0) as f32 / self.max_health as f32).clamp(0.0, 1.0)
    }
}

/// Read-only snapshot describing all live enemies.
///
/// Snapshots keep spawn order, which is the order targeting ties are broken in.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from snapshots already in spawn order.
    #[must_use]
    pub fn from_snapshots(snapshots: Vec<EnemySnapshot>) -> Self {
        Self { snapshots }
    }

    /// Iterator over the captured enemy snapshots in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Looks up the snapshot of an enemy.
    #[must_use]
    pub fn get(&self, enemy: EnemyId) -> Option<&EnemySnapshot> {
        self.snapshots.iter().find(|snapshot| snapshot.id == enemy)
    }

    /// Number of enemies captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view contains no enemies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

/// Immutable representation of an in-flight projectile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileSnapshot {
    /// Identifier of the projectile.
    pub id: ProjectileId,
    /// World-space position of the projectile.
    pub position: WorldPoint,
    /// Enemy the projectile homes onto.
    pub target: EnemyId,
    /// Draw radius in world units.
    pub radius: f32,
    /// Appearance of the projectile.
    pub color: Rgb,
}

/// Read-only snapshot describing all in-flight projectiles.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProjectileView {
    snapshots: Vec<ProjectileSnapshot>,
}

impl ProjectileView {
    /// Creates a new projectile view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(snapshots: Vec<ProjectileSnapshot>) -> Self {
        Self { snapshots }
    }

    /// Iterator over the captured projectiles in firing order.
    pub fn iter(&self) -> impl Iterator<Item = &ProjectileSnapshot> {
        self.snapshots.iter()
    }

    /// Number of projectiles captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view contains no projectiles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

/// Target assignment computed for a ready tower.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TowerTarget {
    /// Tower that acquired the target.
    pub tower: TowerId,
    /// Enemy selected by the tower.
    pub enemy: EnemyId,
    /// Distance between tower and enemy in world units.
    pub distance: f32,
}
