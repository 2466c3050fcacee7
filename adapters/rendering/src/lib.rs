#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Waypoint Defence adapters.

use anyhow::Result as AnyResult;
use glam::Vec2;
use std::{fmt, time::Duration};
use waypoint_defence_core::{
    CellCoord, EnemyId, EnemyView, Event, NotificationKind, PlacementError, ProjectileId,
    ProjectileView, Rgb, TileGrid, TowerId, TowerKind, TowerView, WavePhase, WorldPoint,
};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns the same color with the provided alpha.
    #[must_use]
    pub const fn with_alpha(self, alpha: f32) -> Self {
        Self { alpha, ..self }
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Self::from_rgb_u8(rgb.red(), rgb.green(), rgb.blue())
    }
}

fn to_vec(point: WorldPoint) -> Vec2 {
    Vec2::new(point.x, point.y)
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Tower button pressed on this frame, if any.
    pub select_tower: Option<TowerKind>,
    /// Whether the player asked for the next wave on this frame.
    pub start_wave: bool,
    /// Cursor position expressed in world units, clamped to the playable grid bounds.
    pub cursor_world_space: Option<Vec2>,
    /// Whether the adapter detected a placement confirmation on this frame.
    pub confirm_action: bool,
}

/// Decision returned by the per-frame scene update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameControl {
    /// Keep presenting frames.
    Continue,
    /// Stop the backend after this frame.
    Exit,
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum RenderingError {
    /// Cells must have a positive, finite side length.
    #[error("cell length must be positive (received {cell_length})")]
    InvalidCellLength {
        /// Provided length that failed validation.
        cell_length: f32,
    },
}

/// Describes the visible grid in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileGridPresentation {
    /// Number of columns.
    pub columns: u32,
    /// Number of rows.
    pub rows: u32,
    /// Side length of one cell in world units.
    pub cell_length: f32,
    /// Color of the grid lines.
    pub line_color: Color,
}

impl TileGridPresentation {
    /// Creates a grid descriptor, rejecting degenerate cell sizes.
    pub fn new(
        columns: u32,
        rows: u32,
        cell_length: f32,
        line_color: Color,
    ) -> Result<Self, RenderingError> {
        if !cell_length.is_finite() || cell_length <= 0.0 {
            return Err(RenderingError::InvalidCellLength { cell_length });
        }

        Ok(Self {
            columns,
            rows,
            cell_length,
            line_color,
        })
    }

    /// Builds a grid descriptor matching the simulation grid.
    pub fn from_tile_grid(grid: &TileGrid, line_color: Color) -> Result<Self, RenderingError> {
        Self::new(grid.columns(), grid.rows(), grid.tile_length(), line_color)
    }

    /// Cell beneath a world-space position, if the position lies on the grid.
    #[must_use]
    pub fn cell_at(&self, position: Vec2) -> Option<CellCoord> {
        if position.x < 0.0 || position.y < 0.0 {
            return None;
        }

        let column = (position.x / self.cell_length).floor() as u32;
        let row = (position.y / self.cell_length).floor() as u32;
        (column < self.columns && row < self.rows).then_some(CellCoord::new(column, row))
    }

    /// World-space center of a cell.
    #[must_use]
    pub fn cell_center(&self, cell: CellCoord) -> Vec2 {
        (Vec2::new(cell.column() as f32, cell.row() as f32) + Vec2::splat(0.5)) * self.cell_length
    }
}

/// Route cells highlighted on the grid plus the base marker.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathPresentation {
    /// Cells the enemies walk, in order.
    pub cells: Vec<CellCoord>,
    /// Center of the base cell, if the route is not empty.
    pub base_center: Option<Vec2>,
    /// Fill of the route cells.
    pub color: Color,
    /// Fill of the base marker.
    pub base_color: Color,
}

impl Default for Color {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }
}

impl PathPresentation {
    /// Describes the route drawn on `grid`.
    #[must_use]
    pub fn new(grid: &TileGridPresentation, cells: &[CellCoord]) -> Self {
        Self {
            cells: cells.to_vec(),
            base_center: cells.last().map(|cell| grid.cell_center(*cell)),
            color: Color::from_rgb_u8(112, 240, 255).with_alpha(0.08),
            base_color: Color::from_rgb_u8(0xff, 0x5c, 0x8a),
        }
    }
}

/// Tower drawn as a disc with its range ring.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneTower {
    /// Identifier allocated by the world.
    pub id: TowerId,
    /// Kind of tower.
    pub kind: TowerKind,
    /// World-space center.
    pub center: Vec2,
    /// Radius of the range ring.
    pub range: f32,
    /// Fill color of the disc.
    pub color: Color,
}

/// Enemy drawn as a disc with a health bar.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyPresentation {
    /// Handle of the enemy.
    pub id: EnemyId,
    /// World-space center.
    pub center: Vec2,
    /// Fraction of the health bar to fill.
    pub health_ratio: f32,
    /// Fill color of the disc.
    pub color: Color,
}

/// Projectile drawn as a small disc.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectilePresentation {
    /// Identifier allocated by the world.
    pub id: ProjectileId,
    /// World-space center.
    pub center: Vec2,
    /// Radius of the disc.
    pub radius: f32,
    /// Fill color of the disc.
    pub color: Color,
}

/// Hovered cell highlighted while a tower is selected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TowerPreview {
    /// Selected tower kind.
    pub kind: TowerKind,
    /// Hovered cell.
    pub cell: CellCoord,
    /// Whether the tower could be built there.
    pub placeable: bool,
}

/// Header values shown above the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HudPresentation {
    /// Gold available.
    pub gold: u32,
    /// Lives left.
    pub lives: u32,
    /// Current wave number.
    pub wave: u32,
    /// Phase of the session.
    pub phase: WavePhase,
    /// Tower kind selected for building.
    pub selected_tower: Option<TowerKind>,
}

impl fmt::Display for HudPresentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phase = match self.phase {
            WavePhase::Idle => "building",
            WavePhase::Spawning => "wave in progress",
            WavePhase::GameOver => "game over",
        };
        let selected = self.selected_tower.map_or("-", TowerKind::name);
        write!(
            f,
            "gold {} | lives {} | wave {} | {} | tower {}",
            self.gold, self.lives, self.wave, phase, selected
        )
    }
}

/// Scene description combining the static grid and the live entities.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Grid that composes the play area.
    pub tile_grid: TileGridPresentation,
    /// Enemy route and base.
    pub path: PathPresentation,
    /// Header values.
    pub hud: HudPresentation,
    /// Placed towers.
    pub towers: Vec<SceneTower>,
    /// Live enemies in spawn order.
    pub enemies: Vec<EnemyPresentation>,
    /// In-flight projectiles.
    pub projectiles: Vec<ProjectilePresentation>,
    /// Placement preview under the cursor.
    pub tower_preview: Option<TowerPreview>,
    /// Message currently shown by the banner.
    pub banner: Option<String>,
}

impl Scene {
    /// Creates a scene with the static layout and no entities.
    #[must_use]
    pub fn new(
        tile_grid: TileGridPresentation,
        path: PathPresentation,
        hud: HudPresentation,
    ) -> Self {
        Self {
            tile_grid,
            path,
            hud,
            towers: Vec::new(),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            tower_preview: None,
            banner: None,
        }
    }

    /// Replaces the entity lists with the latest simulation views.
    pub fn refresh(
        &mut self,
        hud: HudPresentation,
        towers: &TowerView,
        enemies: &EnemyView,
        projectiles: &ProjectileView,
    ) {
        self.hud = hud;

        self.towers.clear();
        self.towers.extend(towers.iter().map(|tower| SceneTower {
            id: tower.id,
            kind: tower.kind,
            center: to_vec(tower.position),
            range: tower.range,
            color: tower.color.into(),
        }));

        self.enemies.clear();
        self.enemies.extend(enemies.iter().map(|enemy| EnemyPresentation {
            id: enemy.id,
            center: to_vec(enemy.position),
            health_ratio: enemy.health_ratio(),
            color: enemy.color.into(),
        }));

        self.projectiles.clear();
        self.projectiles
            .extend(projectiles.iter().map(|projectile| ProjectilePresentation {
                id: projectile.id,
                center: to_vec(projectile.position),
                radius: projectile.radius,
                color: projectile.color.into(),
            }));
    }
}

/// Player-facing text for a notification.
#[must_use]
pub fn notification_text(kind: NotificationKind) -> String {
    match kind {
        NotificationKind::TowerPlaced { kind } => format!("{} tower built!", kind.name()),
        NotificationKind::PlacementBlocked {
            reason: PlacementError::InsufficientGold { .. },
        } => "Not enough gold".to_owned(),
        NotificationKind::PlacementBlocked {
            reason: PlacementError::InvalidPhase,
        } => "Towers can only be built between waves".to_owned(),
        NotificationKind::PlacementBlocked { .. } => "Cannot build here".to_owned(),
        NotificationKind::WaveStarted { wave } => format!("Wave {wave} incoming!"),
        NotificationKind::BaseBreached { lives_remaining } => {
            format!("The base was hit! {lives_remaining} lives left")
        }
        NotificationKind::WaveCleared { wave } => format!("Wave {wave} cleared!"),
        NotificationKind::GameOver { wave } => format!("Game over in wave {wave}"),
    }
}

/// Single-line message area that shows the latest notification.
///
/// Each message replaces the previous one and disappears once its display
/// time has elapsed. Messages with a zero display time stay until replaced.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MessageBanner {
    text: Option<String>,
    remaining: Option<Duration>,
}

impl MessageBanner {
    /// Creates an empty banner.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Text currently shown, if any.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Counts the visible message down, hiding it once its time is up.
    pub fn advance(&mut self, dt: Duration) {
        let Some(remaining) = self.remaining else {
            return;
        };

        let remaining = remaining.saturating_sub(dt);
        if remaining.is_zero() {
            self.text = None;
            self.remaining = None;
        } else {
            self.remaining = Some(remaining);
        }
    }

    /// Shows the notification of the last event that carries one.
    pub fn observe(&mut self, events: &[Event]) {
        let Some(notification) = events.iter().rev().find_map(Event::notification) else {
            return;
        };

        self.text = Some(notification_text(notification.kind));
        self.remaining = (!notification.is_persistent()).then_some(notification.display_for);
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title shown by the backend.
    pub window_title: String,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            scene,
        }
    }
}

/// Rendering backend capable of presenting Waypoint Defence scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until the update closure asks it to exit.
    ///
    /// The provided `update_scene` closure receives the simulated frame delta
    /// and the per-frame input captured by the adapter, and may mutate the
    /// scene before it is rendered.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> FrameControl + 'static;
}
