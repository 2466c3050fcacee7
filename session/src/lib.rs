#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Session driver that owns one world and runs the simulation systems in a
//! fixed order every tick.
//!
//! A tick performs, in order: the spawn check, enemy motion and death, tower
//! targeting and firing, projectile resolution, and the wave clear check.
//! Presentation code places towers and starts waves between ticks; the events
//! those requests produce are delivered with the next tick's events.

use std::time::Duration;

use tracing::trace;
use waypoint_defence_core::{
    CellCoord, Command, ConfigError, EnemyView, Event, GameConfig, PlacementError, ProjectileView,
    TileGrid, TowerId, TowerKind, TowerTarget, TowerView, WavePhase,
};
use waypoint_defence_system_tower_combat::TowerCombat;
use waypoint_defence_system_tower_targeting::TowerTargeting;
use waypoint_defence_system_wave_director::{self as wave_director, WaveDirector};
use waypoint_defence_world::{self as world, query, Path, World};

/// A single running game: the world plus the systems that advance it.
#[derive(Debug)]
pub struct Session {
    world: World,
    director: WaveDirector,
    targeting: TowerTargeting,
    combat: TowerCombat,
    targets: Vec<TowerTarget>,
    pending_events: Vec<Event>,
    tick_events: Vec<Event>,
}

impl Session {
    /// Creates a session using the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_world(World::new())
    }

    /// Creates a session from a validated configuration.
    pub fn from_config(config: GameConfig) -> Result<Self, ConfigError> {
        World::from_config(config).map(Self::with_world)
    }

    fn with_world(world: World) -> Self {
        let spawn_interval = query::config(&world).waves.spawn_interval;
        Self {
            world,
            director: WaveDirector::new(wave_director::Config::new(spawn_interval)),
            targeting: TowerTargeting::new(),
            combat: TowerCombat::new(),
            targets: Vec::new(),
            pending_events: Vec::new(),
            tick_events: Vec::new(),
        }
    }

    /// Advances the simulation by `dt` and returns every event it produced.
    ///
    /// Events from placements and wave starts requested since the previous
    /// tick lead the returned slice. A zero `dt` changes nothing.
    pub fn update(&mut self, dt: Duration) -> &[Event] {
        self.tick_events.clear();
        if dt.is_zero() {
            return &self.tick_events;
        }

        let mut events = std::mem::take(&mut self.pending_events);
        let mut commands = Vec::new();

        world::apply(&mut self.world, Command::Tick { dt }, &mut events);

        self.director.handle(
            &events,
            query::phase(&self.world),
            query::remaining_to_spawn(&self.world),
            &mut commands,
        );
        self.flush(&mut commands, &mut events);

        world::apply(&mut self.world, Command::AdvanceEnemies { dt }, &mut events);

        let towers = query::tower_view(&self.world);
        world::apply(&mut self.world, Command::CoolTowers { dt }, &mut events);
        self.targeting.handle(
            query::phase(&self.world),
            &towers,
            &query::enemy_view(&self.world),
            &mut self.targets,
        );
        self.combat.handle(
            query::phase(&self.world),
            &towers,
            &self.targets,
            &mut commands,
        );
        self.flush(&mut commands, &mut events);

        world::apply(
            &mut self.world,
            Command::AdvanceProjectiles { dt },
            &mut events,
        );

        self.director.check_clear(
            query::phase(&self.world),
            query::remaining_to_spawn(&self.world),
            query::enemy_count(&self.world),
            &mut commands,
        );
        self.flush(&mut commands, &mut events);

        trace!(
            tick = query::tick_index(&self.world),
            events = events.len(),
            "tick processed"
        );
        self.tick_events = events;
        &self.tick_events
    }

    fn flush(&mut self, commands: &mut Vec<Command>, events: &mut Vec<Event>) {
        for command in commands.drain(..) {
            world::apply(&mut self.world, command, events);
        }
    }

    /// Attempts to build a tower of `kind` on `cell`.
    pub fn try_place_tower(
        &mut self,
        cell: CellCoord,
        kind: TowerKind,
    ) -> Result<TowerId, PlacementError> {
        let mut events = Vec::new();
        world::apply(&mut self.world, Command::PlaceTower { kind, cell }, &mut events);

        let outcome = events.iter().find_map(|event| match event {
            Event::TowerPlaced { tower, .. } => Some(Ok(*tower)),
            Event::TowerPlacementRejected { reason, .. } => Some(Err(*reason)),
            _ => None,
        });
        self.pending_events.extend(events);
        outcome.unwrap_or(Err(PlacementError::InvalidPhase))
    }

    /// Starts the next wave. Returns `false` when a wave is already running or
    /// the session is over.
    pub fn start_wave(&mut self) -> bool {
        let mut events = Vec::new();
        world::apply(&mut self.world, Command::StartWave, &mut events);

        let started = events
            .iter()
            .any(|event| matches!(event, Event::WaveStarted { .. }));
        self.pending_events.extend(events);
        started
    }

    /// Read-only access to the underlying world for queries not mirrored here.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Welcome banner shown when the session starts.
    #[must_use]
    pub fn welcome_banner(&self) -> &'static str {
        query::welcome_banner(&self.world)
    }

    /// Gold available to the player.
    #[must_use]
    pub fn gold(&self) -> u32 {
        query::gold(&self.world)
    }

    /// Lives left before the session ends.
    #[must_use]
    pub fn lives(&self) -> u32 {
        query::lives(&self.world)
    }

    /// Number of the current (or next) wave.
    #[must_use]
    pub fn wave(&self) -> u32 {
        query::wave(&self.world)
    }

    /// Current phase of the wave state machine.
    #[must_use]
    pub fn phase(&self) -> WavePhase {
        query::phase(&self.world)
    }

    /// Reports whether a wave is in progress.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.phase().is_playing()
    }

    /// Enemies of the active wave still waiting to enter the path.
    #[must_use]
    pub fn remaining_to_spawn(&self) -> u32 {
        query::remaining_to_spawn(&self.world)
    }

    /// Grid bounds and cell size.
    #[must_use]
    pub fn tile_grid(&self) -> &TileGrid {
        query::tile_grid(&self.world)
    }

    /// Route the enemies walk; the last cell is the base.
    #[must_use]
    pub fn path(&self) -> &Path {
        query::path(&self.world)
    }

    /// Configuration the session was built from.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        query::config(&self.world)
    }

    /// Snapshot of the placed towers.
    #[must_use]
    pub fn tower_view(&self) -> TowerView {
        query::tower_view(&self.world)
    }

    /// Snapshot of the live enemies in spawn order.
    #[must_use]
    pub fn enemy_view(&self) -> EnemyView {
        query::enemy_view(&self.world)
    }

    /// Snapshot of the in-flight projectiles.
    #[must_use]
    pub fn projectile_view(&self) -> ProjectileView {
        query::projectile_view(&self.world)
    }

    /// Reports whether a tower of `kind` could be built on `cell` right now.
    #[must_use]
    pub fn can_place(&self, cell: CellCoord, kind: TowerKind) -> bool {
        query::can_place(&self.world, cell, kind)
    }

    /// Tower occupying `cell`, if any.
    #[must_use]
    pub fn tower_at(&self, cell: CellCoord) -> Option<TowerId> {
        query::tower_at(&self.world, cell)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_between_ticks_are_reported_with_the_next_tick() {
        let mut session = Session::new();
        assert_eq!(
            session.try_place_tower(CellCoord::new(1, 2), TowerKind::Basic),
            Ok(TowerId::new(0))
        );
        assert!(session.start_wave());

        let events = session.update(Duration::from_millis(16)).to_vec();
        assert!(matches!(
            events.as_slice(),
            [
                Event::TowerPlaced { .. },
                Event::WaveStarted { wave: 1, enemies: 7 },
                Event::TimeAdvanced { .. },
            ]
        ));
        assert_eq!(session.update(Duration::from_millis(16)).len(), 1);
    }

    #[test]
    fn zero_dt_does_not_flush_pending_events() {
        let mut session = Session::new();
        assert!(session.start_wave());
        assert!(session.update(Duration::ZERO).is_empty());

        let events = session.update(Duration::from_millis(1));
        assert!(matches!(events.first(), Some(Event::WaveStarted { .. })));
    }

    #[test]
    fn first_enemy_enters_after_one_spawn_interval() {
        let mut session = Session::new();
        assert!(session.start_wave());

        for _ in 0..8 {
            let _ = session.update(Duration::from_millis(100));
        }
        assert!(session.enemy_view().is_empty());

        let events = session.update(Duration::from_millis(100)).to_vec();
        assert!(events
            .iter()
            .any(|event| matches!(event, Event::EnemySpawned { .. })));
        assert_eq!(session.remaining_to_spawn(), 6);
    }

    #[test]
    fn start_wave_is_refused_while_playing() {
        let mut session = Session::new();
        assert!(session.start_wave());
        assert!(session.is_playing());
        assert!(!session.start_wave());
    }
}
