#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Waypoint Defence.
//!
//! The [`World`] owns every piece of mutable session state: gold, lives, the
//! wave counter and phase, the placement grid and the tower, enemy and
//! projectile collections. It changes only through [`apply`].

use std::time::Duration;

use glam::Vec2;
use tracing::{debug, info};
use waypoint_defence_core::{
    CellCoord, Command, ConfigError, EnemyId, Event, GameConfig, Health, PlacementError, TowerId,
    TowerKind, WaveConfig, WavePhase, WorldPoint, WELCOME_BANNER,
};

mod enemies;
mod path;
mod placement;
mod projectiles;
mod towers;

pub use path::{build_path, Path};

use enemies::{EnemyArena, EnemyState, Stride};
use placement::PlacementGrid;
use projectiles::ProjectileRegistry;
use towers::TowerRegistry;

/// Represents the authoritative Waypoint Defence world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    config: GameConfig,
    path: Path,
    placement: PlacementGrid,
    towers: TowerRegistry,
    enemies: EnemyArena,
    projectiles: ProjectileRegistry,
    gold: u32,
    lives: u32,
    wave: u32,
    phase: WavePhase,
    remaining_to_spawn: u32,
    current_wave: Option<WaveConfig>,
    tick_index: u64,
}

impl World {
    /// Creates a world using the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::build(GameConfig::default())
    }

    /// Creates a world from a validated configuration.
    pub fn from_config(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: GameConfig) -> Self {
        let path = Path::from_waypoints(&config.waypoints);
        let placement = PlacementGrid::new(config.grid, &path);
        Self {
            banner: WELCOME_BANNER,
            path,
            placement,
            towers: TowerRegistry::new(),
            enemies: EnemyArena::new(),
            projectiles: ProjectileRegistry::new(),
            gold: config.starting_gold,
            lives: config.starting_lives,
            wave: 1,
            phase: WavePhase::Idle,
            remaining_to_spawn: 0,
            current_wave: None,
            tick_index: 0,
            config,
        }
    }

    fn placement_verdict(&self, cell: CellCoord, kind: TowerKind) -> Result<(), PlacementError> {
        if self.phase != WavePhase::Idle {
            return Err(PlacementError::InvalidPhase);
        }
        self.placement.check(cell)?;

        let cost = self.config.towers.blueprint(kind).cost;
        if self.gold < cost {
            return Err(PlacementError::InsufficientGold {
                cost,
                available: self.gold,
            });
        }
        Ok(())
    }

    fn place_tower(&mut self, kind: TowerKind, cell: CellCoord, out_events: &mut Vec<Event>) {
        if let Err(reason) = self.placement_verdict(cell, kind) {
            debug!(?kind, ?cell, %reason, "tower placement rejected");
            out_events.push(Event::TowerPlacementRejected { kind, cell, reason });
            return;
        }

        let blueprint = *self.config.towers.blueprint(kind);
        self.gold -= blueprint.cost;
        let position = to_vec(self.config.grid.cell_center(cell));
        let tower = self.towers.insert(kind, cell, position, blueprint);
        self.placement.occupy(cell, tower);
        debug!(tower = tower.get(), ?kind, ?cell, gold = self.gold, "tower placed");
        out_events.push(Event::TowerPlaced {
            tower,
            kind,
            cell,
            cost: blueprint.cost,
        });
    }

    fn start_wave(&mut self, out_events: &mut Vec<Event>) {
        if self.phase != WavePhase::Idle {
            debug!(phase = ?self.phase, "start wave ignored");
            return;
        }
        let Some(config) = self.config.waves.config_for(self.wave).copied() else {
            return;
        };

        self.enemies.clear();
        self.projectiles.discard_all(out_events);
        self.current_wave = Some(config);
        self.remaining_to_spawn = self.config.waves.enemy_count(self.wave);
        self.phase = WavePhase::Spawning;

        info!(
            wave = self.wave,
            enemies = self.remaining_to_spawn,
            hit_points = config.hit_points,
            "wave started"
        );
        out_events.push(Event::WaveStarted {
            wave: self.wave,
            enemies: self.remaining_to_spawn,
        });
    }

    fn spawn_enemy(&mut self, out_events: &mut Vec<Event>) {
        if self.phase != WavePhase::Spawning || self.remaining_to_spawn == 0 {
            return;
        }
        let (Some(config), Some(cell)) = (self.current_wave, self.path.first()) else {
            return;
        };

        let enemy = self.enemies.insert(EnemyState {
            position: to_vec(self.config.grid.cell_center(cell)),
            health: Health::new(i32::try_from(config.hit_points).unwrap_or(i32::MAX)),
            max_health: config.hit_points,
            speed: config.speed,
            reward: config.reward,
            path_index: 0,
            color: config.color,
        });
        self.remaining_to_spawn -= 1;
        debug!(
            slot = enemy.slot(),
            generation = enemy.generation(),
            remaining = self.remaining_to_spawn,
            "enemy spawned"
        );
        out_events.push(Event::EnemySpawned { enemy, cell });
    }

    fn advance_enemies(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        if self.phase != WavePhase::Spawning {
            return;
        }
        let elapsed_ms = elapsed_millis(dt);

        for id in self.enemies.ids() {
            let Some(enemy) = self.enemies.get_mut(id) else {
                continue;
            };

            match enemy.advance(&self.path, &self.config.grid, elapsed_ms) {
                Stride::ReachedBase => {
                    let _ = self.enemies.remove(id);
                    if self.breach(id, out_events) {
                        break;
                    }
                }
                Stride::Walked => {
                    if enemy.health.is_depleted() {
                        let reward = enemy.reward;
                        let _ = self.enemies.remove(id);
                        self.gold = self.gold.saturating_add(reward);
                        debug!(slot = id.slot(), reward, gold = self.gold, "enemy defeated");
                        out_events.push(Event::EnemyDefeated { enemy: id, reward });
                    }
                }
            }
        }
    }

    /// Charges a life for an enemy that reached the base.
    ///
    /// Returns `true` when the breach ended the session.
    fn breach(&mut self, enemy: EnemyId, out_events: &mut Vec<Event>) -> bool {
        self.lives = self.lives.saturating_sub(1);
        debug!(slot = enemy.slot(), lives = self.lives, "base breached");
        out_events.push(Event::BaseBreached {
            enemy,
            lives_remaining: self.lives,
        });

        if self.lives > 0 {
            return false;
        }

        self.phase = WavePhase::GameOver;
        info!(wave = self.wave, "game over");
        out_events.push(Event::GameOver { wave: self.wave });
        true
    }

    fn fire_projectile(&mut self, tower: TowerId, target: EnemyId, out_events: &mut Vec<Event>) {
        if self.phase != WavePhase::Spawning || self.enemies.get(target).is_none() {
            return;
        }
        let Some(state) = self.towers.get_mut(tower) else {
            return;
        };
        if !state.cooldown.is_zero() {
            return;
        }

        state.cooldown = state.blueprint.fire_interval;
        let projectile =
            self.projectiles
                .launch(state.position, target, &state.blueprint, self.tick_index);
        out_events.push(Event::ProjectileFired {
            projectile,
            tower,
            target,
        });
    }

    fn clear_wave(&mut self, out_events: &mut Vec<Event>) {
        if self.phase != WavePhase::Spawning
            || !self.enemies.is_empty()
            || self.remaining_to_spawn != 0
        {
            return;
        }

        let cleared = self.wave;
        let bonus = self.config.waves.clear_bonus;
        self.gold = self.gold.saturating_add(bonus);
        self.wave = self.wave.saturating_add(1);
        self.phase = WavePhase::Idle;
        info!(wave = cleared, bonus, gold = self.gold, "wave cleared");
        out_events.push(Event::WaveCleared {
            wave: cleared,
            bonus,
        });
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt } => {
            world.tick_index = world.tick_index.saturating_add(1);
            out_events.push(Event::TimeAdvanced { dt });
        }
        Command::PlaceTower { kind, cell } => world.place_tower(kind, cell, out_events),
        Command::StartWave => world.start_wave(out_events),
        Command::SpawnEnemy => world.spawn_enemy(out_events),
        Command::AdvanceEnemies { dt } => world.advance_enemies(dt, out_events),
        Command::CoolTowers { dt } => {
            if world.phase == WavePhase::Spawning {
                world.towers.cool_down(dt);
            }
        }
        Command::FireProjectile { tower, target } => {
            world.fire_projectile(tower, target, out_events);
        }
        Command::AdvanceProjectiles { dt } => {
            let tile_length = world.config.grid.tile_length();
            world.projectiles.resolve(
                world.tick_index,
                &mut world.enemies,
                tile_length,
                elapsed_millis(dt),
                out_events,
            );
        }
        Command::ClearWave => world.clear_wave(out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use waypoint_defence_core::{
        CellCoord, EnemyView, GameConfig, PlacementError, ProjectileView, TileGrid, TowerId,
        TowerKind, TowerView, WaveConfig, WavePhase,
    };

    use super::{Path, World};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Configuration the world was built from.
    #[must_use]
    pub fn config(world: &World) -> &GameConfig {
        &world.config
    }

    /// Provides read-only access to the grid bounds and cell size.
    #[must_use]
    pub fn tile_grid(world: &World) -> &TileGrid {
        &world.config.grid
    }

    /// Dense route the enemies walk.
    #[must_use]
    pub fn path(world: &World) -> &Path {
        &world.path
    }

    /// Gold available to the player.
    #[must_use]
    pub fn gold(world: &World) -> u32 {
        world.gold
    }

    /// Lives left before the session ends.
    #[must_use]
    pub fn lives(world: &World) -> u32 {
        world.lives
    }

    /// Number of the current (or next) wave.
    #[must_use]
    pub fn wave(world: &World) -> u32 {
        world.wave
    }

    /// Current phase of the wave state machine.
    #[must_use]
    pub fn phase(world: &World) -> WavePhase {
        world.phase
    }

    /// Enemies of the active wave that have not entered the path yet.
    #[must_use]
    pub fn remaining_to_spawn(world: &World) -> u32 {
        world.remaining_to_spawn
    }

    /// Enemy stats of the most recently started wave.
    #[must_use]
    pub fn current_wave(world: &World) -> Option<&WaveConfig> {
        world.current_wave.as_ref()
    }

    /// Number of ticks processed so far.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Number of live enemies.
    #[must_use]
    pub fn enemy_count(world: &World) -> usize {
        world.enemies.len()
    }

    /// Captures a read-only view of the placed towers.
    #[must_use]
    pub fn tower_view(world: &World) -> TowerView {
        TowerView::from_snapshots(world.towers.iter().map(|tower| tower.snapshot()).collect())
    }

    /// Captures a read-only view of the live enemies in spawn order.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        EnemyView::from_snapshots(world.enemies.snapshots())
    }

    /// Captures a read-only view of the in-flight projectiles.
    #[must_use]
    pub fn projectile_view(world: &World) -> ProjectileView {
        ProjectileView::from_snapshots(world.projectiles.snapshots())
    }

    /// Explains why a tower could not be placed at the cell right now, if anything.
    pub fn placement_verdict(
        world: &World,
        cell: CellCoord,
        kind: TowerKind,
    ) -> Result<(), PlacementError> {
        world.placement_verdict(cell, kind)
    }

    /// Reports whether a tower of the provided kind may be placed at the cell right now.
    #[must_use]
    pub fn can_place(world: &World, cell: CellCoord, kind: TowerKind) -> bool {
        world.placement_verdict(cell, kind).is_ok()
    }

    /// Tower occupying the cell, if any.
    #[must_use]
    pub fn tower_at(world: &World, cell: CellCoord) -> Option<TowerId> {
        world.placement.tower_at(cell)
    }
}

pub(crate) fn to_vec(point: WorldPoint) -> Vec2 {
    Vec2::new(point.x, point.y)
}

fn elapsed_millis(dt: Duration) -> f32 {
    dt.as_secs_f32() * 1_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use waypoint_defence_core::{ProjectileId, TileGrid, TowerCatalog, WaveSchedule};

    fn tiny_config() -> GameConfig {
        GameConfig {
            grid: TileGrid::new(6, 4, 64.0),
            starting_gold: 100,
            starting_lives: 2,
            waypoints: vec![CellCoord::new(0, 1), CellCoord::new(5, 1)],
            towers: TowerCatalog::default(),
            waves: WaveSchedule {
                base_enemy_count: 1,
                enemies_per_wave: 0,
                ..WaveSchedule::default()
            },
        }
    }

    fn world() -> World {
        World::from_config(tiny_config()).expect("valid config")
    }

    fn run(world: &mut World, commands: &[Command]) -> Vec<Event> {
        let mut events = Vec::new();
        for command in commands {
            apply(world, command.clone(), &mut events);
        }
        events
    }

    fn spawned(events: &[Event]) -> EnemyId {
        events
            .iter()
            .find_map(|event| match event {
                Event::EnemySpawned { enemy, .. } => Some(*enemy),
                _ => None,
            })
            .expect("enemy spawned")
    }

    #[test]
    fn placement_debits_gold_once() {
        let mut world = world();
        let cell = CellCoord::new(2, 2);
        let events = run(
            &mut world,
            &[
                Command::PlaceTower {
                    kind: TowerKind::Basic,
                    cell,
                },
                Command::PlaceTower {
                    kind: TowerKind::Basic,
                    cell,
                },
            ],
        );

        assert_eq!(query::gold(&world), 50);
        assert_eq!(query::tower_at(&world, cell), Some(TowerId::new(0)));
        assert!(matches!(
            events.as_slice(),
            [
                Event::TowerPlaced { cost: 50, .. },
                Event::TowerPlacementRejected {
                    reason: PlacementError::Occupied,
                    ..
                }
            ]
        ));
    }

    #[test]
    fn placement_reports_missing_gold() {
        let mut world = world();
        let _ = run(
            &mut world,
            &[Command::PlaceTower {
                kind: TowerKind::Sniper,
                cell: CellCoord::new(0, 0),
            }],
        );
        assert_eq!(
            query::placement_verdict(&world, CellCoord::new(1, 0), TowerKind::Sniper),
            Err(PlacementError::InsufficientGold {
                cost: 90,
                available: 10
            })
        );
        assert!(!query::can_place(&world, CellCoord::new(1, 0), TowerKind::Basic));
    }

    #[test]
    fn placement_is_locked_during_a_wave() {
        let mut world = world();
        let _ = run(&mut world, &[Command::StartWave]);
        assert_eq!(
            query::placement_verdict(&world, CellCoord::new(2, 2), TowerKind::Basic),
            Err(PlacementError::InvalidPhase)
        );
    }

    #[test]
    fn start_wave_selects_config_and_count() {
        let mut world = world();
        let events = run(&mut world, &[Command::StartWave, Command::StartWave]);

        assert_eq!(events, vec![Event::WaveStarted { wave: 1, enemies: 1 }]);
        assert_eq!(query::phase(&world), WavePhase::Spawning);
        assert_eq!(query::remaining_to_spawn(&world), 1);
        assert_eq!(query::current_wave(&world).map(|wave| wave.hit_points), Some(60));
    }

    #[test]
    fn spawn_enemy_only_while_enemies_remain() {
        let mut world = world();
        let events = run(
            &mut world,
            &[Command::StartWave, Command::SpawnEnemy, Command::SpawnEnemy],
        );

        let spawns = events
            .iter()
            .filter(|event| matches!(event, Event::EnemySpawned { .. }))
            .count();
        assert_eq!(spawns, 1);
        assert_eq!(query::remaining_to_spawn(&world), 0);

        let view = query::enemy_view(&world);
        let enemy = view.iter().next().expect("one enemy");
        assert_eq!(enemy.position, WorldPoint::new(32.0, 96.0));
        assert_eq!(enemy.health, Health::new(60));
    }

    #[test]
    fn enemies_breach_and_end_the_session() {
        let mut world = world();
        let dt = Duration::from_secs(1);
        let mut commands = vec![Command::StartWave, Command::SpawnEnemy];
        commands.extend(std::iter::repeat(Command::AdvanceEnemies { dt }).take(6));
        let events = run(&mut world, &commands);

        assert_eq!(query::lives(&world), 1);
        assert_eq!(query::enemy_count(&world), 0);
        assert!(events.iter().any(|event| matches!(
            event,
            Event::BaseBreached {
                lives_remaining: 1,
                ..
            }
        )));

        let _ = run(&mut world, &[Command::ClearWave, Command::StartWave]);
        let mut commands = vec![Command::SpawnEnemy];
        commands.extend(std::iter::repeat(Command::AdvanceEnemies { dt }).take(6));
        let events = run(&mut world, &commands);

        assert_eq!(query::lives(&world), 0);
        assert_eq!(query::phase(&world), WavePhase::GameOver);
        assert_eq!(events.last(), Some(&Event::GameOver { wave: 2 }));

        let events = run(&mut world, &[Command::StartWave, Command::ClearWave]);
        assert!(events.is_empty(), "game over is absorbing");
        assert_eq!(query::phase(&world), WavePhase::GameOver);
    }

    #[test]
    fn wave_clears_only_when_nothing_is_left() {
        let mut world = world();
        let events = run(&mut world, &[Command::StartWave, Command::ClearWave]);
        assert_eq!(events.len(), 1, "an enemy is still waiting to spawn");

        let events = run(&mut world, &[Command::SpawnEnemy, Command::ClearWave]);
        assert!(!events
            .iter()
            .any(|event| matches!(event, Event::WaveCleared { .. })));

        let enemy = spawned(&events);
        world.enemies.get_mut(enemy).expect("alive").health = Health::new(0);
        let events = run(
            &mut world,
            &[
                Command::AdvanceEnemies {
                    dt: Duration::from_millis(16),
                },
                Command::ClearWave,
            ],
        );

        assert_eq!(
            events,
            vec![
                Event::EnemyDefeated { enemy, reward: 10 },
                Event::WaveCleared { wave: 1, bonus: 35 },
            ]
        );
        assert_eq!(query::gold(&world), 145);
        assert_eq!(query::wave(&world), 2);
        assert_eq!(query::phase(&world), WavePhase::Idle);
    }

    #[test]
    fn overkill_leaves_negative_health_until_the_next_motion_pass() {
        let mut config = tiny_config();
        config.waves.waves[0].hit_points = 12;
        let mut world = World::from_config(config).expect("valid config");
        let dt = Duration::from_millis(16);

        let events = run(
            &mut world,
            &[
                Command::PlaceTower {
                    kind: TowerKind::Sniper,
                    cell: CellCoord::new(1, 2),
                },
                Command::StartWave,
                Command::Tick { dt },
                Command::SpawnEnemy,
            ],
        );
        let enemy = spawned(&events);
        let tower = TowerId::new(0);

        let events = run(
            &mut world,
            &[
                Command::FireProjectile {
                    tower,
                    target: enemy,
                },
                Command::AdvanceProjectiles { dt },
            ],
        );
        assert!(
            !events
                .iter()
                .any(|event| matches!(event, Event::ProjectileHit { .. })),
            "projectiles fired this tick resolve next tick"
        );

        let events = run(&mut world, &[Command::Tick { dt }, Command::AdvanceProjectiles { dt }]);
        assert!(events.iter().any(|event| matches!(
            event,
            Event::ProjectileHit { damage: 25, .. }
        )));
        let view = query::enemy_view(&world);
        assert_eq!(view.get(enemy).map(|snapshot| snapshot.health), Some(Health::new(-13)));

        let gold_before = query::gold(&world);
        let events = run(&mut world, &[Command::AdvanceEnemies { dt }]);
        assert_eq!(events, vec![Event::EnemyDefeated { enemy, reward: 10 }]);
        assert_eq!(query::gold(&world), gold_before + 10);
        assert_eq!(query::enemy_count(&world), 0);
    }

    #[test]
    fn fire_requires_a_ready_tower_and_a_live_target() {
        let mut world = world();
        let dt = Duration::from_millis(16);
        let events = run(
            &mut world,
            &[
                Command::PlaceTower {
                    kind: TowerKind::Basic,
                    cell: CellCoord::new(1, 2),
                },
                Command::StartWave,
                Command::Tick { dt },
                Command::SpawnEnemy,
            ],
        );
        let enemy = spawned(&events);
        let fire = Command::FireProjectile {
            tower: TowerId::new(0),
            target: enemy,
        };

        let events = run(&mut world, &[fire.clone(), fire.clone()]);
        assert_eq!(events.len(), 1, "second shot waits for the cooldown");
        let tower = query::tower_view(&world);
        assert_eq!(
            tower.get(TowerId::new(0)).map(|tower| tower.cooldown),
            Some(Duration::from_millis(700))
        );

        let _ = run(&mut world, &[Command::CoolTowers { dt: Duration::from_secs(1) }]);
        let _ = world.enemies.remove(enemy);
        let events = run(&mut world, &[fire]);
        assert!(events.is_empty(), "stale target handles are refused");
    }

    #[test]
    fn starting_a_wave_discards_leftover_projectiles() {
        let mut world = world();
        let dt = Duration::from_millis(16);
        let events = run(
            &mut world,
            &[
                Command::PlaceTower {
                    kind: TowerKind::Basic,
                    cell: CellCoord::new(1, 2),
                },
                Command::StartWave,
                Command::Tick { dt },
                Command::SpawnEnemy,
            ],
        );
        let enemy = spawned(&events);
        let _ = run(
            &mut world,
            &[Command::FireProjectile {
                tower: TowerId::new(0),
                target: enemy,
            }],
        );
        let _ = world.enemies.remove(enemy);
        let events = run(&mut world, &[Command::ClearWave, Command::StartWave]);

        assert!(matches!(
            events.as_slice(),
            [
                Event::WaveCleared { .. },
                Event::ProjectileExpired { .. },
                Event::WaveStarted { wave: 2, .. }
            ]
        ));
        assert!(query::projectile_view(&world).is_empty());
    }

    #[test]
    fn invalid_configs_are_rejected() {
        let config = GameConfig {
            waypoints: Vec::new(),
            ..tiny_config()
        };
        assert!(matches!(
            World::from_config(config),
            Err(ConfigError::MissingWaypoints)
        ));
    }

    #[test]
    fn projectiles_keep_resolving_after_the_wave_clears() {
        let mut config = tiny_config();
        config.waves.waves[0].hit_points = 12;
        let mut world = World::from_config(config).expect("valid config");
        let dt = Duration::from_millis(1);
        let long = Duration::from_secs(1);
        let (first, second) = (TowerId::new(0), TowerId::new(1));

        let events = run(
            &mut world,
            &[
                Command::PlaceTower {
                    kind: TowerKind::Basic,
                    cell: CellCoord::new(2, 2),
                },
                Command::PlaceTower {
                    kind: TowerKind::Basic,
                    cell: CellCoord::new(3, 2),
                },
                Command::StartWave,
                Command::Tick { dt },
                Command::SpawnEnemy,
            ],
        );
        let enemy = spawned(&events);
        let _ = run(
            &mut world,
            &[Command::FireProjectile {
                tower: first,
                target: enemy,
            }],
        );

        let events = run(
            &mut world,
            &[
                Command::Tick { dt: long },
                Command::AdvanceProjectiles { dt: long },
                Command::FireProjectile {
                    tower: second,
                    target: enemy,
                },
                Command::AdvanceEnemies { dt },
                Command::ClearWave,
            ],
        );
        assert!(events.contains(&Event::ProjectileHit {
            projectile: ProjectileId::new(0),
            target: enemy,
            damage: 12,
        }));
        assert!(events.contains(&Event::EnemyDefeated { enemy, reward: 10 }));
        assert!(events
            .iter()
            .any(|event| matches!(event, Event::WaveCleared { wave: 1, .. })));
        assert_eq!(query::phase(&world), WavePhase::Idle);
        assert_eq!(query::projectile_view(&world).len(), 1, "second shot still in flight");

        let events = run(
            &mut world,
            &[Command::Tick { dt }, Command::AdvanceProjectiles { dt }],
        );
        assert_eq!(
            events,
            vec![
                Event::TimeAdvanced { dt },
                Event::ProjectileExpired {
                    projectile: ProjectileId::new(1),
                },
            ]
        );
        assert!(query::projectile_view(&world).is_empty());
    }
}
