//! In-flight projectiles and their homing resolution.

use glam::Vec2;
use tracing::debug;
use waypoint_defence_core::{
    EnemyId, Event, ProjectileId, ProjectileSnapshot, Rgb, TowerBlueprint, WorldPoint,
};

use crate::enemies::EnemyArena;

#[derive(Clone, Debug)]
struct ProjectileState {
    id: ProjectileId,
    position: Vec2,
    target: EnemyId,
    /// Tiles per millisecond.
    speed: f32,
    damage: u32,
    radius: f32,
    color: Rgb,
    fired_on_tick: u64,
}

/// Registry of in-flight projectiles kept in firing order.
#[derive(Debug)]
pub(crate) struct ProjectileRegistry {
    entries: Vec<ProjectileState>,
    next_projectile_id: ProjectileId,
}

impl ProjectileRegistry {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_projectile_id: ProjectileId::new(0),
        }
    }

    /// Launches a projectile from `origin` carrying the blueprint's payload.
    pub(crate) fn launch(
        &mut self,
        origin: Vec2,
        target: EnemyId,
        blueprint: &TowerBlueprint,
        tick: u64,
    ) -> ProjectileId {
        let id = self.next_projectile_id;
        self.next_projectile_id = ProjectileId::new(id.get().wrapping_add(1));
        self.entries.push(ProjectileState {
            id,
            position: origin,
            target,
            speed: blueprint.projectile_speed,
            damage: blueprint.damage,
            radius: blueprint.projectile_radius,
            color: blueprint.color,
            fired_on_tick: tick,
        });
        id
    }

    /// Moves every projectile launched before `tick` toward its target.
    ///
    /// A projectile whose target no longer resolves is discarded without
    /// damage. One that can cover the remaining distance this tick applies
    /// its damage and is discarded. Projectiles launched during `tick` wait
    /// for the next one.
    pub(crate) fn resolve(
        &mut self,
        tick: u64,
        enemies: &mut EnemyArena,
        tile_length: f32,
        elapsed_ms: f32,
        out_events: &mut Vec<Event>,
    ) {
        self.entries.retain_mut(|projectile| {
            if projectile.fired_on_tick == tick {
                return true;
            }

            let Some(enemy) = enemies.get_mut(projectile.target) else {
                debug!(projectile = projectile.id.get(), "projectile lost its target");
                out_events.push(Event::ProjectileExpired {
                    projectile: projectile.id,
                });
                return false;
            };

            let offset = enemy.position - projectile.position;
            let distance = offset.length();
            let step = (projectile.speed * elapsed_ms * tile_length).max(0.0);

            if distance <= step {
                enemy.health = enemy.health.damaged(projectile.damage);
                out_events.push(Event::ProjectileHit {
                    projectile: projectile.id,
                    target: projectile.target,
                    damage: projectile.damage,
                });
                return false;
            }

            projectile.position += offset / distance * step;
            true
        });
    }

    /// Removes every projectile, reporting each one as expired.
    pub(crate) fn discard_all(&mut self, out_events: &mut Vec<Event>) {
        out_events.extend(
            self.entries
                .drain(..)
                .map(|projectile| Event::ProjectileExpired {
                    projectile: projectile.id,
                }),
        );
    }

    pub(crate) fn snapshots(&self) -> Vec<ProjectileSnapshot> {
        self.entries
            .iter()
            .map(|projectile| ProjectileSnapshot {
                id: projectile.id,
                position: WorldPoint::new(projectile.position.x, projectile.position.y),
                target: projectile.target,
                radius: projectile.radius,
                color: projectile.color,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enemies::EnemyState;
    use waypoint_defence_core::{Health, TowerCatalog, TowerKind};

    fn arena_with_enemy(position: Vec2, health: i32) -> (EnemyArena, EnemyId) {
        let mut arena = EnemyArena::new();
        let id = arena.insert(EnemyState {
            position,
            health: Health::new(health),
            max_health: 60,
            speed: 0.045,
            reward: 10,
            path_index: 0,
            color: Rgb::from_rgb(0, 0, 0),
        });
        (arena, id)
    }

    #[test]
    fn projectiles_wait_one_tick_before_flying() {
        let (mut arena, target) = arena_with_enemy(Vec2::new(10.0, 0.0), 60);
        let mut registry = ProjectileRegistry::new();
        let blueprint = *TowerCatalog::default().blueprint(TowerKind::Basic);
        let _ = registry.launch(Vec2::ZERO, target, &blueprint, 3);

        let mut events = Vec::new();
        registry.resolve(3, &mut arena, 64.0, 16.0, &mut events);
        assert!(events.is_empty());
        assert_eq!(registry.snapshots().len(), 1);

        registry.resolve(4, &mut arena, 64.0, 16.0, &mut events);
        assert!(matches!(events.as_slice(), [Event::ProjectileHit { damage: 12, .. }]));
        assert_eq!(arena.get(target).map(|enemy| enemy.health), Some(Health::new(48)));
        assert!(registry.snapshots().is_empty());
    }

    #[test]
    fn projectiles_home_onto_the_current_position() {
        let (mut arena, target) = arena_with_enemy(Vec2::new(1_000.0, 0.0), 60);
        let mut registry = ProjectileRegistry::new();
        let blueprint = *TowerCatalog::default().blueprint(TowerKind::Basic);
        let _ = registry.launch(Vec2::ZERO, target, &blueprint, 0);

        let mut events = Vec::new();
        registry.resolve(1, &mut arena, 64.0, 1.0, &mut events);
        let first = registry.snapshots()[0].position;
        assert!((first.x - 32.0).abs() < 1e-4);
        assert_eq!(first.y, 0.0);

        arena.get_mut(target).expect("enemy alive").position = Vec2::new(32.0, 1_000.0);
        registry.resolve(2, &mut arena, 64.0, 1.0, &mut events);
        let second = registry.snapshots()[0].position;
        assert!((second.x - 32.0).abs() < 1e-4);
        assert!((second.y - 32.0).abs() < 1e-4);
        assert!(events.is_empty());
    }

    #[test]
    fn vanished_targets_discard_without_damage() {
        let (mut arena, target) = arena_with_enemy(Vec2::new(10.0, 0.0), 60);
        let mut registry = ProjectileRegistry::new();
        let blueprint = *TowerCatalog::default().blueprint(TowerKind::Sniper);
        let projectile = registry.launch(Vec2::ZERO, target, &blueprint, 0);
        let _ = arena.remove(target);

        let mut events = Vec::new();
        registry.resolve(1, &mut arena, 64.0, 16.0, &mut events);
        assert_eq!(events, vec![Event::ProjectileExpired { projectile }]);
        assert!(registry.snapshots().is_empty());
    }

    #[test]
    fn discard_all_reports_every_projectile() {
        let (_, target) = arena_with_enemy(Vec2::ZERO, 60);
        let mut registry = ProjectileRegistry::new();
        let blueprint = *TowerCatalog::default().blueprint(TowerKind::Burst);
        let first = registry.launch(Vec2::ZERO, target, &blueprint, 0);
        let second = registry.launch(Vec2::ZERO, target, &blueprint, 0);

        let mut events = Vec::new();
        registry.discard_all(&mut events);
        assert_eq!(
            events,
            vec![
                Event::ProjectileExpired { projectile: first },
                Event::ProjectileExpired { projectile: second },
            ]
        );
    }
}
