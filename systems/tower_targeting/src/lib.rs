#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that computes deterministic tower targets from world snapshots.

use waypoint_defence_core::{
    EnemyId, EnemyView, TowerId, TowerTarget, TowerView, WavePhase, WorldPoint,
};

/// Tower targeting system that reuses scratch buffers to avoid repeated allocations.
#[derive(Debug, Default)]
pub struct TowerTargeting {
    tower_workspace: Vec<TowerWorkspace>,
    enemy_workspace: Vec<EnemyCandidate>,
}

impl TowerTargeting {
    /// Creates a new tower targeting system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes targets for every ready tower in the provided snapshot.
    ///
    /// The output buffer is cleared before populating it with the latest
    /// assignments. Each ready tower selects the nearest enemy whose distance
    /// does not exceed its range; on equal distance the enemy spawned first
    /// wins.
    pub fn handle(
        &mut self,
        phase: WavePhase,
        towers: &TowerView,
        enemies: &EnemyView,
        out: &mut Vec<TowerTarget>,
    ) {
        out.clear();

        if phase != WavePhase::Spawning {
            return;
        }

        if towers.is_empty() || enemies.is_empty() {
            return;
        }

        self.prepare_tower_workspace(towers);
        if self.tower_workspace.is_empty() {
            return;
        }

        self.prepare_enemy_workspace(enemies);

        for tower in &self.tower_workspace {
            let mut best: Option<BestCandidate> = None;

            for candidate in &self.enemy_workspace {
                let distance = tower.position.distance(candidate.position);
                if distance > tower.range {
                    continue;
                }

                let current = BestCandidate {
                    distance,
                    enemy: candidate.id,
                };

                match &mut best {
                    Some(existing) => {
                        if current.distance < existing.distance {
                            *existing = current;
                        }
                    }
                    None => best = Some(current),
                }
            }

            if let Some(best_candidate) = best {
                out.push(TowerTarget {
                    tower: tower.id,
                    enemy: best_candidate.enemy,
                    distance: best_candidate.distance,
                });
            }
        }
    }

    fn prepare_tower_workspace(&mut self, towers: &TowerView) {
        self.tower_workspace.clear();
        self.tower_workspace.reserve(towers.len());

        for snapshot in towers.iter().filter(|tower| tower.is_ready()) {
            self.tower_workspace.push(TowerWorkspace {
                id: snapshot.id,
                position: snapshot.position,
                range: snapshot.range,
            });
        }
    }

    fn prepare_enemy_workspace(&mut self, enemies: &EnemyView) {
        self.enemy_workspace.clear();
        self.enemy_workspace.reserve(enemies.len());

        for snapshot in enemies.iter() {
            self.enemy_workspace.push(EnemyCandidate {
                id: snapshot.id,
                position: snapshot.position,
            });
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct TowerWorkspace {
    id: TowerId,
    position: WorldPoint,
    range: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct EnemyCandidate {
    id: EnemyId,
    position: WorldPoint,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct BestCandidate {
    distance: f32,
    enemy: EnemyId,
}

#[cfg(test)]
mod tests {
    use super::{TowerTarget, TowerTargeting};
    use std::time::Duration;
    use waypoint_defence_core::{
        CellCoord, EnemyId, EnemySnapshot, EnemyView, Health, Rgb, TowerId, TowerKind,
        TowerSnapshot, TowerView, WavePhase, WorldPoint,
    };

    fn tower_snapshot(id: u32, position: (f32, f32), range: f32) -> TowerSnapshot {
        TowerSnapshot {
            id: TowerId::new(id),
            kind: TowerKind::Basic,
            cell: CellCoord::new(0, 0),
            position: WorldPoint::new(position.0, position.1),
            range,
            cooldown: Duration::ZERO,
            color: Rgb::from_rgb(0x48, 0xa7, 0xff),
        }
    }

    fn enemy_snapshot(slot: u32, position: (f32, f32)) -> EnemySnapshot {
        EnemySnapshot {
            id: EnemyId::new(slot, 0),
            position: WorldPoint::new(position.0, position.1),
            health: Health::new(60),
            max_health: 60,
            speed: 0.045,
            reward: 10,
            path_index: 0,
            color: Rgb::from_rgb(0x6e, 0xf7, 0xb1),
        }
    }

    fn run(towers: Vec<TowerSnapshot>, enemies: Vec<EnemySnapshot>) -> Vec<TowerTarget> {
        let mut system = TowerTargeting::new();
        let mut out = Vec::new();
        system.handle(
            WavePhase::Spawning,
            &TowerView::from_snapshots(towers),
            &EnemyView::from_snapshots(enemies),
            &mut out,
        );
        out
    }

    #[test]
    fn targets_nearest_enemy_within_range() {
        let out = run(
            vec![tower_snapshot(1, (0.0, 0.0), 150.0)],
            vec![enemy_snapshot(0, (100.0, 0.0)), enemy_snapshot(1, (0.0, 60.0))],
        );

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].tower, TowerId::new(1));
        assert_eq!(out[0].enemy, EnemyId::new(1, 0));
        assert_eq!(out[0].distance, 60.0);
    }

    #[test]
    fn range_boundary_is_inclusive() {
        let out = run(
            vec![tower_snapshot(1, (0.0, 0.0), 150.0)],
            vec![enemy_snapshot(0, (150.0, 0.0))],
        );
        assert_eq!(out.len(), 1);

        let out = run(
            vec![tower_snapshot(1, (0.0, 0.0), 150.0)],
            vec![enemy_snapshot(0, (150.5, 0.0))],
        );
        assert!(out.is_empty());
    }

    #[test]
    fn first_spawned_enemy_wins_ties() {
        let out = run(
            vec![tower_snapshot(1, (0.0, 0.0), 150.0)],
            vec![enemy_snapshot(7, (50.0, 0.0)), enemy_snapshot(2, (-50.0, 0.0))],
        );

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].enemy, EnemyId::new(7, 0), "spawn order, not slot order");
    }

    #[test]
    fn cooling_towers_do_not_target() {
        let mut cooling = tower_snapshot(1, (0.0, 0.0), 150.0);
        cooling.cooldown = Duration::from_millis(1);
        let out = run(
            vec![cooling, tower_snapshot(2, (0.0, 0.0), 150.0)],
            vec![enemy_snapshot(0, (10.0, 0.0))],
        );

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].tower, TowerId::new(2));
    }

    #[test]
    fn idle_phase_clears_output() {
        let mut system = TowerTargeting::new();
        let towers = TowerView::from_snapshots(vec![tower_snapshot(1, (0.0, 0.0), 150.0)]);
        let enemies = EnemyView::from_snapshots(vec![enemy_snapshot(0, (1.0, 1.0))]);

        let mut out = vec![TowerTarget {
            tower: TowerId::new(99),
            enemy: EnemyId::new(99, 0),
            distance: 0.0,
        }];

        system.handle(WavePhase::Idle, &towers, &enemies, &mut out);
        assert!(out.is_empty());

        system.handle(WavePhase::GameOver, &towers, &enemies, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn empty_collections_produce_no_targets() {
        assert!(run(Vec::new(), vec![enemy_snapshot(0, (1.0, 1.0))]).is_empty());
        assert!(run(vec![tower_snapshot(1, (0.0, 0.0), 150.0)], Vec::new()).is_empty());
    }

    #[test]
    fn every_ready_tower_gets_its_own_target() {
        let out = run(
            vec![
                tower_snapshot(1, (0.0, 0.0), 100.0),
                tower_snapshot(2, (500.0, 0.0), 100.0),
            ],
            vec![enemy_snapshot(0, (480.0, 0.0)), enemy_snapshot(1, (20.0, 0.0))],
        );

        assert_eq!(
            out.iter()
                .map(|target| (target.tower, target.enemy))
                .collect::<Vec<_>>(),
            vec![
                (TowerId::new(1), EnemyId::new(1, 0)),
                (TowerId::new(2), EnemyId::new(0, 0)),
            ]
        );
    }
}
