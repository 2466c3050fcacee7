//! Authoritative tower state management utilities.

use std::{collections::BTreeMap, time::Duration};

use glam::Vec2;
use waypoint_defence_core::{
    CellCoord, TowerBlueprint, TowerId, TowerKind, TowerSnapshot, WorldPoint,
};

/// Tower stored inside the world.
#[derive(Clone, Debug)]
pub(crate) struct TowerState {
    /// Identifier allocated by the world for the tower.
    pub(crate) id: TowerId,
    /// Kind of tower that was constructed.
    pub(crate) kind: TowerKind,
    /// Cell occupied by the tower.
    pub(crate) cell: CellCoord,
    /// World-space center of the tower.
    pub(crate) position: Vec2,
    /// Time left until the tower may fire again.
    pub(crate) cooldown: Duration,
    /// Stats copied from the catalog when the tower was built.
    pub(crate) blueprint: TowerBlueprint,
}

impl TowerState {
    pub(crate) fn snapshot(&self) -> TowerSnapshot {
        TowerSnapshot {
            id: self.id,
            kind: self.kind,
            cell: self.cell,
            position: WorldPoint::new(self.position.x, self.position.y),
            range: self.blueprint.range,
            cooldown: self.cooldown,
            color: self.blueprint.color,
        }
    }
}

/// Registry that stores towers and manages identifier allocation.
#[derive(Debug)]
pub(crate) struct TowerRegistry {
    entries: BTreeMap<TowerId, TowerState>,
    next_tower_id: TowerId,
}

impl TowerRegistry {
    /// Creates an empty tower registry with a reset identifier counter.
    pub(crate) fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_tower_id: TowerId::new(0),
        }
    }

    /// Stores a freshly built tower with zero cooldown.
    pub(crate) fn insert(
        &mut self,
        kind: TowerKind,
        cell: CellCoord,
        position: Vec2,
        blueprint: TowerBlueprint,
    ) -> TowerId {
        let id = self.next_tower_id;
        self.next_tower_id = TowerId::new(id.get().saturating_add(1));
        let _ = self.entries.insert(
            id,
            TowerState {
                id,
                kind,
                cell,
                position,
                cooldown: Duration::ZERO,
                blueprint,
            },
        );
        id
    }

    pub(crate) fn get_mut(&mut self, tower: TowerId) -> Option<&mut TowerState> {
        self.entries.get_mut(&tower)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &TowerState> {
        self.entries.values()
    }

    /// Counts down every tower that is still reloading.
    ///
    /// Towers at zero are left untouched; they are the ones allowed to
    /// acquire a target this tick.
    pub(crate) fn cool_down(&mut self, dt: Duration) {
        for tower in self.entries.values_mut() {
            if !tower.cooldown.is_zero() {
                tower.cooldown = tower.cooldown.saturating_sub(dt);
            }
        }
    }
}
