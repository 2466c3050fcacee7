//! Generational arena holding the live enemies and their path-following motion.

use glam::Vec2;
use waypoint_defence_core::{EnemyId, EnemySnapshot, Health, Rgb, TileGrid, WorldPoint};

use crate::{to_vec, Path};

/// Enemy stored inside the world.
#[derive(Clone, Debug)]
pub(crate) struct EnemyState {
    pub(crate) position: Vec2,
    pub(crate) health: Health,
    pub(crate) max_health: u32,
    /// Tiles per millisecond.
    pub(crate) speed: f32,
    pub(crate) reward: u32,
    pub(crate) path_index: usize,
    pub(crate) color: Rgb,
}

/// Result of moving an enemy for one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Stride {
    /// The enemy moved toward (or onto) its next path cell.
    Walked,
    /// No path cell follows the enemy's index: it has reached the base.
    ReachedBase,
}

impl EnemyState {
    /// Moves the enemy toward the next path cell.
    ///
    /// When the remaining distance fits in this tick's step the enemy snaps
    /// onto the cell center so long ticks never overshoot a corner.
    pub(crate) fn advance(&mut self, path: &Path, grid: &TileGrid, elapsed_ms: f32) -> Stride {
        let Some(next) = path.get(self.path_index + 1) else {
            return Stride::ReachedBase;
        };

        let target = to_vec(grid.cell_center(next));
        let offset = target - self.position;
        let distance = offset.length();
        let step = (self.speed * elapsed_ms * grid.tile_length()).max(0.0);

        if distance <= step {
            self.position = target;
            self.path_index += 1;
        } else {
            self.position += offset / distance * step;
        }
        Stride::Walked
    }

    fn snapshot(&self, id: EnemyId) -> EnemySnapshot {
        EnemySnapshot {
            id,
            position: WorldPoint::new(self.position.x, self.position.y),
            health: self.health,
            max_health: self.max_health,
            speed: self.speed,
            reward: self.reward,
            path_index: self.path_index,
            color: self.color,
        }
    }
}

#[derive(Clone, Debug)]
struct EnemySlot {
    generation: u32,
    enemy: Option<EnemyState>,
}

/// Arena of live enemies addressed by generation-checked handles.
///
/// Iteration follows spawn order, independent of slot reuse.
#[derive(Clone, Debug, Default)]
pub(crate) struct EnemyArena {
    slots: Vec<EnemySlot>,
    free: Vec<u32>,
    order: Vec<EnemyId>,
}

impl EnemyArena {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, enemy: EnemyState) -> EnemyId {
        let id = match self.free.pop() {
            Some(slot) => {
                let entry = &mut self.slots[slot as usize];
                entry.enemy = Some(enemy);
                EnemyId::new(slot, entry.generation)
            }
            None => {
                let slot = u32::try_from(self.slots.len()).unwrap_or(u32::MAX);
                self.slots.push(EnemySlot {
                    generation: 0,
                    enemy: Some(enemy),
                });
                EnemyId::new(slot, 0)
            }
        };
        self.order.push(id);
        id
    }

    pub(crate) fn get(&self, id: EnemyId) -> Option<&EnemyState> {
        self.slots
            .get(id.slot() as usize)
            .filter(|entry| entry.generation == id.generation())
            .and_then(|entry| entry.enemy.as_ref())
    }

    pub(crate) fn get_mut(&mut self, id: EnemyId) -> Option<&mut EnemyState> {
        self.slots
            .get_mut(id.slot() as usize)
            .filter(|entry| entry.generation == id.generation())
            .and_then(|entry| entry.enemy.as_mut())
    }

    /// Removes the enemy and retires its handle.
    pub(crate) fn remove(&mut self, id: EnemyId) -> Option<EnemyState> {
        let entry = self
            .slots
            .get_mut(id.slot() as usize)
            .filter(|entry| entry.generation == id.generation())?;
        let enemy = entry.enemy.take()?;
        entry.generation = entry.generation.wrapping_add(1);
        self.free.push(id.slot());
        self.order.retain(|live| *live != id);
        Some(enemy)
    }

    /// Handles of the live enemies in spawn order.
    pub(crate) fn ids(&self) -> Vec<EnemyId> {
        self.order.clone()
    }

    pub(crate) fn len(&self) -> usize {
        self.order.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Removes every enemy, retiring all outstanding handles.
    pub(crate) fn clear(&mut self) {
        for id in self.ids() {
            let _ = self.remove(id);
        }
    }

    pub(crate) fn snapshots(&self) -> Vec<EnemySnapshot> {
        self.order
            .iter()
            .filter_map(|id| self.get(*id).map(|enemy| enemy.snapshot(*id)))
            .collect()
    }
}
