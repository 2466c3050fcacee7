//! Expansion of sparse waypoints into the dense route enemies walk.

use waypoint_defence_core::CellCoord;

/// Dense, ordered sequence of cells leading from the spawn to the base.
///
/// Built once when the world is created and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path {
    cells: Vec<CellCoord>,
}

impl Path {
    /// Expands the provided waypoints into a dense path.
    #[must_use]
    pub fn from_waypoints(waypoints: &[CellCoord]) -> Self {
        Self {
            cells: build_path(waypoints),
        }
    }

    /// Cells composing the path in walking order.
    #[must_use]
    pub fn cells(&self) -> &[CellCoord] {
        &self.cells
    }

    /// Cell at the provided path index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<CellCoord> {
        self.cells.get(index).copied()
    }

    /// Cell enemies spawn on.
    #[must_use]
    pub fn first(&self) -> Option<CellCoord> {
        self.cells.first().copied()
    }

    /// Cell holding the base enemies try to reach.
    #[must_use]
    pub fn base(&self) -> Option<CellCoord> {
        self.cells.last().copied()
    }

    /// Number of cells in the path.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Reports whether the path has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Walks from each waypoint to the next one cell at a time.
///
/// Every step moves along each axis that is not yet aligned with the next
/// waypoint, so a waypoint offset on both axes produces diagonal steps. The
/// junction cell shared by two segments appears once. Routes that repeat the
/// junction make enemies spend one extra step on every corner; this one does
/// not, so the default route is 18 cells rather than 23 and enemies reach the
/// base slightly sooner.
#[must_use]
pub fn build_path(waypoints: &[CellCoord]) -> Vec<CellCoord> {
    let Some((&first, rest)) = waypoints.split_first() else {
        return Vec::new();
    };

    let mut cells = vec![first];
    let mut cursor = first;
    for &waypoint in rest {
        while cursor != waypoint {
            cursor = cursor.step_toward(waypoint);
            cells.push(cursor);
        }
    }
    cells
}
