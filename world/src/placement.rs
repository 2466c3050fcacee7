//! Dense grid tracking which cells may still receive a tower.

use waypoint_defence_core::{CellCoord, PlacementError, TileGrid, TowerId};

use crate::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CellState {
    Free,
    Path,
    Tower(TowerId),
}

#[derive(Clone, Debug)]
pub(crate) struct PlacementGrid {
    grid: TileGrid,
    cells: Vec<CellState>,
}

impl PlacementGrid {
    /// Creates a grid with every path cell blocked.
    pub(crate) fn new(grid: TileGrid, path: &Path) -> Self {
        let capacity_u64 = u64::from(grid.columns()) * u64::from(grid.rows());
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        let mut placement = Self {
            grid,
            cells: vec![CellState::Free; capacity],
        };
        for cell in path.cells() {
            if let Some(index) = placement.index(*cell) {
                placement.cells[index] = CellState::Path;
            }
        }
        placement
    }

    /// Validates the cell itself, ignoring phase and gold.
    pub(crate) fn check(&self, cell: CellCoord) -> Result<(), PlacementError> {
        let index = self.index(cell).ok_or(PlacementError::OutOfBounds)?;
        if self.grid.is_approach_row(cell) {
            return Err(PlacementError::ApproachRow);
        }

        match self.cells[index] {
            CellState::Free => Ok(()),
            CellState::Path => Err(PlacementError::PathCell),
            CellState::Tower(_) => Err(PlacementError::Occupied),
        }
    }

    pub(crate) fn occupy(&mut self, cell: CellCoord, tower: TowerId) {
        if let Some(index) = self.index(cell) {
            self.cells[index] = CellState::Tower(tower);
        }
    }

    pub(crate) fn tower_at(&self, cell: CellCoord) -> Option<TowerId> {
        match self.cells.get(self.index(cell)?)? {
            CellState::Tower(tower) => Some(*tower),
            CellState::Free | CellState::Path => None,
        }
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if !self.grid.contains(cell) {
            return None;
        }
        let row = usize::try_from(cell.row()).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        let width = usize::try_from(self.grid.columns()).ok()?;
        Some(row * width + column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with_path() -> PlacementGrid {
        let path = Path::from_waypoints(&[CellCoord::new(0, 1), CellCoord::new(3, 1)]);
        PlacementGrid::new(TileGrid::new(4, 4, 64.0), &path)
    }

    #[test]
    fn path_cells_are_blocked() {
        let placement = grid_with_path();
        for column in 0..4 {
            assert_eq!(
                placement.check(CellCoord::new(column, 1)),
                Err(PlacementError::PathCell)
            );
        }
        assert_eq!(placement.check(CellCoord::new(0, 0)), Ok(()));
    }

    #[test]
    fn bounds_and_approach_row_are_rejected_first() {
        let placement = grid_with_path();
        assert_eq!(
            placement.check(CellCoord::new(4, 0)),
            Err(PlacementError::OutOfBounds)
        );
        assert_eq!(
            placement.check(CellCoord::new(1, 3)),
            Err(PlacementError::ApproachRow)
        );
    }

    #[test]
    fn occupied_cells_report_their_tower() {
        let mut placement = grid_with_path();
        let cell = CellCoord::new(2, 2);
        placement.occupy(cell, TowerId::new(7));
        assert_eq!(placement.check(cell), Err(PlacementError::Occupied));
        assert_eq!(placement.tower_at(cell), Some(TowerId::new(7)));
        assert_eq!(placement.tower_at(CellCoord::new(2, 0)), None);
    }
}
