//! The grid that holds all resting bubbles.
//!
//! Uses a HashMap for sparse storage - only occupied cells are stored. The
//! map also carries each bubble's color, so collision and cluster logic can
//! run as pure functions of the grid without querying components.

use bevy::prelude::*;
use std::collections::{HashMap, HashSet};

use super::{
    bubble::BubbleColor,
    cell::{GRID_COLS, GRID_ROWS, GridCoord},
};

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<BubbleGrid>();
    app.register_type::<BubbleGrid>();
}

/// The bounds of the playable grid area.
#[derive(Debug, Clone, Copy, Reflect)]
pub struct GridBounds {
    /// Number of columns (valid cols are `0..cols`).
    pub cols: i32,
    /// Number of rows (valid rows are `0..rows`).
    pub rows: i32,
}

impl Default for GridBounds {
    fn default() -> Self {
        Self {
            cols: GRID_COLS,
            rows: GRID_ROWS,
        }
    }
}

impl GridBounds {
    /// Check if a cell address is within bounds.
    pub fn contains(&self, coord: GridCoord) -> bool {
        coord.col >= 0 && coord.col < self.cols && coord.row >= 0 && coord.row < self.rows
    }

    /// Clamp a cell address into bounds.
    pub fn clamp(&self, coord: GridCoord) -> GridCoord {
        GridCoord::new(
            coord.col.clamp(0, self.cols - 1),
            coord.row.clamp(0, self.rows - 1),
        )
    }
}

/// A resting bubble as stored in the grid.
#[derive(Debug, Clone, Copy, Reflect)]
pub struct GridBubble {
    /// The entity rendering this bubble.
    pub entity: Entity,
    /// The bubble's color.
    pub color: BubbleColor,
}

/// The main grid resource holding all resting bubbles.
#[derive(Resource, Debug, Default, Reflect)]
#[reflect(Resource)]
pub struct BubbleGrid {
    /// Map from cell addresses to bubbles.
    #[reflect(ignore)]
    bubbles: HashMap<GridCoord, GridBubble>,

    /// The playable area bounds.
    pub bounds: GridBounds,
}

impl BubbleGrid {
    /// Check if a cell is occupied.
    pub fn is_occupied(&self, coord: GridCoord) -> bool {
        self.bubbles.contains_key(&coord)
    }

    /// Get the bubble at a cell, if any.
    pub fn get(&self, coord: GridCoord) -> Option<GridBubble> {
        self.bubbles.get(&coord).copied()
    }

    /// Get the color of the bubble at a cell, if any.
    pub fn color_at(&self, coord: GridCoord) -> Option<BubbleColor> {
        self.bubbles.get(&coord).map(|b| b.color)
    }

    /// Insert a bubble at a cell.
    ///
    /// Returns the previous bubble if the cell was occupied.
    pub fn insert(
        &mut self,
        coord: GridCoord,
        entity: Entity,
        color: BubbleColor,
    ) -> Option<GridBubble> {
        self.bubbles.insert(coord, GridBubble { entity, color })
    }

    /// Remove the bubble at a cell.
    ///
    /// Returns the bubble that was removed, if any.
    pub fn remove(&mut self, coord: GridCoord) -> Option<GridBubble> {
        self.bubbles.remove(&coord)
    }

    /// Clear all bubbles from the grid.
    pub fn clear(&mut self) {
        self.bubbles.clear();
    }

    /// Get the number of bubbles in the grid.
    pub fn len(&self) -> usize {
        self.bubbles.len()
    }

    /// Check if the grid is empty.
    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.bubbles.is_empty()
    }

    /// Iterate over all occupied cells.
    pub fn iter(&self) -> impl Iterator<Item = (&GridCoord, &GridBubble)> {
        self.bubbles.iter()
    }

    /// Get all occupied cell addresses.
    pub fn coords(&self) -> impl Iterator<Item = GridCoord> + '_ {
        self.bubbles.keys().copied()
    }

    /// Find the closest empty cell to a world position.
    ///
    /// Used when a landing projectile needs to snap to the grid. The cell
    /// containing the position wins when free; otherwise the search expands
    /// ring by ring through axis-aligned neighbors.
    pub fn closest_empty_cell(&self, world_pos: Vec2) -> Option<GridCoord> {
        let target = self.bounds.clamp(GridCoord::from_world(world_pos));

        if !self.is_occupied(target) {
            return Some(target);
        }

        // Search neighbors in expanding rings.
        let mut checked = HashSet::new();
        let mut to_check = vec![target];

        while !to_check.is_empty() {
            let mut next_ring = Vec::new();

            for coord in to_check {
                if checked.contains(&coord) {
                    continue;
                }
                checked.insert(coord);

                if self.bounds.contains(coord) && !self.is_occupied(coord) {
                    return Some(coord);
                }

                for neighbor in coord.neighbors() {
                    if !checked.contains(&neighbor) && self.bounds.contains(neighbor) {
                        next_ring.push(neighbor);
                    }
                }
            }

            to_check = next_ring;

            // Safety limit to prevent unbounded search on a full grid.
            if checked.len() > 1000 {
                break;
            }
        }

        None
    }

    /// True if any bubble has reached the bottom row of the field.
    ///
    /// This is the game-over condition: a bubble in the last row sits at
    /// canvas y >= field height - cell size.
    pub fn bottom_row_reached(&self) -> bool {
        self.bubbles.keys().any(|c| c.row >= self.bounds.rows - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(grid: &mut BubbleGrid, col: i32, row: i32) {
        grid.insert(GridCoord::new(col, row), Entity::PLACEHOLDER, BubbleColor::Red);
    }

    #[test]
    fn test_insert_and_remove() {
        let mut grid = BubbleGrid::default();
        let coord = GridCoord::new(3, 2);

        assert!(!grid.is_occupied(coord));
        grid.insert(coord, Entity::PLACEHOLDER, BubbleColor::Blue);
        assert!(grid.is_occupied(coord));
        assert_eq!(grid.color_at(coord), Some(BubbleColor::Blue));
        assert_eq!(grid.len(), 1);

        let removed = grid.remove(coord);
        assert_eq!(removed.map(|b| b.color), Some(BubbleColor::Blue));
        assert!(grid.is_empty());
    }

    #[test]
    fn test_closest_empty_cell_prefers_containing_cell() {
        let grid = BubbleGrid::default();
        let pos = GridCoord::new(4, 5).to_world();
        assert_eq!(grid.closest_empty_cell(pos), Some(GridCoord::new(4, 5)));
    }

    #[test]
    fn test_closest_empty_cell_falls_back_to_neighbor() {
        let mut grid = BubbleGrid::default();
        place(&mut grid, 4, 5);

        let pos = GridCoord::new(4, 5).to_world();
        let snapped = grid.closest_empty_cell(pos).unwrap();
        assert_ne!(snapped, GridCoord::new(4, 5));
        assert!(GridCoord::new(4, 5).neighbors().contains(&snapped));
        assert!(!grid.is_occupied(snapped));
    }

    #[test]
    fn test_closest_empty_cell_stays_in_bounds() {
        let grid = BubbleGrid::default();
        // A position above the field snaps into the top row.
        let pos = Vec2::new(0.0, super::super::cell::TOP_WALL + 100.0);
        let snapped = grid.closest_empty_cell(pos).unwrap();
        assert_eq!(snapped.row, 0);
        assert!(grid.bounds.contains(snapped));
    }

    #[test]
    fn test_bottom_row_reached() {
        let mut grid = BubbleGrid::default();
        place(&mut grid, 0, 0);
        assert!(!grid.bottom_row_reached());

        place(&mut grid, 7, GRID_ROWS - 1);
        assert!(grid.bottom_row_reached());
    }
}
