//! Square-cell grid coordinates and play field dimensions.
//!
//! The field is 800x600 px with 50 px cells, giving 16 columns by 12 rows.
//! Columns increase to the right and rows increase downward; world positions
//! are Bevy-centered, so the cell at (0, 0) sits in the top-left corner.
//! Cell alignment is the invariant that lets adjacency be tested with exact
//! coordinate equality instead of proximity.

use bevy::prelude::*;

/// Width of the play field in pixels.
pub const FIELD_WIDTH: f32 = 800.0;

/// Height of the play field in pixels.
pub const FIELD_HEIGHT: f32 = 600.0;

/// Edge length of a grid cell. Also the collision threshold, since it equals
/// the sum of two bubble radii.
pub const CELL_SIZE: f32 = 50.0;

/// Radius of every bubble, grid or projectile.
pub const BUBBLE_RADIUS: f32 = 25.0;

/// Number of columns in the grid.
pub const GRID_COLS: i32 = 16;

/// Number of rows in the grid.
pub const GRID_ROWS: i32 = 12;

/// Left edge of the play field in world coordinates.
pub const LEFT_WALL: f32 = -FIELD_WIDTH / 2.0;

/// Right edge of the play field in world coordinates.
pub const RIGHT_WALL: f32 = FIELD_WIDTH / 2.0;

/// Top edge of the play field in world coordinates.
pub const TOP_WALL: f32 = FIELD_HEIGHT / 2.0;

/// Bottom edge of the play field in world coordinates.
pub const BOTTOM_WALL: f32 = -FIELD_HEIGHT / 2.0;

/// A cell address on the square grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Component, Reflect)]
#[reflect(Component)]
pub struct GridCoord {
    /// Column (increases to the right).
    pub col: i32,
    /// Row (increases downward).
    pub row: i32,
}

impl GridCoord {
    /// Create a new grid coordinate.
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Get the 4 axis-aligned neighboring coordinates.
    ///
    /// Diagonals are never adjacent; clusters connect only through these.
    pub fn neighbors(&self) -> [GridCoord; 4] {
        [
            GridCoord::new(self.col + 1, self.row), // East
            GridCoord::new(self.col - 1, self.row), // West
            GridCoord::new(self.col, self.row - 1), // North
            GridCoord::new(self.col, self.row + 1), // South
        ]
    }

    /// Convert a cell address to the world position of the cell's center.
    pub fn to_world(&self) -> Vec2 {
        Vec2::new(
            LEFT_WALL + (self.col as f32 + 0.5) * CELL_SIZE,
            TOP_WALL - (self.row as f32 + 0.5) * CELL_SIZE,
        )
    }

    /// Convert a world position to the nearest cell address.
    ///
    /// This is a snap, not a lookup: any position inside a cell maps to that
    /// cell, positions outside the field map to the nearest cell beyond its
    /// edge.
    pub fn from_world(pos: Vec2) -> Self {
        let col = ((pos.x - LEFT_WALL) / CELL_SIZE - 0.5).round() as i32;
        let row = ((TOP_WALL - pos.y) / CELL_SIZE - 0.5).round() as i32;
        Self { col, row }
    }
}

impl std::fmt::Display for GridCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbors_are_axis_aligned() {
        let cell = GridCoord::new(3, 4);
        let neighbors = cell.neighbors();
        assert_eq!(neighbors.len(), 4);
        for n in neighbors {
            let d_col = (n.col - cell.col).abs();
            let d_row = (n.row - cell.row).abs();
            assert_eq!(d_col + d_row, 1);
        }
    }

    #[test]
    fn test_diagonal_is_not_a_neighbor() {
        let cell = GridCoord::new(2, 2);
        assert!(!cell.neighbors().contains(&GridCoord::new(3, 3)));
    }

    #[test]
    fn test_world_roundtrip() {
        for (col, row) in [(0, 0), (9, 4), (15, 11)] {
            let original = GridCoord::new(col, row);
            let world = original.to_world();
            assert_eq!(GridCoord::from_world(world), original);
        }
    }

    #[test]
    fn test_from_world_snaps_within_cell() {
        let center = GridCoord::new(5, 3).to_world();
        // Anywhere inside the cell maps back to the same cell.
        let nudged = center + Vec2::new(20.0, -20.0);
        assert_eq!(GridCoord::from_world(nudged), GridCoord::new(5, 3));
    }

    #[test]
    fn test_top_left_cell_position() {
        let world = GridCoord::new(0, 0).to_world();
        assert_eq!(world, Vec2::new(LEFT_WALL + 25.0, TOP_WALL - 25.0));
    }
}
