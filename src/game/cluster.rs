//! Cluster detection - finding and popping matching bubbles.
//!
//! Uses flood fill (BFS) over the four axis-aligned neighbors to find
//! connected groups of same-colored bubbles. Each landing triggers a pass
//! over the whole board; every cluster of 3+ pops!

use bevy::prelude::*;
use std::collections::{HashSet, VecDeque};

use super::{
    bubble::{BubbleColor, GameAssets},
    cell::GridCoord,
    grid::BubbleGrid,
    projectile::BubbleLanded,
};
use crate::{PausableSystems, audio::sound_effect, screens::Screen};

pub(super) fn plugin(app: &mut App) {
    app.add_message::<ClusterPopped>();

    app.add_systems(
        Update,
        detect_clusters
            .in_set(PausableSystems)
            .in_set(ClusterSystems)
            .run_if(in_state(Screen::Gameplay)),
    );
}

/// System set for cluster detection, so the game-over check can order after it.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClusterSystems;

/// Minimum cluster size to pop (match-3).
const MIN_CLUSTER_SIZE: usize = 3;

/// Message sent for each cluster popped in a resolution pass.
#[derive(Message, Debug, Clone)]
pub struct ClusterPopped {
    pub coords: Vec<GridCoord>,
    pub color: BubbleColor,
    pub count: usize,
}

/// A cluster removed from the grid by [`resolve_clusters`].
pub struct PoppedCluster {
    pub cells: Vec<(GridCoord, Entity)>,
    pub color: BubbleColor,
}

/// Resolve the whole board when a bubble lands.
///
/// Every cluster of 3+ anywhere on the grid pops, not just the one around
/// the landed bubble, so clusters already present in the starting layout go
/// on the first landing.
fn detect_clusters(
    mut commands: Commands,
    mut grid: ResMut<BubbleGrid>,
    mut landed_events: MessageReader<BubbleLanded>,
    mut popped_events: MessageWriter<ClusterPopped>,
    game_assets: Res<GameAssets>,
) {
    if landed_events.read().count() == 0 {
        return;
    }

    for cluster in resolve_clusters(&mut grid) {
        info!(
            "Popped cluster of {} {:?} bubbles",
            cluster.cells.len(),
            cluster.color
        );

        for &(_, entity) in &cluster.cells {
            commands.entity(entity).despawn();
        }

        commands.spawn(sound_effect(game_assets.pop_sound.clone()));

        popped_events.write(ClusterPopped {
            count: cluster.cells.len(),
            color: cluster.color,
            coords: cluster.cells.into_iter().map(|(coord, _)| coord).collect(),
        });
    }
}

/// Remove every cluster of 3+ same-colored bubbles from the grid.
///
/// Scans all occupied cells in row-major order with a pass-wide matched set:
/// a cell absorbed into a reported cluster is never re-explored as a new
/// cluster root, so each cluster is reported exactly once. Clusters of size
/// 1-2 are left untouched.
pub fn resolve_clusters(grid: &mut BubbleGrid) -> Vec<PoppedCluster> {
    let mut roots: Vec<GridCoord> = grid.coords().collect();
    roots.sort_unstable_by_key(|coord| (coord.row, coord.col));

    let mut matched = HashSet::new();
    let mut popped = Vec::new();

    for root in roots {
        if matched.contains(&root) {
            continue;
        }
        let Some(color) = grid.color_at(root) else {
            continue;
        };

        let cluster = find_cluster(grid, root, color);
        if cluster.len() < MIN_CLUSTER_SIZE {
            continue;
        }

        matched.extend(cluster.iter().copied());

        let cells = cluster
            .into_iter()
            .filter_map(|coord| grid.remove(coord).map(|bubble| (coord, bubble.entity)))
            .collect();

        popped.push(PoppedCluster { cells, color });
    }

    popped
}

/// Find all connected bubbles of the same color using flood fill (BFS).
///
/// The per-call visited set guarantees termination on any grid topology,
/// including cyclic adjacency such as 2x2 blocks. The start cell is always
/// included.
pub fn find_cluster(
    grid: &BubbleGrid,
    start: GridCoord,
    target_color: BubbleColor,
) -> Vec<GridCoord> {
    let mut cluster = Vec::new();
    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();

    cluster.push(start);
    visited.insert(start);

    for neighbor in start.neighbors() {
        if visited.insert(neighbor) {
            queue.push_back(neighbor);
        }
    }

    while let Some(coord) = queue.pop_front() {
        if grid.color_at(coord) != Some(target_color) {
            continue;
        }

        cluster.push(coord);

        for neighbor in coord.neighbors() {
            if visited.insert(neighbor) {
                queue.push_back(neighbor);
            }
        }
    }

    cluster
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_of(cells: &[(i32, i32, BubbleColor)]) -> BubbleGrid {
        let mut grid = BubbleGrid::default();
        for &(col, row, color) in cells {
            grid.insert(GridCoord::new(col, row), Entity::PLACEHOLDER, color);
        }
        grid
    }

    #[test]
    fn test_singleton_cluster() {
        use BubbleColor::*;
        let grid = grid_of(&[(3, 3, Red), (5, 5, Red)]);
        let cluster = find_cluster(&grid, GridCoord::new(3, 3), Red);
        assert_eq!(cluster, vec![GridCoord::new(3, 3)]);
    }

    #[test]
    fn test_l_shape_is_one_cluster() {
        use BubbleColor::*;
        let grid = grid_of(&[(2, 2, Green), (2, 3, Green), (3, 3, Green)]);
        let cluster = find_cluster(&grid, GridCoord::new(2, 2), Green);
        assert_eq!(cluster.len(), 3);
        for coord in [(2, 2), (2, 3), (3, 3)] {
            assert!(cluster.contains(&GridCoord::new(coord.0, coord.1)));
        }
    }

    #[test]
    fn test_diagonal_is_excluded() {
        use BubbleColor::*;
        let grid = grid_of(&[(2, 2, Blue), (2, 3, Blue), (3, 4, Blue)]);
        let cluster = find_cluster(&grid, GridCoord::new(2, 2), Blue);
        assert_eq!(cluster.len(), 2);
        assert!(!cluster.contains(&GridCoord::new(3, 4)));
    }

    #[test]
    fn test_other_colors_break_the_chain() {
        use BubbleColor::*;
        let grid = grid_of(&[(2, 2, Red), (3, 2, Yellow), (4, 2, Red)]);
        let cluster = find_cluster(&grid, GridCoord::new(2, 2), Red);
        assert_eq!(cluster, vec![GridCoord::new(2, 2)]);
    }

    #[test]
    fn test_terminates_on_cyclic_adjacency() {
        use BubbleColor::*;
        // A 2x2 block plus a ring of cells around it; every cell is part of
        // at least one cycle.
        let grid = grid_of(&[
            (2, 2, Purple),
            (3, 2, Purple),
            (2, 3, Purple),
            (3, 3, Purple),
            (4, 2, Purple),
            (4, 3, Purple),
        ]);
        let cluster = find_cluster(&grid, GridCoord::new(2, 2), Purple);
        assert_eq!(cluster.len(), 6);
    }

    #[test]
    fn test_finds_every_reachable_cell_and_only_those() {
        use BubbleColor::*;
        let grid = grid_of(&[
            // A zig-zag chain of red.
            (0, 0, Red),
            (0, 1, Red),
            (1, 1, Red),
            (1, 2, Red),
            // A disconnected red pair.
            (5, 0, Red),
            (6, 0, Red),
        ]);
        let cluster = find_cluster(&grid, GridCoord::new(0, 0), Red);
        assert_eq!(cluster.len(), 4);
        assert!(!cluster.contains(&GridCoord::new(5, 0)));
        assert!(!cluster.contains(&GridCoord::new(6, 0)));
    }

    #[test]
    fn test_small_clusters_leave_the_grid_unchanged() {
        use BubbleColor::*;
        let mut grid = grid_of(&[(2, 2, Red), (3, 2, Red)]);
        assert!(resolve_clusters(&mut grid).is_empty());
        assert_eq!(grid.len(), 2);
    }

    #[test]
    fn test_resolves_every_cluster_on_the_board() {
        use BubbleColor::*;
        // A red triple, a distant blue triple, and a green pair.
        let mut grid = grid_of(&[
            (0, 0, Red),
            (1, 0, Red),
            (2, 0, Red),
            (8, 6, Blue),
            (8, 7, Blue),
            (8, 8, Blue),
            (14, 2, Green),
            (15, 2, Green),
        ]);

        let popped = resolve_clusters(&mut grid);

        assert_eq!(popped.len(), 2);
        let total: usize = popped.iter().map(|cluster| cluster.cells.len()).sum();
        assert_eq!(total, 6);
        // Only the green pair survives.
        assert_eq!(grid.len(), 2);
        assert!(grid.is_occupied(GridCoord::new(14, 2)));
        assert!(grid.is_occupied(GridCoord::new(15, 2)));
    }

    #[test]
    fn test_matched_cells_are_not_recounted_as_roots() {
        use BubbleColor::*;
        // One connected 5-cluster; every cell is a candidate root, but the
        // cluster must be reported exactly once.
        let mut grid = grid_of(&[
            (4, 4, Yellow),
            (5, 4, Yellow),
            (6, 4, Yellow),
            (5, 5, Yellow),
            (5, 3, Yellow),
        ]);

        let popped = resolve_clusters(&mut grid);

        assert_eq!(popped.len(), 1);
        assert_eq!(popped[0].cells.len(), 5);
        assert_eq!(popped[0].color, Yellow);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_pre_existing_cluster_pops_without_a_direct_hit() {
        use BubbleColor::*;
        // A landing far from the red triple still clears it in the same pass.
        let mut grid = grid_of(&[
            (0, 0, Red),
            (1, 0, Red),
            (2, 0, Red),
            (9, 9, Blue),
        ]);

        let popped = resolve_clusters(&mut grid);

        assert_eq!(popped.len(), 1);
        assert_eq!(popped[0].color, Red);
        assert_eq!(grid.len(), 1);
        assert!(grid.is_occupied(GridCoord::new(9, 9)));
    }
}
