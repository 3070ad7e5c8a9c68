mod astar;
mod queue;

pub use astar::a_star_search;
pub use queue::PriorityQueue;

use crate::common::{Cell, ParentTable, Path, SearchOutcome};
use crate::error::{MazeError, Result};
use crate::map::Map;
use crate::stat::Stats;

// Manhattan distance, admissible and consistent for 4-directional unit moves.
pub(crate) fn heuristic(position: Cell, goal: Cell) -> usize {
    position.0.abs_diff(goal.0) + position.1.abs_diff(goal.1)
}

/// Walks parent links back from `goal` to `start` and returns the path in
/// travel order, both endpoints included.
pub fn construct_path(parents: &ParentTable, start: Cell, goal: Cell) -> Result<Path> {
    let limit = parents.capacity();
    let mut current = goal;
    let mut path = vec![current];
    while current != start {
        if path.len() > limit {
            return Err(MazeError::BrokenChain {
                goal,
                steps: path.len() - 1,
            });
        }
        current = parents.get(current).ok_or(MazeError::BrokenChain {
            goal,
            steps: path.len() - 1,
        })?;
        path.push(current);
    }
    path.reverse(); // Reverse path to start from the initial position
    Ok(path)
}

/// Runs the search and reconstruction, returning the path and its cost, or
/// `None` when the goal cannot be reached.
pub fn find_path(map: &Map, start: Cell, goal: Cell, stats: &mut Stats) -> Result<Option<(Path, usize)>> {
    match a_star_search(map, start, goal, stats)? {
        SearchOutcome::Found(tables) => {
            let path = construct_path(&tables.parents, start, goal)?;
            let cost = path.len() - 1;
            Ok(Some((path, cost)))
        }
        SearchOutcome::NotFound => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heuristic() {
        assert_eq!(heuristic((1, 1), (3, 3)), 4);
        assert_eq!(heuristic((4, 0), (0, 7)), 11);
        assert_eq!(heuristic((2, 2), (2, 2)), 0);
    }

    #[test]
    fn test_construct_path() {
        let mut parents = ParentTable::new(5, 5);
        parents.set((1, 2), (1, 1));
        parents.set((2, 2), (1, 2));
        parents.set((3, 2), (2, 2));
        let path = construct_path(&parents, (1, 1), (3, 2)).unwrap();
        assert_eq!(path, vec![(1, 1), (1, 2), (2, 2), (3, 2)]);
    }

    #[test]
    fn test_construct_path_missing_parent() {
        let mut parents = ParentTable::new(5, 5);
        parents.set((2, 2), (1, 2));
        match construct_path(&parents, (1, 1), (2, 2)) {
            Err(MazeError::BrokenChain { goal, steps }) => {
                assert_eq!(goal, (2, 2));
                assert_eq!(steps, 1);
            }
            other => panic!("expected broken chain, got {other:?}"),
        }
    }

    #[test]
    fn test_construct_path_cycle() {
        let mut parents = ParentTable::new(5, 5);
        parents.set((1, 2), (1, 3));
        parents.set((1, 3), (1, 2));
        assert!(matches!(
            construct_path(&parents, (1, 1), (1, 2)),
            Err(MazeError::BrokenChain { .. })
        ));
    }
}
