use super::{heuristic, PriorityQueue};
use crate::common::{Cell, CostTable, ParentTable, SearchNode, SearchOutcome, SearchTables};
use crate::error::{MazeError, Result};
use crate::map::Map;
use crate::stat::Stats;

use std::time::Instant;
use tracing::{debug, instrument, trace};

#[instrument(skip_all, name = "a_star", fields(start = format!("{start:?}"), goal = format!("{goal:?}")), level = "debug")]
pub fn a_star_search(map: &Map, start: Cell, goal: Cell, stats: &mut Stats) -> Result<SearchOutcome> {
    map.check_bounds("start", start)?;
    map.check_bounds("goal", goal)?;

    let search_start_time = Instant::now();
    let outcome = search_open_cells(map, start, goal, stats);
    stats.add_elapsed(search_start_time.elapsed());
    outcome
}

fn search_open_cells(map: &Map, start: Cell, goal: Cell, stats: &mut Stats) -> Result<SearchOutcome> {
    // Blocked endpoints can never be part of a path.
    if !map.is_passable(start.0, start.1) || !map.is_passable(goal.0, goal.1) {
        debug!("start or goal is blocked");
        return Ok(SearchOutcome::NotFound);
    }

    let mut open_list = PriorityQueue::new();
    let mut costs = CostTable::new(map.height, map.width);
    let mut parents = ParentTable::new(map.height, map.width);

    costs.set(start, 0);
    open_list.push(SearchNode::new(start, 0, heuristic(start, goal)));
    stats.pushed_nodes += 1;

    while !open_list.is_empty() {
        let current = open_list.pop()?;
        trace!("expand node: {current:?}");
        stats.expanded_nodes += 1;

        // First pop of the goal ends the search, stale or not.
        if current.cell == goal {
            stats.cost = costs.get(goal).unwrap_or(current.g_cost);
            debug!("reached goal with cost {}", stats.cost);
            return Ok(SearchOutcome::Found(SearchTables { costs, parents }));
        }

        expand_node(map, &current, goal, &mut costs, &mut parents, &mut open_list, stats)?;
        trace!("open list size {}", open_list.len());
    }

    debug!("cannot find solution");
    Ok(SearchOutcome::NotFound)
}

// Relaxes the open neighbours of `current` from its best known cost.
fn expand_node(
    map: &Map,
    current: &SearchNode,
    goal: Cell,
    costs: &mut CostTable,
    parents: &mut ParentTable,
    open_list: &mut PriorityQueue,
    stats: &mut Stats,
) -> Result<()> {
    // Every queued cell has a recorded cost.
    let current_cost = costs
        .get(current.cell)
        .ok_or(MazeError::MissingCost { cell: current.cell })?;
    // Assuming uniform cost
    let tentative_g_cost = current_cost + 1;

    for neighbor in map.get_neighbors(current.cell.0, current.cell.1) {
        if costs.improves(neighbor, tentative_g_cost) {
            costs.set(neighbor, tentative_g_cost);
            parents.set(neighbor, current.cell);
            open_list.push(SearchNode::new(
                neighbor,
                tentative_g_cost,
                heuristic(neighbor, goal),
            ));
            stats.pushed_nodes += 1;
        }
    }
    Ok(())
}
