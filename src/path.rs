//! Shortest-path search over a boolean maze grid.
//!
//! A unified Dijkstra / A* engine on a 4-connected grid with unit step
//! cost. The frontier is a binary heap keyed on `cost + heuristic`;
//! instead of a decrease-key operation, improved nodes are re-pushed and
//! stale entries are discarded when popped.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::debug;

use crate::error::{Error, Result};

/// Which cost model orders the frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Plain uniform-cost search: the heuristic is identically zero.
    Dijkstra,
    /// A* with the Euclidean distance to the goal, which never exceeds
    /// the Manhattan distance and is therefore admissible here.
    AStar,
}

#[derive(Clone)]
struct NodeState {
    cost: usize,
    predecessor: Option<(usize, usize)>,
    heuristic: f64,
}

/// Frontier entry ordered by priority, smallest first, with (y, x)
/// breaking ties so identical inputs always expand in the same order.
struct FrontierEntry {
    priority: f64,
    cost: usize,
    x: usize,
    y: usize,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; compare reversed so the smallest
        // priority pops first.
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.y.cmp(&self.y))
            .then_with(|| other.x.cmp(&self.x))
            .then_with(|| other.cost.cmp(&self.cost))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

/// Find a shortest path from `start` to `goal` over a grid where `true`
/// marks passable cells.
///
/// Coordinates are `(x, y)` with `grid[y][x]`. The returned sequence
/// begins at `start`, ends at `goal`, and steps between 4-adjacent
/// passable cells. Fails with [`Error::NoPath`] when the goal cannot be
/// reached, including when either endpoint is a wall or out of bounds.
pub fn shortest_path(
    grid: &[Vec<bool>],
    start: (usize, usize),
    goal: (usize, usize),
    mode: SearchMode,
) -> Result<Vec<(usize, usize)>> {
    if !cell_passable(grid, start) || !cell_passable(grid, goal) {
        return Err(Error::NoPath);
    }
    let height = grid.len();
    // Size the node table by the widest row so every passable cell maps
    // inside it, even on ragged grids.
    let width = grid.iter().map(Vec::len).max().unwrap_or(0);

    let index = |(x, y): (usize, usize)| y * width + x;
    let mut nodes: Vec<Option<NodeState>> = vec![None; width * height];
    let mut frontier = BinaryHeap::new();

    let start_estimate = estimate(mode, start, goal);
    nodes[index(start)] = Some(NodeState {
        cost: 0,
        predecessor: None,
        heuristic: start_estimate,
    });
    frontier.push(FrontierEntry {
        priority: start_estimate,
        cost: 0,
        x: start.0,
        y: start.1,
    });

    let mut expanded = 0usize;
    while let Some(entry) = frontier.pop() {
        let cell = (entry.x, entry.y);
        let best = nodes[index(cell)].as_ref().map_or(usize::MAX, |n| n.cost);
        if entry.cost > best {
            // Stale duplicate left behind by a relaxation.
            continue;
        }
        if cell == goal {
            debug!(
                "goal reached at cost {} after {expanded} expansions",
                entry.cost
            );
            return Ok(reconstruct(&nodes, width, cell));
        }
        expanded += 1;

        for neighbor in neighbors(grid, cell) {
            let next_cost = entry.cost + 1;
            let slot = &mut nodes[index(neighbor)];
            match slot {
                Some(state) if next_cost < state.cost => {
                    state.cost = next_cost;
                    state.predecessor = Some(cell);
                    frontier.push(FrontierEntry {
                        priority: next_cost as f64 + state.heuristic,
                        cost: next_cost,
                        x: neighbor.0,
                        y: neighbor.1,
                    });
                }
                Some(_) => {}
                None => {
                    let heuristic = estimate(mode, neighbor, goal);
                    *slot = Some(NodeState {
                        cost: next_cost,
                        predecessor: Some(cell),
                        heuristic,
                    });
                    frontier.push(FrontierEntry {
                        priority: next_cost as f64 + heuristic,
                        cost: next_cost,
                        x: neighbor.0,
                        y: neighbor.1,
                    });
                }
            }
        }
    }

    Err(Error::NoPath)
}

fn cell_passable(grid: &[Vec<bool>], (x, y): (usize, usize)) -> bool {
    grid.get(y).and_then(|row| row.get(x)).copied().unwrap_or(false)
}

/// Passable 4-neighbors of a cell, in north, west, east, south order.
fn neighbors(grid: &[Vec<bool>], (x, y): (usize, usize)) -> impl Iterator<Item = (usize, usize)> + '_ {
    [
        (x, y.wrapping_sub(1)),
        (x.wrapping_sub(1), y),
        (x + 1, y),
        (x, y + 1),
    ]
    .into_iter()
    .filter(move |&cell| cell_passable(grid, cell))
}

fn estimate(mode: SearchMode, from: (usize, usize), goal: (usize, usize)) -> f64 {
    match mode {
        SearchMode::Dijkstra => 0.0,
        SearchMode::AStar => {
            let dx = from.0 as f64 - goal.0 as f64;
            let dy = from.1 as f64 - goal.1 as f64;
            (dx * dx + dy * dy).sqrt()
        }
    }
}

/// Walk predecessor references back from the goal, then reverse.
fn reconstruct(
    nodes: &[Option<NodeState>],
    width: usize,
    goal: (usize, usize),
) -> Vec<(usize, usize)> {
    let mut path = Vec::new();
    let mut current = Some(goal);
    while let Some(cell) = current {
        path.push(cell);
        current = nodes[cell.1 * width + cell.0]
            .as_ref()
            .and_then(|node| node.predecessor);
    }
    path.reverse();
    path
}
