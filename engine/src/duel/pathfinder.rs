use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use super::types::{Cell, Direction, GridBounds};

/// A* over the 4-connected grid. Entering a cell costs `1 + penalty(cell)`; the heuristic is
/// the Manhattan distance, which stays consistent under any non-negative surcharge.
pub struct Pathfinder {
    bounds: GridBounds,
}

#[derive(Clone, Copy, PartialEq, Eq)]
struct OpenNode {
    estimate: u32,
    order: u64,
    cell: Cell,
}

// Min-heap on (estimate, insertion order).
impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .estimate
            .cmp(&self.estimate)
            .then_with(|| other.order.cmp(&self.order))
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Pathfinder {
    pub fn new(bounds: GridBounds) -> Self {
        Self { bounds }
    }

    /// Cheapest path from `start` to `goal`, both included. Cells outside the bounds or for
    /// which `blocked` holds are never entered; `start` itself is not tested.
    pub fn find_path<B, P>(&self, start: Cell, goal: Cell, blocked: B, penalty: P) -> Option<Vec<Cell>>
    where
        B: Fn(Cell) -> bool,
        P: Fn(Cell) -> u32,
    {
        let mut open = BinaryHeap::new();
        let mut closed: HashSet<Cell> = HashSet::new();
        let mut came_from: HashMap<Cell, Cell> = HashMap::new();
        let mut g_score: HashMap<Cell, u32> = HashMap::new();
        let mut order = 0u64;

        g_score.insert(start, 0);
        open.push(OpenNode {
            estimate: start.manhattan_distance(goal),
            order,
            cell: start,
        });

        while let Some(OpenNode { cell: current, .. }) = open.pop() {
            if current == goal {
                return Some(Self::reconstruct_path(&came_from, current));
            }
            if !closed.insert(current) {
                continue;
            }

            let current_g = g_score.get(&current).copied().unwrap_or(u32::MAX);

            for direction in Direction::ALL {
                let neighbor = current.step(direction);
                if !self.bounds.contains(neighbor) || closed.contains(&neighbor) || blocked(neighbor) {
                    continue;
                }

                let tentative_g = current_g.saturating_add(1 + penalty(neighbor));
                if tentative_g >= g_score.get(&neighbor).copied().unwrap_or(u32::MAX) {
                    continue;
                }

                came_from.insert(neighbor, current);
                g_score.insert(neighbor, tentative_g);
                order += 1;
                open.push(OpenNode {
                    estimate: tentative_g.saturating_add(neighbor.manhattan_distance(goal)),
                    order,
                    cell: neighbor,
                });
            }
        }

        None
    }

    /// First step of the cheapest path. `Some(current)` when already standing on the goal,
    /// `None` when the goal cannot be reached.
    pub fn find_direction<B, P>(
        &self,
        start: Cell,
        goal: Cell,
        current: Direction,
        blocked: B,
        penalty: P,
    ) -> Option<Direction>
    where
        B: Fn(Cell) -> bool,
        P: Fn(Cell) -> u32,
    {
        let path = self.find_path(start, goal, blocked, penalty)?;
        match path.get(1) {
            Some(next) => Direction::from_delta(next.x - start.x, next.y - start.y),
            None => Some(current),
        }
    }

    fn reconstruct_path(came_from: &HashMap<Cell, Cell>, goal: Cell) -> Vec<Cell> {
        let mut path = vec![goal];
        let mut current = goal;
        while let Some(&previous) = came_from.get(&current) {
            path.push(previous);
            current = previous;
        }
        path.reverse();
        path
    }
}
