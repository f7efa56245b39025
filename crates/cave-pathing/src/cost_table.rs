//! Safety-aware cost table: a BFS/Dijkstra over reachable cells that
//! advances the world between frontier stages so the search accounts for
//! rocks that will have fallen by the time a later expansion could act on
//! them.

use cave_core::executor::{self, Direction};
use cave_core::grid;
use cave_core::{update, Pos, World};

/// Sentinel cost for a cell the search never reached.
pub const MAX_COST: u32 = u32::MAX;

const DIRECTIONS: [Direction; 4] = [
    Direction::Left,
    Direction::Right,
    Direction::Up,
    Direction::Down,
];

/// A per-cell cost field produced by [`build_cost_table`].
#[derive(Clone, Debug)]
pub struct CostTable {
    width: i32,
    height: i32,
    costs: Vec<u32>,
}

impl CostTable {
    fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            costs: vec![MAX_COST; (width.max(0) * height.max(0)) as usize],
        }
    }

    fn index(&self, x: i32, y: i32) -> usize {
        ((y - 1) * self.width + (x - 1)) as usize
    }

    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 1 && x <= self.width && y >= 1 && y <= self.height
    }

    /// The cost to reach `(x, y)`, or [`MAX_COST`] if unreachable or
    /// out of bounds.
    pub fn get(&self, x: i32, y: i32) -> u32 {
        if !self.in_bounds(x, y) {
            return MAX_COST;
        }
        self.costs[self.index(x, y)]
    }

    fn set(&mut self, x: i32, y: i32, value: u32) {
        let i = self.index(x, y);
        self.costs[i] = value;
    }
}

/// Builds the cost table for a robot starting at `source` in `world`.
///
/// The frontier advances in integer stages: every cell at cost `k` is
/// expanded before the world advances one "update ignoring robot" tick
/// and the search moves on to stage `k + 1`. This lets a cell's eventual
/// cost reflect the rock positions at the tick the robot would actually
/// arrive there, not the rock positions in the initial snapshot.
pub fn build_cost_table(world: &World, source: Pos) -> CostTable {
    let mut table = CostTable::new(world.width(), world.height());
    table.set(source.x, source.y, 0);
    let mut frontier = vec![source];
    let mut current = world.clone();
    let mut cost: u32 = 0;
    while !frontier.is_empty() {
        let staged_next = update::tick_ignoring_robot(&current);
        let mut next_frontier = Vec::new();
        for &pos in &frontier {
            for dir in DIRECTIONS {
                let Some(target) = executor::target_of(&current, pos, dir) else {
                    continue;
                };
                if table.get(target.x, target.y) == MAX_COST
                    && is_safe(&current, &staged_next, target)
                {
                    table.set(target.x, target.y, cost + 1);
                    next_frontier.push(target);
                }
            }
        }
        log::trace!(
            "cost table stage {cost} expanded {} cells into {}",
            frontier.len(),
            next_frontier.len()
        );
        frontier = next_frontier;
        current = staged_next;
        cost += 1;
    }
    table
}

/// `(x, y)` is safe to enter if, whenever the cell directly above it is
/// currently empty, the staged world one tick later still has no rock
/// there — i.e. nothing is about to fall into the robot the instant it
/// steps in.
fn is_safe(current: &World, staged_next: &World, pos: Pos) -> bool {
    if current.get(pos.x, pos.y + 1) == grid::EMPTY {
        staged_next.get(pos.x, pos.y + 1) != grid::ROCK
    } else {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cave_core::parser::parse;

    #[test]
    fn reaches_an_adjacent_empty_cell_at_cost_one() {
        let world = parse(b"R  \n\n").unwrap();
        let table = build_cost_table(&world, Pos::new(1, 1));
        assert_eq!(table.get(1, 1), 0);
        assert_eq!(table.get(2, 1), 1);
        assert_eq!(table.get(3, 1), 2);
    }

    #[test]
    fn wall_enclosed_cells_stay_unreachable() {
        let world = parse(b"#R#\n###\n").unwrap();
        let table = build_cost_table(&world, Pos::new(2, 2));
        assert_eq!(table.get(1, 2), MAX_COST);
    }

    #[test]
    fn unsafe_when_a_rock_is_about_to_land_directly_above() {
        let current = parse(b" * \n   \n   \n").unwrap();
        let staged_next = update::tick_ignoring_robot(&current);
        // (2,1)'s upper neighbor (2,2) is empty now but holds the rock
        // after one tick, so stepping onto (2,1) is unsafe.
        assert!(!is_safe(&current, &staged_next, Pos::new(2, 1)));
        // (1,1)'s upper neighbor never receives a rock.
        assert!(is_safe(&current, &staged_next, Pos::new(1, 1)));
    }
}
