//! The simultaneous tick rule: rock falls, beard growth, lift opening,
//! drowning, and flooding, all resolved from one read-only snapshot
//! (`prior`) into a freshly cloned one (`next`).
//!
//! Every cell predicate in this module reads `prior`; every mutation
//! writes `next`. This is deliberate (§4.3 of the design): computing a
//! rock's new resting place from a buffer that earlier rocks in the same
//! pass have already moved would make results depend on iteration order.
//! Reading exclusively from `prior` keeps the tick order-independent for
//! rules 1-4 and 6. Rule 5 (beard growth) is the one exception — it reads
//! `next`, so beards cascade within a single tick, matching the reference
//! implementation.

use crate::grid::{BEARD, EMPTY, LAMBDA, LIFT_CLOSED, LIFT_OPEN, ROCK};
use crate::world::{Condition, World};

/// Applies one tick to `prior`, returning the successor snapshot.
///
/// Must only be called when `prior.condition` is `Running` — the driver
/// enforces this by never ticking after a `Win` or `Abort` executor step.
pub fn tick(prior: &World) -> World {
    debug_assert!(!prior.condition.is_terminal());
    let mut next = prior.clone();
    let crushed = run_cell_rules(prior, &mut next, true, true);
    if crushed {
        next.condition = Condition::Lose;
        log::debug!("robot crushed by a falling rock");
    }
    apply_drowning(prior, &mut next);
    apply_flooding(&mut next);
    if next.condition == Condition::Lose {
        next.clear_robot_marker();
    }
    next
}

/// The cost table's staged-world advance: rock falls and lift opening
/// only, no crush detection, no beard growth, no drowning or flooding.
/// Treats the robot as a ghost, per §4.5 of the design.
pub fn tick_ignoring_robot(prior: &World) -> World {
    let mut next = prior.clone();
    run_cell_rules(prior, &mut next, false, false);
    next
}

/// Runs rules 1-4 (rock fall/slide) and 6 (lift opens) for every cell,
/// plus rule 5 (beard growth) when `grow_beard`. Returns whether any
/// rock placement crushed the robot (only tracked when `detect_crush`).
fn run_cell_rules(prior: &World, next: &mut World, detect_crush: bool, grow_beard: bool) -> bool {
    let mut crushed = false;
    for y in 1..=prior.height() {
        for x in 1..=prior.width() {
            let c = prior.get(x, y);
            if c == ROCK {
                crushed |= apply_rock_rule(prior, next, x, y, detect_crush);
            } else if c == LIFT_CLOSED && prior.collected_lambda_count == prior.lambda_count {
                next.set(x, y, LIFT_OPEN);
                log::debug!("lift opened at ({x}, {y})");
            } else if grow_beard
                && c == BEARD
                && prior.beard_growth_rate > 0
                && prior.move_count % i64::from(prior.beard_growth_rate) == 0
            {
                grow_beard_around(next, x, y);
            }
        }
    }
    crushed
}

/// One rock at `(x, y)` in `prior`. Rules 1-4 are mutually exclusive by
/// their own preconditions, so this is a simple cascade of early returns.
/// Returns whether the robot sits directly below the rock's new resting
/// place — the reference implementation's one-tick-early crush signal.
fn apply_rock_rule(prior: &World, next: &mut World, x: i32, y: i32, detect_crush: bool) -> bool {
    let below = prior.get(x, y - 1);
    if below == EMPTY {
        next.set(x, y, EMPTY);
        next.set(x, y - 1, ROCK);
        return detect_crush && prior.robot_x == x && prior.robot_y == y - 2;
    }
    if below == ROCK {
        if prior.get(x + 1, y) == EMPTY && prior.get(x + 1, y - 1) == EMPTY {
            next.set(x, y, EMPTY);
            next.set(x + 1, y - 1, ROCK);
            return detect_crush && prior.robot_x == x + 1 && prior.robot_y == y - 2;
        }
        if prior.get(x - 1, y) == EMPTY && prior.get(x - 1, y - 1) == EMPTY {
            next.set(x, y, EMPTY);
            next.set(x - 1, y - 1, ROCK);
            return detect_crush && prior.robot_x == x - 1 && prior.robot_y == y - 2;
        }
        return false;
    }
    if below == LAMBDA && prior.get(x + 1, y) == EMPTY && prior.get(x + 1, y - 1) == EMPTY {
        next.set(x, y, EMPTY);
        next.set(x + 1, y - 1, ROCK);
        return detect_crush && prior.robot_x == x + 1 && prior.robot_y == y - 2;
    }
    false
}

fn grow_beard_around(next: &mut World, x: i32, y: i32) {
    for dy in -1..=1 {
        for dx in -1..=1 {
            let (nx, ny) = (x + dx, y + dy);
            if next.get(nx, ny) == EMPTY {
                next.set(nx, ny, BEARD);
            }
        }
    }
}

fn apply_drowning(prior: &World, next: &mut World) {
    if prior.robot_y <= prior.water_level {
        next.used_robot_waterproofing += 1;
        log::debug!(
            "robot underwater, used waterproofing = {}",
            next.used_robot_waterproofing
        );
        if next.used_robot_waterproofing > next.robot_waterproofing {
            next.condition = Condition::Lose;
            log::debug!("robot drowned");
        }
    }
}

fn apply_flooding(world: &mut World) {
    if world.flooding_rate > 0 && world.move_count % i64::from(world.flooding_rate) == 0 {
        world.water_level += 1;
        log::debug!("water level rose to {}", world.water_level);
    }
}
