//! Applies one command to a snapshot, mutating only the robot-visible
//! aspects: grid cell replacements, robot position, counters, `score`,
//! `move_count`, and `condition`. Never advances rock falls, beard
//! growth, drowning, or flooding — that is [`crate::update`]'s job.

use crate::grid::{self, BEARD, EMPTY, LAMBDA, LIFT_OPEN, RAZOR, ROBOT};
use crate::world::{Condition, Pos, World};

/// One of the four cardinal directions a [`Command::Move`] can name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Decreasing `x`.
    Left,
    /// Increasing `x`.
    Right,
    /// Increasing `y`.
    Up,
    /// Decreasing `y`.
    Down,
}

impl Direction {
    fn delta(self) -> (i32, i32) {
        match self {
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
            Self::Up => (0, 1),
            Self::Down => (0, -1),
        }
    }

    /// `true` for the two directions that can push a rock.
    fn can_push(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

/// A single robot command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Step one cell in a cardinal direction.
    Move(Direction),
    /// Stay in place.
    Wait,
    /// Clear nearby beard cells, consuming a razor.
    Shave,
    /// End the simulation immediately, banking a partial bonus.
    Abort,
}

impl Command {
    /// Decodes a command byte (`L R U D W S A`). Any other byte is rejected.
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            b'L' => Some(Self::Move(Direction::Left)),
            b'R' => Some(Self::Move(Direction::Right)),
            b'U' => Some(Self::Move(Direction::Up)),
            b'D' => Some(Self::Move(Direction::Down)),
            b'W' => Some(Self::Wait),
            b'S' => Some(Self::Shave),
            b'A' => Some(Self::Abort),
            _ => None,
        }
    }
}

/// Where the robot would end up entering `dir` from `from`, without
/// mutating `world` or accounting for any side effect the move would
/// cause (counters, rock displacement, trampoline clearing).
///
/// Returns `None` if the move is rejected: the destination is neither
/// enterable nor a valid rock push. Used both by [`execute`] (for the
/// real robot) and by the cost table (for a robot imagined at an
/// arbitrary cell), which is why it is public and pure.
pub fn target_of(world: &World, from: Pos, dir: Direction) -> Option<Pos> {
    let (dx, dy) = dir.delta();
    let to = Pos::new(from.x + dx, from.y + dy);
    let content = world.get(to.x, to.y);
    if grid::is_enterable(content) {
        if grid::is_trampoline(content) {
            return world.trampoline_target(content);
        }
        return Some(to);
    }
    if content == grid::ROCK && dir.can_push() {
        let beyond = Pos::new(to.x + dx, to.y);
        if world.get(beyond.x, beyond.y) == EMPTY {
            return Some(to);
        }
    }
    None
}

/// Executes one command on `world`, which must be in the `Running`
/// condition. Mutates `world` in place.
pub fn execute(world: &mut World, cmd: Command) {
    debug_assert!(!world.condition.is_terminal());
    match cmd {
        Command::Move(dir) => execute_move(world, dir),
        Command::Wait => {
            log::trace!("robot waited");
            world.move_count += 1;
            world.score -= 1;
        }
        Command::Shave => execute_shave(world),
        Command::Abort => execute_abort(world),
    }
}

fn execute_move(world: &mut World, dir: Direction) {
    let from = world.robot_pos();
    let (dx, dy) = dir.delta();
    let to = Pos::new(from.x + dx, from.y + dy);
    let content = world.get(to.x, to.y);
    if grid::is_enterable(content) {
        if grid::is_trampoline(content) {
            teleport(world, from, content);
        } else {
            enter(world, from, to, content);
        }
    } else if content == grid::ROCK && dir.can_push() {
        let beyond = Pos::new(to.x + dx, to.y);
        if world.get(beyond.x, beyond.y) == EMPTY {
            push_rock(world, from, to, beyond);
        }
    }
    world.move_count += 1;
    world.score -= 1;
}

fn enter(world: &mut World, from: Pos, to: Pos, content: u8) {
    match content {
        LAMBDA => {
            move_robot(world, from, to);
            world.collected_lambda_count += 1;
            world.score += 25;
            log::debug!("robot collected a lambda at {to}");
        }
        LIFT_OPEN => {
            move_robot(world, from, to);
            world.score += 50 * i64::from(world.collected_lambda_count);
            world.condition = Condition::Win;
            log::debug!("robot reached the open lift and won");
        }
        RAZOR => {
            move_robot(world, from, to);
            world.razor_count += 1;
            log::debug!("robot picked up a razor at {to}");
        }
        _ => move_robot(world, from, to), // empty or earth
    }
}

fn teleport(world: &mut World, from: Pos, letter: u8) {
    let Some(letter_idx) = grid::trampoline_index(letter) else {
        return;
    };
    let Some(to) = world.trampolines().target_of(letter_idx) else {
        return;
    };
    world.set(from.x, from.y, EMPTY);
    clear_trampolines_sharing_target(world, letter_idx);
    world.robot_x = to.x;
    world.robot_y = to.y;
    world.set(to.x, to.y, ROBOT);
    restore_waterproofing(world, to.y);
    log::debug!("robot teleported via trampoline {} to {to}", letter as char);
}

/// Every trampoline bound to the same target as trampoline `letter_idx`
/// (including `letter_idx` itself) is cleared: its cell becomes empty
/// and its binding is dropped.
fn clear_trampolines_sharing_target(world: &mut World, letter_idx: usize) {
    let Some(target_idx) = world.trampolines().binding_of(letter_idx) else {
        return;
    };
    let sharing: Vec<usize> = world.trampolines().letters_bound_to(target_idx).collect();
    for l in sharing {
        if let Some(pos) = world.trampolines().position(l) {
            world.set(pos.x, pos.y, EMPTY);
        }
        world.trampolines_mut().clear(l);
    }
    world.trampoline_count = world.trampolines().count();
}

fn push_rock(world: &mut World, from: Pos, to: Pos, beyond: Pos) {
    world.set(beyond.x, beyond.y, grid::ROCK);
    move_robot(world, from, to);
    log::debug!("robot pushed a rock from {to} to {beyond}");
}

fn move_robot(world: &mut World, from: Pos, to: Pos) {
    world.set(from.x, from.y, EMPTY);
    world.robot_x = to.x;
    world.robot_y = to.y;
    world.set(to.x, to.y, ROBOT);
    restore_waterproofing(world, to.y);
}

fn restore_waterproofing(world: &mut World, y: i32) {
    if y > world.water_level {
        world.used_robot_waterproofing = 0;
    }
}

fn execute_shave(world: &mut World) {
    if world.razor_count > 0 {
        let center = world.robot_pos();
        for dy in -1..=1 {
            for dx in -1..=1 {
                let (x, y) = (center.x + dx, center.y + dy);
                if world.get(x, y) == BEARD {
                    world.set(x, y, EMPTY);
                }
            }
        }
        world.razor_count -= 1;
        log::debug!("robot shaved the beards around {center}");
    }
    world.move_count += 1;
    world.score -= 1;
}

fn execute_abort(world: &mut World) {
    world.score += 25 * i64::from(world.collected_lambda_count);
    world.condition = Condition::Abort;
    world.clear_robot_marker();
    log::debug!("robot aborted with score {}", world.score);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn collect_lambda_and_enter_open_lift() {
        // The world-update tick is the only thing that turns `L` into `O`
        // (crate::update), so this test seeds an already-open lift to
        // exercise the executor's entry logic in isolation; the full
        // "walk up to a closed lift, it opens, then win" path is covered
        // by the driver's integration test.
        let mut world = parse(b"#R \\O#\n\n").unwrap();
        for b in b"RR" {
            execute(&mut world, Command::from_byte(*b).unwrap());
        }
        assert_eq!(world.collected_lambda_count, 1);
        execute(&mut world, Command::Move(Direction::Right));
        assert_eq!(world.condition, Condition::Win);
        assert_eq!(world.score, 25 + 50 - 3);
    }

    #[test]
    fn push_rock_right() {
        let mut world = parse(b"# R*  #\n\n").unwrap();
        execute(&mut world, Command::Move(Direction::Right));
        assert_eq!(world.score, -1);
        assert_eq!(world.get(4, 1), ROBOT);
        assert_eq!(world.get(5, 1), grid::ROCK);
    }

    #[test]
    fn shave_clears_beard_and_spends_razor() {
        let mut world = parse(b"RW#\n\nRazors 1\n").unwrap();
        execute(&mut world, Command::Shave);
        assert_eq!(world.get(2, 1), EMPTY);
        assert_eq!(world.razor_count, 0);
        assert_eq!(world.move_count, 1);
        assert_eq!(world.score, -1);
    }

    #[test]
    fn abort_banks_partial_bonus_and_clears_robot() {
        let mut world = parse(b"R\\#\n\n").unwrap();
        execute(&mut world, Command::Move(Direction::Right));
        let score_before = world.score;
        execute(&mut world, Command::Abort);
        assert_eq!(world.score - score_before, 25 * i64::from(world.collected_lambda_count));
        assert_eq!(world.condition, Condition::Abort);
        assert_eq!(world.get(world.robot_x, world.robot_y), EMPTY);
    }

    #[test]
    fn trampoline_teleport_clears_all_sharing_the_target() {
        let input = b"RAB  1\n\nTrampoline A targets 1\nTrampoline B targets 1\n";
        let mut world = parse(input).unwrap();
        execute(&mut world, Command::Move(Direction::Right));
        assert_eq!(world.robot_x, 6);
        assert_eq!(world.trampoline_count, 0);
        assert_eq!(world.get(2, 1), EMPTY);
        assert_eq!(world.get(3, 1), EMPTY);
    }
}
