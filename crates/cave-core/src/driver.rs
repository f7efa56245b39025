//! Runs a command sequence against a world: one executor step followed
//! by one tick, short-circuiting once the world reaches a terminal
//! condition.

use crate::error::InvalidCommand;
use crate::executor::{self, Command};
use crate::update;
use crate::world::World;

/// Applies a single command byte to `world`, returning the successor
/// snapshot.
///
/// If `world.condition` is already terminal, returns a clone of `world`
/// unchanged — terminal snapshots absorb further moves rather than
/// panicking, since a caller driving a whole command string one byte at
/// a time should not need to special-case the stopping point itself.
pub fn make_one_move(world: &World, cmd: Command) -> World {
    if world.condition.is_terminal() {
        return world.clone();
    }
    let mut after_move = world.clone();
    executor::execute(&mut after_move, cmd);
    if after_move.condition.is_terminal() {
        return after_move;
    }
    update::tick(&after_move)
}

/// Runs every byte of `moves` through [`make_one_move`], stopping at the
/// first unrecognized byte or the first terminal snapshot, whichever
/// comes first.
///
/// Returns the last snapshot reached on `Ok`. An unrecognized byte is
/// reported via `Err`, carrying the snapshot reached just before it
/// alongside the offending byte and its index in `moves`.
pub fn make_moves(world: &World, moves: &[u8]) -> Result<World, Box<(World, InvalidCommand)>> {
    let mut current = world.clone();
    for (index, &byte) in moves.iter().enumerate() {
        if current.condition.is_terminal() {
            break;
        }
        let Some(cmd) = Command::from_byte(byte) else {
            return Err(Box::new((current, InvalidCommand { byte, index })));
        };
        current = make_one_move(&current, cmd);
    }
    Ok(current)
}
