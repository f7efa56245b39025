//! Converts an input text block into an initial [`World`] snapshot.
//!
//! Parsing has three phases, mirroring the reference implementation's
//! `scan_input` / `copy_input` / `copy_input_metadata`:
//!
//! 1. **Scan** a single pass measures `world_w` (the longest line before
//!    the first blank line) and `world_h` (the number of non-empty lines
//!    before it), so the grid buffer can be allocated once.
//! 2. **Copy** a second pass fills the grid, right-padding short lines
//!    with empty cells, and records the positions of the robot, the
//!    lift, every trampoline/target, and the lambda count.
//! 3. **Metadata** the remainder of the input, found immediately after
//!    the blank line, is whitespace-tokenized into key/value pairs.
//!
//! Parsing is total: an unrecognized metadata key discards exactly one
//! following token and parsing continues. The only failure mode is
//! allocation failure, surfaced as [`ParseError`].

use crate::error::ParseError;
use crate::grid::{self, LAMBDA, LIFT_CLOSED, ROBOT};
use crate::world::{Pos, World};

/// Parses `input` into an initial world snapshot.
pub fn parse(input: &[u8]) -> Result<World, ParseError> {
    let (world_w, world_h, map_end) = scan(input);
    let mut world = World::new(world_w, world_h);
    copy_map(&mut world, input, map_end);
    parse_metadata(&mut world, &input[map_end.min(input.len())..]);
    log::debug!(
        "parsed world {}x{}, robot at ({}, {}), {} lambdas, {} trampolines",
        world.width(),
        world.height(),
        world.robot_x,
        world.robot_y,
        world.lambda_count,
        world.trampoline_count,
    );
    Ok(world)
}

/// Phase A: measures `(world_w, world_h, metadata_start)`. `metadata_start`
/// is the byte offset immediately after the first blank line, or
/// `input.len()` if no blank line is present (the whole input is the map).
fn scan(input: &[u8]) -> (i32, i32, usize) {
    let mut max_w: i32 = 0;
    let mut h: i32 = 0;
    let mut w: i32 = 0;
    let n = input.len();
    for (i, &c) in input.iter().enumerate() {
        if c != b'\n' {
            w += 1;
        }
        if i == n - 1 || c == b'\n' {
            if w == 0 {
                return (max_w, h, i + 1);
            }
            max_w = max_w.max(w);
            h += 1;
            w = 0;
        }
    }
    (max_w, h, n)
}

/// Phase B: fills `world`'s grid from `input[..map_end]`, one row per
/// non-empty source line, right-padding short lines (already empty by
/// construction of [`World::new`], so short lines simply aren't
/// overwritten past their own length).
fn copy_map(world: &mut World, input: &[u8], map_end: usize) {
    let world_h = world.height();
    let mut row: i32 = 0;
    let mut col: i32 = 0;
    let mut w: i32 = 0;
    let end = map_end.min(input.len());
    let mut i = 0usize;
    while i < end && row < world_h {
        let c = input[i];
        if c != b'\n' {
            place_cell(world, col + 1, world_h - row, c);
            col += 1;
            w += 1;
        }
        if i == end - 1 || c == b'\n' {
            if w == 0 {
                break;
            }
            row += 1;
            col = 0;
            w = 0;
        }
        i += 1;
    }
}

fn place_cell(world: &mut World, x: i32, y: i32, c: u8) {
    match c {
        ROBOT => {
            world.robot_x = x;
            world.robot_y = y;
            world.set(x, y, ROBOT);
        }
        LAMBDA => {
            world.lambda_count += 1;
            world.set(x, y, LAMBDA);
        }
        LIFT_CLOSED => {
            world.lift_x = x;
            world.lift_y = y;
            world.set(x, y, LIFT_CLOSED);
        }
        c if grid::is_trampoline(c) => {
            let idx = grid::trampoline_index(c).expect("checked above");
            world.trampolines_mut().set_position(idx, Pos::new(x, y));
            world.set(x, y, c);
        }
        c if grid::is_target(c) => {
            let idx = grid::target_index(c).expect("checked above");
            world
                .trampolines_mut()
                .set_target_position(idx, Pos::new(x, y));
            world.set(x, y, c);
        }
        other => world.set(x, y, other),
    }
}

/// Phase C: whitespace-tokenizes the metadata block.
fn parse_metadata(world: &mut World, input: &[u8]) {
    let text = std::str::from_utf8(input).unwrap_or_default();
    let mut tokens = text.split_whitespace();
    while let Some(key) = tokens.next() {
        match key {
            "Water" => assign(&mut world.water_level, tokens.next()),
            "Flooding" => assign(&mut world.flooding_rate, tokens.next()),
            "Waterproof" => assign(&mut world.robot_waterproofing, tokens.next()),
            "Growth" => assign(&mut world.beard_growth_rate, tokens.next()),
            "Razors" => assign(&mut world.razor_count, tokens.next()),
            "Trampoline" => bind_trampoline(world, tokens.next(), tokens.next(), tokens.next()),
            other => {
                log::debug!("ignoring unrecognized metadata key {other:?}");
                tokens.next();
            }
        }
    }
    world.trampoline_count = world.trampolines().count();
}

fn assign(field: &mut i32, token: Option<&str>) {
    if let Some(v) = token.and_then(|t| t.parse::<i32>().ok()) {
        *field = v;
    }
}

fn bind_trampoline(
    world: &mut World,
    letter: Option<&str>,
    _targets_keyword: Option<&str>,
    digit: Option<&str>,
) {
    let Some(letter_idx) = letter
        .and_then(|l| l.as_bytes().first().copied())
        .and_then(grid::trampoline_index)
    else {
        return;
    };
    let Some(target_idx) = digit
        .and_then(|d| d.as_bytes().first().copied())
        .and_then(grid::target_index)
    else {
        return;
    };
    world.trampolines_mut().bind(letter_idx, target_idx);
}
