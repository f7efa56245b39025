//! The world snapshot: complete, self-contained simulation state at one
//! tick boundary.
//!
//! A [`World`] is a plain value type. It is never mutated after being
//! handed to a caller — [`crate::driver::make_one_move`] always clones
//! before applying the tick update, so the update rule can read an
//! immutable prior snapshot while writing a fresh one (§4.3 of the
//! design: two-snapshot model, not in-place mutation).

use std::fmt;

use crate::grid::{self, Grid};

/// Default consecutive underwater ticks the robot tolerates before
/// drowning, used when the `Waterproof` metadata key is absent.
pub const DEFAULT_ROBOT_WATERPROOFING: i32 = 10;
/// Default beard growth period, used when the `Growth` metadata key is
/// absent.
pub const DEFAULT_BEARD_GROWTH_RATE: i32 = 25;

/// A 1-based cell coordinate. `x` grows rightward, `y` grows upward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Pos {
    /// Column, 1-based.
    pub x: i32,
    /// Row, 1-based.
    pub y: i32,
}

impl Pos {
    /// Constructs a position.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Terminal condition of a world snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Condition {
    /// Simulation is ongoing.
    #[default]
    Running,
    /// The robot reached the open lift.
    Win,
    /// The robot was crushed or drowned.
    Lose,
    /// The robot issued an abort command.
    Abort,
}

impl Condition {
    /// Single-character encoding used by the reference implementation's
    /// dump routine (`N`/`W`/`L`/`A`).
    pub fn as_char(self) -> char {
        match self {
            Self::Running => 'N',
            Self::Win => 'W',
            Self::Lose => 'L',
            Self::Abort => 'A',
        }
    }

    /// `true` once the condition is anything other than [`Condition::Running`].
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Running)
    }
}

/// Trampoline/target bindings.
///
/// Modelled as parallel fixed-size arrays indexed by letter/digit
/// ordinal (`A..=I` -> `0..=8`, `1..=9` -> `0..=8`), plus a binding array
/// from trampoline ordinal to target ordinal. An absent binding or
/// position is `None` rather than a sentinel coordinate.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Trampolines {
    positions: [Option<Pos>; 9],
    target_positions: [Option<Pos>; 9],
    bindings: [Option<usize>; 9],
}

impl Trampolines {
    /// Records where trampoline letter ordinal `letter` sits in the grid.
    pub fn set_position(&mut self, letter: usize, pos: Pos) {
        self.positions[letter] = Some(pos);
    }

    /// Records where target digit ordinal `target` sits in the grid.
    pub fn set_target_position(&mut self, target: usize, pos: Pos) {
        self.target_positions[target] = Some(pos);
    }

    /// Binds trampoline letter ordinal `letter` to target ordinal `target`.
    pub fn bind(&mut self, letter: usize, target: usize) {
        self.bindings[letter] = Some(target);
    }

    /// The grid position of trampoline letter ordinal `letter`, if present.
    pub fn position(&self, letter: usize) -> Option<Pos> {
        self.positions[letter]
    }

    /// The target cell that trampoline letter ordinal `letter` teleports
    /// to, if bound.
    pub fn target_of(&self, letter: usize) -> Option<Pos> {
        self.bindings[letter].and_then(|t| self.target_positions[t])
    }

    /// Every trampoline letter ordinal currently bound to target ordinal
    /// `target`, including `letter` itself if it maps there.
    pub fn letters_bound_to(&self, target: usize) -> impl Iterator<Item = usize> + '_ {
        (0..9).filter(move |&l| self.bindings[l] == Some(target))
    }

    /// Clears the position and binding for trampoline letter ordinal
    /// `letter`. Does not touch the shared target or other trampolines.
    pub fn clear(&mut self, letter: usize) {
        self.positions[letter] = None;
        self.bindings[letter] = None;
    }

    /// Number of trampoline letters with an active binding.
    pub fn count(&self) -> u32 {
        self.bindings.iter().filter(|b| b.is_some()).count() as u32
    }

    /// The target ordinal trampoline letter ordinal `letter` is bound to.
    pub fn binding_of(&self, letter: usize) -> Option<usize> {
        self.bindings[letter]
    }
}

/// Complete, cloneable simulation state at one tick boundary.
///
/// See the crate-level documentation for the invariants this type
/// upholds across `Clone`, `PartialEq`, and every operation in
/// [`crate::executor`], [`crate::update`], and [`crate::driver`].
#[derive(Clone, Debug, PartialEq)]
pub struct World {
    grid: Grid,
    /// Robot column, 1-based. `0` if no robot was found while parsing.
    pub robot_x: i32,
    /// Robot row, 1-based. `0` if no robot was found while parsing.
    pub robot_y: i32,
    /// Lift column, 1-based.
    pub lift_x: i32,
    /// Lift row, 1-based.
    pub lift_y: i32,
    /// Row index at or below which the robot is underwater. `0` means no water.
    pub water_level: i32,
    /// Tick period at which `water_level` rises by one. `0` means no flooding.
    pub flooding_rate: i32,
    /// Maximum consecutive underwater ticks the robot tolerates.
    pub robot_waterproofing: i32,
    /// Consecutive ticks the robot has spent underwater so far.
    pub used_robot_waterproofing: i32,
    /// Tick period at which every beard cell grows. `0` means no growth.
    pub beard_growth_rate: i32,
    /// Razors currently carried by the robot.
    pub razor_count: i32,
    /// Total lambdas present at parse time. Never changes after that.
    pub lambda_count: i32,
    /// Lambdas collected so far. Monotonically non-decreasing.
    pub collected_lambda_count: i32,
    trampolines: Trampolines,
    /// Number of trampoline letters with an active binding.
    pub trampoline_count: u32,
    /// Commands executed so far.
    pub move_count: i64,
    /// Current score.
    pub score: i64,
    /// Terminal condition.
    pub condition: Condition,
}

impl World {
    /// Constructs an empty world of the given dimensions, robot absent,
    /// all counters at their spec-mandated defaults.
    pub(crate) fn new(width: i32, height: i32) -> Self {
        Self {
            grid: Grid::new(width, height),
            robot_x: 0,
            robot_y: 0,
            lift_x: 0,
            lift_y: 0,
            water_level: 0,
            flooding_rate: 0,
            robot_waterproofing: DEFAULT_ROBOT_WATERPROOFING,
            used_robot_waterproofing: 0,
            beard_growth_rate: DEFAULT_BEARD_GROWTH_RATE,
            razor_count: 0,
            lambda_count: 0,
            collected_lambda_count: 0,
            trampolines: Trampolines::default(),
            trampoline_count: 0,
            move_count: 0,
            score: 0,
            condition: Condition::Running,
        }
    }

    /// Grid width in cells.
    pub fn width(&self) -> i32 {
        self.grid.width()
    }

    /// Grid height in rows.
    pub fn height(&self) -> i32 {
        self.grid.height()
    }

    /// Bounds-checked cell read; out-of-range coordinates read as a wall.
    pub fn get(&self, x: i32, y: i32) -> u8 {
        self.grid.get(x, y)
    }

    /// Writes a cell. Caller must ensure `(x, y)` is in bounds.
    pub(crate) fn set(&mut self, x: i32, y: i32, value: u8) {
        self.grid.set(x, y, value);
    }

    /// The underlying grid buffer, rows separated by `\n`.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The robot's current position, regardless of whether it is still on
    /// the grid (see [`Condition`] for when this stops being meaningful).
    pub fn robot_pos(&self) -> Pos {
        Pos::new(self.robot_x, self.robot_y)
    }

    pub(crate) fn trampolines(&self) -> &Trampolines {
        &self.trampolines
    }

    pub(crate) fn trampolines_mut(&mut self) -> &mut Trampolines {
        &mut self.trampolines
    }

    /// Where trampoline letter `letter` (`b'A'..=b'I'`) teleports to, if bound.
    pub fn trampoline_target(&self, letter: u8) -> Option<Pos> {
        grid::trampoline_index(letter).and_then(|i| self.trampolines.target_of(i))
    }

    /// Clears the robot marker from the grid if it is still there.
    ///
    /// Used when a tick lands on [`Condition::Lose`] by drowning (no rock
    /// already overwrote the cell) and when the robot aborts, so that
    /// "exactly one `R` cell iff `condition` is `Running` or `Win`" holds
    /// on every snapshot the driver returns.
    pub(crate) fn clear_robot_marker(&mut self) {
        if self.get(self.robot_x, self.robot_y) == grid::ROBOT {
            self.set(self.robot_x, self.robot_y, grid::EMPTY);
        }
    }

    /// The score invariant: `25 * collected_lambda_count - move_count +
    /// bonus`, where `bonus` is `50 * collected_lambda_count` if
    /// `condition` is [`Condition::Win`], `25 * collected_lambda_count`
    /// if it is [`Condition::Abort`], and `0` otherwise.
    ///
    /// Exposed for the property tests in `tests/`; the driver maintains
    /// `score` incrementally rather than recomputing this each tick.
    pub fn expected_score(&self) -> i64 {
        let base = 25 * i64::from(self.collected_lambda_count) - self.move_count;
        let bonus = match self.condition {
            Condition::Win => 50 * i64::from(self.collected_lambda_count),
            Condition::Abort => 25 * i64::from(self.collected_lambda_count),
            Condition::Running | Condition::Lose => 0,
        };
        base + bonus
    }
}
