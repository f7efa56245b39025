//! Core simulation engine for the cave-robot world: parsing, the move
//! executor, the world-update tick rule, and the driver that ties them
//! together into a step function over a command sequence.
//!
//! A [`world::World`] is an immutable-once-built value snapshot. Every
//! operation in this crate takes one snapshot and produces another; there
//! is no shared mutable simulation state anywhere in the public API.

#![deny(missing_docs)]
#![forbid(unsafe_code)]

pub mod driver;
pub mod error;
pub mod executor;
pub mod grid;
pub mod parser;
pub mod update;
pub mod world;

pub use driver::{make_moves, make_one_move};
pub use error::{InvalidCommand, ParseError};
pub use executor::{Command, Direction};
pub use grid::Grid;
pub use parser::parse;
pub use world::{Condition, Pos, World};
