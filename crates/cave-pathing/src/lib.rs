//! Safety-aware cost table layered on top of [`cave_core`]'s pure
//! snapshot transitions.

#![deny(missing_docs)]
#![forbid(unsafe_code)]

pub mod cost_table;

pub use cost_table::{build_cost_table, CostTable, MAX_COST};
