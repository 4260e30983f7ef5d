//! A headless windowed-rendering engine for large tables.
//!
//! Instead of laying out every row of a long table, the table keeps only the rows around the
//! viewport displayed. Rows that leave the viewport are hidden and handed to one of two
//! "fillers": spacer elements above and below the visible window whose heights approximate the
//! space taken by the rows they stand in for.
//!
//! It is UI-agnostic. A host UI tree is expected to provide (see [`TableHost`]):
//! - child enumeration and a node classification (body, fillers, rows)
//! - layout metrics (offsets, heights, scroll container geometry)
//! - row visibility and spacer height mutation
//! - a typed order key per row
//!
//! For an in-memory host tree and a frame controller, see the `filler-table-adapter` crate.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod error;
mod filler;
mod host;
mod options;
mod order;
mod state;
mod table;
mod types;

#[cfg(test)]
mod tests;

pub use error::TableError;
pub use filler::{Filler, HiddenRow};
pub use host::TableHost;
pub use options::TableOptions;
pub use order::OrderTracker;
pub use state::ViewportState;
pub use table::FillerTable;
pub use types::{CycleReport, FillerSide, NodeKind, OrderKey, ScrollViewport, UpdateOutcome};
