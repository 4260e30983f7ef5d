//! Host-side utilities for the `filler-table` crate.
//!
//! The `filler-table` crate is UI-agnostic and only talks to a host through `TableHost`. This
//! crate provides small, framework-neutral pieces a host commonly needs:
//!
//! - An in-memory arena UI tree with generation-counted handles and stacked block layout
//! - A per-frame controller that keeps the table notified of structural changes
//! - Data-range windowing for uniformly sized lists
//! - The player-list sample data model (fake players, filtering, sorting, churn)
//!
//! This crate is intentionally framework-agnostic (no RmlUi/egui bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod arena;
mod controller;
mod error;
mod players;
mod window;


pub use arena::{ArenaTable, NodeId};
pub use controller::TableController;
pub use error::AdapterError;
pub use players::{PlayerEntry, PlayerList, TagColor, UPDATE_INTERVAL_MS};
pub use window::DataWindow;
