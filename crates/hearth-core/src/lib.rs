//! Core types and pure operations for the Hearth household organizer.
//!
//! This crate is deliberately free of database, HTTP, and runtime
//! dependencies. Every mutation is a pure function from the current
//! collection to a new one; publishing the result and persisting it is the
//! job of `hearth-session`.

pub mod collections;
pub mod error;
pub mod model;
pub mod navigation;
pub mod snapshot;
pub mod store;
pub mod suggestion;
pub mod views;

pub use error::{Error, Result};
pub use snapshot::Snapshot;
