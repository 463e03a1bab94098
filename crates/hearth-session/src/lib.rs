//! Session layer for Hearth: owns the live household state, loads it on
//! start, and writes it back through a debounced scheduler.
//!
//! Runs on tokio. The state container is owned by a single task; the
//! scheduler and suggestion requests are spawned tasks talking to it over
//! channels.

pub mod bootstrap;
pub mod error;
pub mod household;
pub mod scheduler;
pub mod suggest;

pub use bootstrap::{Boot, BootState, Bootstrapper};
pub use error::{Error, Result};
pub use household::Household;
pub use scheduler::{SyncConfig, SyncScheduler};
pub use suggest::{StaleGuard, Ticket};

#[cfg(test)]
mod tests;
