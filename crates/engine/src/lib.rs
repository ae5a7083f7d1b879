pub mod cache;
pub mod config;
pub mod host;
pub mod launcher;
pub mod lifecycle;
pub mod snapshot;

pub use cache::{DelayedEvictionCache, TickOutcome};
pub use lifecycle::{Phase, ReopenReport, Relauncher, ShutdownOutcome};
