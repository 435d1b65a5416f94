//! Replay and strategy-heuristics core for the pitwall race-engineer dashboard.
//!
//! The crate turns a flat table of per-lap timing records into a time-indexed
//! race projection plus derived strategy signals (tire degradation, pit window,
//! undercut feasibility, weather impact). Every computation is synchronous and
//! reads the tables by reference; data gaps surface as [`Advisory::Unavailable`]
//! rather than errors.

pub mod math;
pub mod model;
pub mod prelude;
pub mod replay;
pub mod strategy;
pub mod telemetry;
pub mod weather;

pub use prelude::{Advisory, AdvisoryReason};
