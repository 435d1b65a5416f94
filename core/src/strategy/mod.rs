//! Strategy heuristics over a loaded lap table: tire degradation, pit window,
//! undercut feasibility and per-driver summaries.
//!
//! The thresholds in this module are fixed policy constants, not tunables.

pub mod degradation;
pub mod pit_window;
pub mod summary;
pub mod undercut;

pub use degradation::DegradationPoint;
pub use pit_window::{PitRecommendation, PitWindowRequest, Urgency};
pub use summary::{DegradationSummary, StrategySummary, TireTrend, TireTrendSummary};
pub use undercut::UndercutAssessment;

use crate::model::LapTable;
use crate::telemetry::log::LogManager;

/// Lap time increase over baseline, in percent, that marks a lap as critical.
pub const CRITICAL_DEGRADATION_PCT: f64 = 2.0;

/// Strategy calculator bound to one lap table snapshot.
///
/// Holds no mutable state: repeated calls with the same table give identical answers.
pub struct StrategyCalculator<'a> {
    laps: &'a LapTable,
    logger: LogManager,
}

impl<'a> StrategyCalculator<'a> {
    pub fn new(laps: &'a LapTable) -> Self {
        Self {
            laps,
            logger: LogManager::new("strategy"),
        }
    }

    pub fn laps(&self) -> &'a LapTable {
        self.laps
    }
}
