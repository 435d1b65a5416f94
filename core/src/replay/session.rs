use super::clock::{Clock, SystemClock};
use super::state::RaceState;
use crate::math::StatsHelper;
use crate::model::LapTable;
use crate::prelude::{Advisory, AdvisoryReason};
use crate::telemetry::log::LogManager;
use std::time::Instant;

/// Lap ceiling when the table carries no lap numbers at all.
pub const DEFAULT_LAP_CAP: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq)]
enum ReplayPhase {
    Stopped,
    Running {
        started_at: Instant,
        speed_multiplier: f64,
    },
}

/// One caller-owned replay session.
///
/// The session is passed explicitly to every query; separate sessions over the
/// same table never interfere. Stopping is the caller's business: it simply
/// stops polling.
pub struct ReplaySession<C: Clock = SystemClock> {
    clock: C,
    phase: ReplayPhase,
    current_lap: u32,
    logger: LogManager,
}

impl ReplaySession<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for ReplaySession<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> ReplaySession<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            phase: ReplayPhase::Stopped,
            current_lap: 1,
            logger: LogManager::new("replay"),
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Starts (or restarts) the replay from lap 1 at `speed_multiplier` race
    /// seconds per wall-clock second.
    pub fn start(&mut self, speed_multiplier: f64) {
        self.phase = ReplayPhase::Running {
            started_at: self.clock.now(),
            speed_multiplier,
        };
        self.current_lap = 1;
        self.logger
            .record(&format!("replay started at {}x", speed_multiplier));
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, ReplayPhase::Running { .. })
    }

    /// Last projected lap; 1 until the first query after start.
    pub fn current_lap(&self) -> u32 {
        self.current_lap
    }

    /// Simulated race seconds since start.
    pub fn elapsed_race_seconds(&self) -> Option<f64> {
        match self.phase {
            ReplayPhase::Running {
                started_at,
                speed_multiplier,
            } => {
                let wall = self.clock.now().saturating_duration_since(started_at);
                Some(wall.as_secs_f64() * speed_multiplier)
            }
            ReplayPhase::Stopped => None,
        }
    }

    /// Projects the race at the current instant.
    ///
    /// The lap is paced by the median valid lap time and capped at the highest
    /// lap in the table. Without a usable median the previous lap is kept.
    pub fn query_state(&mut self, table: &LapTable) -> Advisory<RaceState> {
        let Some(elapsed) = self.elapsed_race_seconds() else {
            return Advisory::Unavailable(AdvisoryReason::SimulationStopped);
        };

        match StatsHelper::median(&table.valid_lap_times()) {
            Some(pace) if pace > 0.0 => {
                let cap = table.max_lap_number().unwrap_or(DEFAULT_LAP_CAP);
                let laps_done = (elapsed / pace).floor() as u64;
                self.current_lap = laps_done.saturating_add(1).min(u64::from(cap)) as u32;
            }
            _ => self.logger.data_gap("no valid lap times to pace the replay"),
        }

        Advisory::Available(RaceState::at_lap(table, self.current_lap, elapsed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LapRecord;
    use crate::replay::clock::ManualClock;
    use std::time::Duration;

    fn table(max_lap: u32) -> LapTable {
        let mut records = Vec::new();
        for lap in 1..=max_lap {
            records.push(LapRecord::new(1, lap, Some(90.0)));
            records.push(LapRecord::new(2, lap, Some(89.0 + lap as f64 % 3.0)));
            records.push(LapRecord::new(3, lap, Some(91.0)));
        }
        LapTable::new(records)
    }

    #[test]
    fn stopped_session_has_no_state() {
        let mut session = ReplaySession::with_clock(ManualClock::new());
        assert!(!session.is_running());
        assert_eq!(
            session.query_state(&table(3)).reason(),
            Some(AdvisoryReason::SimulationStopped)
        );
    }

    #[test]
    fn elapsed_time_scales_by_multiplier() {
        let table = table(70);
        let mut session = ReplaySession::with_clock(ManualClock::new());
        session.start(60.0);
        session.clock().advance(Duration::from_secs(95));

        let state = session.query_state(&table).into_available().unwrap();
        assert_eq!(state.elapsed_seconds, 5700.0);
        assert_eq!(state.current_lap, 64);
        assert_eq!(state.elapsed_formatted, "95:00.000");
        assert_eq!(state.positions.len(), 3);
        assert_eq!(session.current_lap(), 64);
    }

    #[test]
    fn lap_is_capped_at_table_maximum() {
        let table = table(20);
        let mut session = ReplaySession::with_clock(ManualClock::new());
        session.start(60.0);
        session.clock().advance(Duration::from_secs(95));
        assert_eq!(session.query_state(&table).into_available().unwrap().current_lap, 20);
    }

    #[test]
    fn restart_resets_to_lap_one() {
        let table = table(10);
        let mut session = ReplaySession::with_clock(ManualClock::new());
        session.start(10.0);
        session.clock().advance(Duration::from_secs(30));
        assert_eq!(session.query_state(&table).into_available().unwrap().current_lap, 4);

        session.start(10.0);
        assert_eq!(session.current_lap(), 1);
        assert_eq!(session.query_state(&table).into_available().unwrap().current_lap, 1);
    }

    #[test]
    fn unpaced_table_keeps_previous_lap() {
        let table = LapTable::new(vec![LapRecord::new(1, 1, None), LapRecord::new(1, 2, None)]);
        let mut session = ReplaySession::with_clock(ManualClock::new());
        session.start(60.0);
        session.clock().advance(Duration::from_secs(600));
        let state = session.query_state(&table).into_available().unwrap();
        assert_eq!(state.current_lap, 1);
        assert_eq!(state.positions.len(), 1);
    }

    #[test]
    fn sessions_are_independent() {
        let table = table(30);
        let mut fast = ReplaySession::with_clock(ManualClock::new());
        let mut slow = ReplaySession::with_clock(ManualClock::new());
        fast.start(90.0);
        slow.start(1.0);
        fast.clock().advance(Duration::from_secs(10));
        slow.clock().advance(Duration::from_secs(10));

        assert_eq!(fast.query_state(&table).into_available().unwrap().current_lap, 11);
        assert_eq!(slow.query_state(&table).into_available().unwrap().current_lap, 1);
    }
}
