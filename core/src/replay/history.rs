use super::clock::Clock;
use super::session::ReplaySession;
use crate::math::StatsHelper;
use crate::model::{LapRecord, LapTable};
use crate::prelude::{Advisory, AdvisoryReason};
use serde::{Deserialize, Serialize};

/// Per-driver figures over the laps completed so far in the replay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverStats {
    pub driver_number: u32,
    pub laps_completed: usize,
    pub best_lap_seconds: Option<f64>,
    pub avg_lap_seconds: Option<f64>,
    pub last_lap_seconds: Option<f64>,
    pub avg_speed_kph: Option<f64>,
    pub top_speed_kph: Option<f64>,
}

/// Records with `lap_number <= through_lap`, optionally for one driver, in table order.
pub fn lap_history(
    table: &LapTable,
    driver_number: Option<u32>,
    through_lap: u32,
) -> Vec<&LapRecord> {
    table
        .records()
        .iter()
        .filter(|record| record.lap_number <= through_lap)
        .filter(|record| driver_number.map_or(true, |number| record.driver_number == number))
        .collect()
}

impl DriverStats {
    pub fn through_lap(
        table: &LapTable,
        driver_number: u32,
        through_lap: u32,
    ) -> Advisory<DriverStats> {
        let history = lap_history(table, Some(driver_number), through_lap);
        let Some(last) = history.last() else {
            return Advisory::Unavailable(AdvisoryReason::DriverNotFound);
        };

        let lap_times: Vec<f64> = history.iter().filter_map(|r| r.valid_lap_time()).collect();
        let speeds: Vec<f64> = history
            .iter()
            .filter_map(|r| r.speed_kph)
            .filter(|v| v.is_finite())
            .collect();
        let top_speeds: Vec<f64> = history
            .iter()
            .filter_map(|r| r.top_speed_kph)
            .filter(|v| v.is_finite())
            .collect();

        Advisory::Available(DriverStats {
            driver_number,
            laps_completed: history.len(),
            best_lap_seconds: StatsHelper::min(&lap_times),
            avg_lap_seconds: StatsHelper::mean(&lap_times),
            last_lap_seconds: last.valid_lap_time(),
            avg_speed_kph: StatsHelper::mean(&speeds),
            top_speed_kph: StatsHelper::max(&top_speeds),
        })
    }
}

impl<C: Clock> ReplaySession<C> {
    /// Records up to the session's current lap.
    pub fn lap_history<'t>(
        &self,
        table: &'t LapTable,
        driver_number: Option<u32>,
    ) -> Vec<&'t LapRecord> {
        lap_history(table, driver_number, self.current_lap())
    }

    pub fn driver_stats(&self, table: &LapTable, driver_number: u32) -> Advisory<DriverStats> {
        DriverStats::through_lap(table, driver_number, self.current_lap())
    }
}
