use super::StrategyCalculator;
use crate::math::StatsHelper;
use crate::model::LapRecord;
use serde::{Deserialize, Serialize};

/// Fewer valid laps than this and the driver is left out of the analysis.
pub const MIN_VALID_LAPS: usize = 3;
/// Number of leading valid laps whose median forms the baseline.
pub const BASELINE_LAPS: usize = 5;

/// Degradation of one lap relative to the driver's early-race baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegradationPoint {
    pub driver_number: u32,
    pub lap_number: u32,
    pub lap_time_seconds: f64,
    pub baseline_seconds: f64,
    pub degradation_seconds: f64,
    pub degradation_pct: f64,
}

impl StrategyCalculator<'_> {
    /// Degradation series for every driver, or only `driver_number` when given.
    ///
    /// Output is grouped by driver in encounter order, ascending lap number
    /// within each group. Drivers with too few valid laps contribute nothing.
    pub fn degradation(&self, driver_number: Option<u32>) -> Vec<DegradationPoint> {
        let drivers = match driver_number {
            Some(number) => vec![number],
            None => self.laps().driver_numbers(),
        };

        let mut points = Vec::new();
        for driver in drivers {
            points.extend(self.driver_degradation(driver));
        }
        points
    }

    fn driver_degradation(&self, driver: u32) -> Vec<DegradationPoint> {
        let mut laps: Vec<&LapRecord> = self
            .laps()
            .for_driver(driver)
            .filter(|record| record.valid_lap_time().is_some())
            .collect();
        laps.sort_by_key(|record| record.lap_number);

        if laps.len() < MIN_VALID_LAPS {
            self.logger.data_gap(&format!(
                "driver {} has {} valid laps, skipping degradation",
                driver,
                laps.len()
            ));
            return Vec::new();
        }

        let leading: Vec<f64> = laps
            .iter()
            .take(BASELINE_LAPS)
            .filter_map(|record| record.valid_lap_time())
            .collect();
        let baseline = match StatsHelper::median(&leading) {
            Some(value) if value > 0.0 => value,
            _ => return Vec::new(),
        };

        laps.iter()
            .filter_map(|record| {
                let lap_time = record.valid_lap_time()?;
                let degradation_seconds = lap_time - baseline;
                Some(DegradationPoint {
                    driver_number: driver,
                    lap_number: record.lap_number,
                    lap_time_seconds: lap_time,
                    baseline_seconds: baseline,
                    degradation_seconds,
                    degradation_pct: degradation_seconds / baseline * 100.0,
                })
            })
            .collect()
    }
}
