use super::StrategyCalculator;
use crate::model::rank_by_lap_time;
use crate::prelude::{Advisory, AdvisoryReason};
use serde::{Deserialize, Serialize};

/// Assumed lap-time gain per lap on fresh tires.
pub const FRESH_TIRE_GAIN_PER_LAP: f64 = 0.5;
/// Laps over which the fresh-tire gain accrues.
pub const UNDERCUT_WINDOW_LAPS: u32 = 2;
pub const PIT_STOP_TIME_SECONDS: f64 = 30.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UndercutAssessment {
    pub feasible: bool,
    pub current_position: u32,
    pub target_position: u32,
    pub gap_to_target_seconds: f64,
    pub potential_gain_seconds: f64,
    pub net_advantage_seconds: f64,
    pub recommendation: String,
}

impl StrategyCalculator<'_> {
    /// Whether pitting now could take `target_position` from the driver's current spot.
    ///
    /// Positions come from ranking the current lap's times, fastest first.
    pub fn undercut(
        &self,
        driver_number: u32,
        target_position: u32,
        current_lap: u32,
    ) -> Advisory<UndercutAssessment> {
        if self.laps().is_empty() {
            return Advisory::Unavailable(AdvisoryReason::NoData);
        }

        let ranked = rank_by_lap_time(self.laps().for_lap(current_lap));
        if ranked.is_empty() {
            return Advisory::Unavailable(AdvisoryReason::NoCurrentLapData);
        }

        let Some(driver_index) = ranked
            .iter()
            .position(|record| record.driver_number == driver_number)
        else {
            return Advisory::Unavailable(AdvisoryReason::DriverNotFound);
        };
        let current_position = driver_index as u32 + 1;
        if current_position <= target_position {
            return Advisory::Unavailable(AdvisoryReason::AlreadyAheadOfTarget);
        }

        let Some(target) = (target_position as usize)
            .checked_sub(1)
            .and_then(|index| ranked.get(index))
        else {
            return Advisory::Unavailable(AdvisoryReason::TargetNotFound);
        };

        let (Some(own_time), Some(target_time)) = (
            ranked[driver_index].valid_lap_time(),
            target.valid_lap_time(),
        ) else {
            return Advisory::Unavailable(AdvisoryReason::MissingLapTime);
        };

        let gap = own_time - target_time;
        let potential_gain = FRESH_TIRE_GAIN_PER_LAP * f64::from(UNDERCUT_WINDOW_LAPS);
        let feasible = potential_gain > gap + PIT_STOP_TIME_SECONDS;

        self.logger.record(&format!(
            "undercut driver {} P{} -> P{} gap {:.3}s feasible={}",
            driver_number, current_position, target_position, gap, feasible
        ));

        Advisory::Available(UndercutAssessment {
            feasible,
            current_position,
            target_position,
            gap_to_target_seconds: gap,
            potential_gain_seconds: potential_gain,
            net_advantage_seconds: potential_gain - gap - PIT_STOP_TIME_SECONDS,
            recommendation: if feasible {
                "Pit now for undercut".to_string()
            } else {
                "Stay out, gap too large".to_string()
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LapRecord, LapTable};

    fn lap_six() -> LapTable {
        LapTable::new(vec![
            LapRecord::new(11, 5, Some(88.0)),
            LapRecord::new(31, 6, Some(91.2)),
            LapRecord::new(11, 6, Some(90.0)),
            LapRecord::new(47, 6, Some(90.6)),
            LapRecord::new(2, 6, None),
        ])
    }

    #[test]
    fn gap_larger_than_gain_is_not_feasible() {
        let table = lap_six();
        let calc = StrategyCalculator::new(&table);
        let assessment = calc.undercut(31, 1, 6).into_available().unwrap();

        assert_eq!(assessment.current_position, 3);
        assert!(!assessment.feasible);
        assert!((assessment.gap_to_target_seconds - 1.2).abs() < 1e-9);
        assert_eq!(assessment.potential_gain_seconds, 1.0);
        assert!((assessment.net_advantage_seconds + 30.2).abs() < 1e-9);
        assert_eq!(assessment.recommendation, "Stay out, gap too large");
    }

    #[test]
    fn same_position_is_already_ahead() {
        let table = lap_six();
        let calc = StrategyCalculator::new(&table);
        assert_eq!(
            calc.undercut(47, 2, 6).reason(),
            Some(AdvisoryReason::AlreadyAheadOfTarget)
        );
        assert_eq!(
            calc.undercut(11, 3, 6).reason(),
            Some(AdvisoryReason::AlreadyAheadOfTarget)
        );
    }

    #[test]
    fn missing_rows_are_reported() {
        let table = lap_six();
        let calc = StrategyCalculator::new(&table);
        assert_eq!(calc.undercut(31, 1, 9).reason(), Some(AdvisoryReason::NoCurrentLapData));
        assert_eq!(calc.undercut(77, 1, 6).reason(), Some(AdvisoryReason::DriverNotFound));
        assert_eq!(calc.undercut(31, 0, 6).reason(), Some(AdvisoryReason::TargetNotFound));

        let empty = LapTable::default();
        assert_eq!(
            StrategyCalculator::new(&empty).undercut(31, 1, 6).reason(),
            Some(AdvisoryReason::NoData)
        );
    }

    #[test]
    fn absent_lap_time_cannot_be_compared() {
        let table = lap_six();
        let calc = StrategyCalculator::new(&table);
        // driver 2 has no time, ranks last (P4)
        assert_eq!(calc.undercut(2, 1, 6).reason(), Some(AdvisoryReason::MissingLapTime));
    }
}
