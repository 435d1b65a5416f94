use super::degradation::DegradationPoint;
use super::{StrategyCalculator, CRITICAL_DEGRADATION_PCT};
use serde::{Deserialize, Serialize};

/// Expected laps on a set before degradation becomes significant.
pub const TIRE_LIFE_LAPS: u32 = 20;
/// Laps to pit ahead of the critical lap.
pub const PIT_BUFFER_LAPS: u32 = 2;
/// Fallback lookahead when no degradation series exists for the driver.
pub const NO_DATA_LOOKAHEAD_LAPS: u32 = 10;
pub const DEFAULT_TOTAL_LAPS: u32 = 30;
/// A critical lap this close (or already passed) makes the call urgent.
const HIGH_URGENCY_LAPS: i64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Medium => "medium",
            Urgency::High => "high",
        }
    }
}

/// Pit window query for one driver at the current race lap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PitWindowRequest {
    pub driver_number: u32,
    pub current_lap: u32,
    pub total_laps: u32,
}

impl PitWindowRequest {
    pub fn new(driver_number: u32, current_lap: u32) -> Self {
        Self {
            driver_number,
            current_lap,
            total_laps: DEFAULT_TOTAL_LAPS,
        }
    }

    pub fn with_total_laps(mut self, total_laps: u32) -> Self {
        self.total_laps = total_laps;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PitRecommendation {
    pub recommended_lap: u32,
    pub urgency: Urgency,
    pub reason: String,
    /// Degradation of the latest computed lap, not necessarily the current one.
    pub current_degradation_pct: Option<f64>,
    /// Laps until the critical (or recommended) lap; negative once it has passed.
    pub laps_remaining: Option<i64>,
    pub critical_lap: Option<u32>,
}

impl StrategyCalculator<'_> {
    /// Rule-table pit recommendation driven by the driver's degradation series.
    pub fn recommend_pit_window(&self, request: PitWindowRequest) -> PitRecommendation {
        let series = self.degradation(Some(request.driver_number));
        self.pit_window_from_series(request, &series)
    }

    pub(super) fn pit_window_from_series(
        &self,
        request: PitWindowRequest,
        series: &[DegradationPoint],
    ) -> PitRecommendation {
        let PitWindowRequest {
            driver_number,
            current_lap,
            total_laps,
        } = request;

        let Some(latest) = series.last() else {
            self.logger.data_gap(&format!(
                "no degradation series for driver {}, using default lookahead",
                driver_number
            ));
            return PitRecommendation {
                recommended_lap: current_lap.saturating_add(NO_DATA_LOOKAHEAD_LAPS),
                urgency: Urgency::Low,
                reason: "insufficient data".to_string(),
                current_degradation_pct: None,
                laps_remaining: None,
                critical_lap: None,
            };
        };

        let critical_lap = series
            .iter()
            .filter(|point| point.degradation_pct > CRITICAL_DEGRADATION_PCT)
            .map(|point| point.lap_number)
            .min();

        if let Some(critical_lap) = critical_lap {
            let laps_remaining = i64::from(critical_lap) - i64::from(current_lap);
            let urgency = if laps_remaining <= HIGH_URGENCY_LAPS {
                Urgency::High
            } else {
                Urgency::Medium
            };
            return PitRecommendation {
                recommended_lap: current_lap.max(critical_lap.saturating_sub(PIT_BUFFER_LAPS)),
                urgency,
                reason: format!("tire degradation at {:.1}% threshold", CRITICAL_DEGRADATION_PCT),
                current_degradation_pct: Some(latest.degradation_pct),
                laps_remaining: Some(laps_remaining),
                critical_lap: Some(critical_lap),
            };
        }

        let recommended_lap = current_lap
            .saturating_add(TIRE_LIFE_LAPS)
            .min(total_laps / 2);
        PitRecommendation {
            recommended_lap,
            urgency: Urgency::Low,
            reason: "optimal tire life window".to_string(),
            current_degradation_pct: Some(latest.degradation_pct),
            laps_remaining: Some(i64::from(recommended_lap) - i64::from(current_lap)),
            critical_lap: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LapRecord, LapTable};

    /// Baseline 100s; lap 10 is the first lap above 2%.
    fn degrading_driver() -> LapTable {
        let times = [
            100.0, 100.0, 100.0, 100.0, 100.0, 100.5, 101.0, 101.5, 102.0, 102.5, 103.0, 103.5,
        ];
        let records = times
            .iter()
            .enumerate()
            .map(|(idx, t)| LapRecord::new(5, idx as u32 + 1, Some(*t)))
            .collect();
        LapTable::new(records)
    }

    #[test]
    fn critical_lap_close_is_high_urgency() {
        let table = degrading_driver();
        let rec = StrategyCalculator::new(&table).recommend_pit_window(PitWindowRequest::new(5, 8));
        assert_eq!(rec.critical_lap, Some(10));
        assert_eq!(rec.recommended_lap, 8);
        assert_eq!(rec.urgency, Urgency::High);
        assert_eq!(rec.laps_remaining, Some(2));
        let latest = rec.current_degradation_pct.unwrap();
        assert!((latest - 3.5).abs() < 1e-9);
    }

    #[test]
    fn critical_lap_far_is_medium_urgency() {
        let table = degrading_driver();
        let rec = StrategyCalculator::new(&table).recommend_pit_window(PitWindowRequest::new(5, 3));
        assert_eq!(rec.recommended_lap, 8);
        assert_eq!(rec.urgency, Urgency::Medium);
        assert_eq!(rec.laps_remaining, Some(7));
    }

    #[test]
    fn passed_critical_lap_goes_negative() {
        let table = degrading_driver();
        let rec =
            StrategyCalculator::new(&table).recommend_pit_window(PitWindowRequest::new(5, 12));
        assert_eq!(rec.recommended_lap, 12);
        assert_eq!(rec.laps_remaining, Some(-2));
        assert_eq!(rec.urgency, Urgency::High);
    }

    #[test]
    fn missing_driver_gets_default_lookahead() {
        let table = degrading_driver();
        let rec =
            StrategyCalculator::new(&table).recommend_pit_window(PitWindowRequest::new(99, 4));
        assert_eq!(rec.recommended_lap, 14);
        assert_eq!(rec.urgency, Urgency::Low);
        assert_eq!(rec.reason, "insufficient data");
        assert_eq!(rec.laps_remaining, None);
    }

    #[test]
    fn stable_pace_uses_tire_life_window() {
        let records = (1..=8).map(|lap| LapRecord::new(2, lap, Some(90.0))).collect();
        let table = LapTable::new(records);
        let calc = StrategyCalculator::new(&table);

        let rec = calc.recommend_pit_window(PitWindowRequest::new(2, 4));
        assert_eq!(rec.recommended_lap, 15);
        assert_eq!(rec.laps_remaining, Some(11));
        assert_eq!(rec.reason, "optimal tire life window");

        let long_race = calc.recommend_pit_window(PitWindowRequest::new(2, 4).with_total_laps(60));
        assert_eq!(long_race.recommended_lap, 24);
        assert_eq!(long_race.urgency.as_str(), "low");
    }

    #[test]
    fn huge_current_lap_does_not_overflow() {
        let empty = LapTable::default();
        let rec = StrategyCalculator::new(&empty)
            .recommend_pit_window(PitWindowRequest::new(1, u32::MAX - 5));
        assert_eq!(rec.recommended_lap, u32::MAX);
        assert_eq!(rec.reason, "insufficient data");

        let records = (1..=8).map(|lap| LapRecord::new(2, lap, Some(90.0))).collect();
        let stable = LapTable::new(records);
        let rec = StrategyCalculator::new(&stable)
            .recommend_pit_window(PitWindowRequest::new(2, u32::MAX - 5).with_total_laps(u32::MAX));
        assert_eq!(rec.recommended_lap, u32::MAX / 2);
        assert_eq!(rec.laps_remaining, Some(i64::from(u32::MAX / 2) - i64::from(u32::MAX - 5)));
    }

    #[test]
    fn repeated_calls_agree() {
        let table = degrading_driver();
        let calc = StrategyCalculator::new(&table);
        let request = PitWindowRequest::new(5, 6);
        assert_eq!(calc.degradation(None), calc.degradation(None));
        assert_eq!(calc.recommend_pit_window(request), calc.recommend_pit_window(request));
        assert_eq!(calc.undercut(5, 1, 6), calc.undercut(5, 1, 6));
    }
}
