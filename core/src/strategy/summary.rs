use super::pit_window::{PitRecommendation, PitWindowRequest};
use super::{StrategyCalculator, CRITICAL_DEGRADATION_PCT};
use crate::math::StatsHelper;
use crate::prelude::{Advisory, AdvisoryReason};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TireTrend {
    Increasing,
    Stable,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TireTrendSummary {
    pub current_pct: f64,
    pub trend: TireTrend,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategySummary {
    pub pit_recommendation: PitRecommendation,
    pub tire_degradation: TireTrendSummary,
}

/// Aggregate view of one driver's degradation series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegradationSummary {
    pub max_pct: f64,
    pub mean_pct: f64,
    pub laps_analyzed: usize,
    pub critical_laps: usize,
}

impl StrategyCalculator<'_> {
    pub fn strategy_summary(&self, request: PitWindowRequest) -> StrategySummary {
        let series = self.degradation(Some(request.driver_number));
        let pit_recommendation = self.pit_window_from_series(request, &series);

        let tire_degradation = match (series.first(), series.last()) {
            (Some(first), Some(last)) => TireTrendSummary {
                current_pct: last.degradation_pct,
                trend: if series.len() > 1 && last.degradation_pct > first.degradation_pct {
                    TireTrend::Increasing
                } else {
                    TireTrend::Stable
                },
            },
            _ => TireTrendSummary {
                current_pct: 0.0,
                trend: TireTrend::Unknown,
            },
        };

        StrategySummary {
            pit_recommendation,
            tire_degradation,
        }
    }

    pub fn degradation_summary(&self, driver_number: u32) -> Advisory<DegradationSummary> {
        let pcts: Vec<f64> = self
            .degradation(Some(driver_number))
            .iter()
            .map(|point| point.degradation_pct)
            .collect();

        match (StatsHelper::max(&pcts), StatsHelper::mean(&pcts)) {
            (Some(max_pct), Some(mean_pct)) => Advisory::Available(DegradationSummary {
                max_pct,
                mean_pct,
                laps_analyzed: pcts.len(),
                critical_laps: pcts
                    .iter()
                    .filter(|pct| **pct > CRITICAL_DEGRADATION_PCT)
                    .count(),
            }),
            _ => Advisory::Unavailable(AdvisoryReason::InsufficientData),
        }
    }
}
