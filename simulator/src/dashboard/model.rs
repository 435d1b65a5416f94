use pitwallcore::model::WeatherSample;
use pitwallcore::replay::{DriverStats, RaceState};
use pitwallcore::strategy::{DegradationSummary, StrategySummary, UndercutAssessment};
use pitwallcore::weather::{ForecastImpact, WeatherImpactSummary};
use pitwallcore::Advisory;
use serde::{Deserialize, Serialize};

/// Everything the race-engineer view shows for one tick.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DashboardModel {
    pub track: String,
    pub track_name: String,
    pub race: u32,
    pub race_state: Option<RaceState>,
    pub focus_driver: Option<u32>,
    pub strategy: Option<StrategySummary>,
    pub degradation: Option<Advisory<DegradationSummary>>,
    pub undercut: Option<Advisory<UndercutAssessment>>,
    pub driver_stats: Option<Advisory<DriverStats>>,
    pub weather_now: Option<Advisory<WeatherSample>>,
    pub weather_impact: Option<Advisory<WeatherImpactSummary>>,
    pub forecast: Option<Advisory<ForecastImpact>>,
    pub results_rows: usize,
    pub best_laps_rows: usize,
}

impl DashboardModel {
    /// One-line status for the console.
    pub fn headline(&self) -> String {
        let Some(state) = &self.race_state else {
            return format!("{} race {}: waiting for replay", self.track_name, self.race);
        };

        let leader = state
            .leader()
            .map_or_else(|| "-".to_string(), |entry| format!("#{}", entry.driver_number));
        let pit = self.strategy.as_ref().map_or_else(
            || "no driver".to_string(),
            |summary| {
                format!(
                    "#{} pit L{} ({})",
                    self.focus_driver.unwrap_or_default(),
                    summary.pit_recommendation.recommended_lap,
                    summary.pit_recommendation.urgency.as_str()
                )
            },
        );

        format!(
            "lap {} | {} | {} cars | leader {} | {}",
            state.current_lap,
            state.elapsed_formatted,
            state.positions.len(),
            leader,
            pit
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pitwallcore::model::{LapRecord, LapTable};

    #[test]
    fn headline_waits_without_state() {
        let model = DashboardModel {
            track_name: "Sonoma Raceway".into(),
            race: 2,
            ..Default::default()
        };
        assert_eq!(model.headline(), "Sonoma Raceway race 2: waiting for replay");
    }

    #[test]
    fn headline_names_leader() {
        let table = LapTable::new(vec![
            LapRecord::new(7, 1, Some(99.0)),
            LapRecord::new(13, 1, Some(98.0)),
        ]);
        let model = DashboardModel {
            race_state: Some(RaceState::at_lap(&table, 1, 12.5)),
            ..Default::default()
        };
        assert_eq!(model.headline(), "lap 1 | 0:12.500 | 2 cars | leader #13 | no driver");
    }
}
