use crate::dashboard::model::DashboardModel;
use crate::loader::RaceData;
use crate::workflow::catalog;
use crate::workflow::config::WorkflowConfig;
use pitwallcore::math::StatsHelper;
use pitwallcore::replay::{Clock, DriverStats, RaceState, ReplaySession};
use pitwallcore::strategy::{PitWindowRequest, StrategyCalculator};
use pitwallcore::telemetry::MetricsRecorder;
use pitwallcore::weather::WeatherAnalyzer;
use pitwallcore::Advisory;
use std::sync::Arc;

/// Combines the core analyses into one dashboard snapshot per tick.
#[derive(Clone)]
pub struct Runner {
    config: WorkflowConfig,
    metrics: Arc<MetricsRecorder>,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> Self {
        Self {
            config,
            metrics: Arc::new(MetricsRecorder::new()),
        }
    }

    pub fn metrics(&self) -> &MetricsRecorder {
        &self.metrics
    }

    /// Projects the live replay and builds the snapshot for its current lap.
    pub fn tick<C: Clock>(
        &self,
        data: &RaceData,
        session: &mut ReplaySession<C>,
    ) -> Advisory<DashboardModel> {
        let state = session.query_state(&data.laps);
        self.metrics.record(&state);
        state.map(|state| self.build(data, state))
    }

    /// Snapshot at a fixed lap without a running clock.
    pub fn offline(&self, data: &RaceData, lap: u32) -> DashboardModel {
        let pace = StatsHelper::median(&data.laps.valid_lap_times()).unwrap_or(0.0);
        let elapsed = f64::from(lap.saturating_sub(1)) * pace;
        self.build(data, RaceState::at_lap(&data.laps, lap, elapsed))
    }

    fn build(&self, data: &RaceData, state: RaceState) -> DashboardModel {
        let current_lap = state.current_lap;
        let focus_driver = self
            .config
            .driver_number
            .or_else(|| state.leader().map(|entry| entry.driver_number))
            .or_else(|| data.laps.driver_numbers().first().copied());

        let calculator = StrategyCalculator::new(&data.laps);
        let analyzer = WeatherAnalyzer::new(&data.weather, &data.laps);

        let mut model = DashboardModel {
            track: self.config.track.clone(),
            track_name: catalog::display_name(&self.config.track).to_string(),
            race: self.config.race,
            focus_driver,
            weather_now: Some(self.recorded(analyzer.current_conditions())),
            weather_impact: Some(self.recorded(analyzer.analyze_impact())),
            forecast: self.config.forecast.as_ref().map(|forecast| {
                self.recorded(analyzer.forecast_impact(forecast.temp_c, forecast.humidity_pct))
            }),
            results_rows: data.results.rows.len(),
            best_laps_rows: data.best_laps.rows.len(),
            ..Default::default()
        };

        if let Some(driver) = focus_driver {
            model.strategy = Some(calculator.strategy_summary(
                PitWindowRequest::new(driver, current_lap).with_total_laps(self.config.total_laps),
            ));
            model.degradation = Some(self.recorded(calculator.degradation_summary(driver)));
            model.undercut = Some(self.recorded(calculator.undercut(
                driver,
                self.config.target_position,
                current_lap,
            )));
            model.driver_stats = Some(self.recorded(DriverStats::through_lap(
                &data.laps,
                driver,
                current_lap,
            )));
        }

        model.race_state = Some(state);
        model
    }

    fn recorded<T>(&self, advisory: Advisory<T>) -> Advisory<T> {
        self.metrics.record(&advisory);
        advisory
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::profile::{build_race, GeneratorConfig};
    use crate::workflow::config::ForecastConfig;
    use pitwallcore::replay::ManualClock;
    use pitwallcore::AdvisoryReason;
    use std::path::PathBuf;
    use std::time::Duration;

    fn synthetic() -> RaceData {
        build_race(&GeneratorConfig {
            drivers: 6,
            laps: 20,
            noise: 0.0,
            ..Default::default()
        })
    }

    fn config() -> WorkflowConfig {
        WorkflowConfig::from_args(PathBuf::from("."), "barber".into(), 1)
    }

    #[test]
    fn runner_follows_replay_clock() {
        let data = synthetic();
        let runner = Runner::new(config());
        let mut session = ReplaySession::with_clock(ManualClock::new());

        assert!(!runner.tick(&data, &mut session).is_available());

        session.start(60.0);
        session.clock().advance(Duration::from_secs(10));
        let model = runner.tick(&data, &mut session).into_available().unwrap();
        let state = model.race_state.as_ref().unwrap();
        assert_eq!(state.current_lap, 7);
        assert_eq!(state.positions.len(), 6);
        assert_eq!(model.focus_driver, Some(state.positions[0].driver_number));
        assert_eq!(model.track_name, "Barber Motorsports Park");
        assert!(model.strategy.is_some());
    }

    #[test]
    fn offline_snapshot_uses_configured_driver() {
        let data = synthetic();
        let driver = data.laps.driver_numbers()[3];
        let runner = Runner::new(WorkflowConfig {
            driver_number: Some(driver),
            target_position: 1,
            forecast: Some(ForecastConfig {
                temp_c: 30.0,
                humidity_pct: 60.0,
            }),
            ..config()
        });

        let model = runner.offline(&data, 12);
        assert_eq!(model.focus_driver, Some(driver));
        assert_eq!(model.race_state.as_ref().unwrap().current_lap, 12);
        let stats = model.driver_stats.unwrap().into_available().unwrap();
        assert_eq!(stats.laps_completed, 12);
        assert!(model.forecast.unwrap().is_available());
        assert!(model.weather_impact.unwrap().is_available());
        assert!(model.degradation.unwrap().is_available());
    }

    #[test]
    fn empty_race_degrades_to_advisories() {
        let runner = Runner::new(config());
        let model = runner.offline(&RaceData::default(), 1);
        assert_eq!(model.focus_driver, None);
        assert!(model.strategy.is_none());
        assert_eq!(
            model.weather_now.unwrap().reason(),
            Some(AdvisoryReason::NoWeatherData)
        );
        let (answered, unavailable) = runner.metrics().snapshot();
        assert_eq!(answered, 0);
        assert_eq!(unavailable, 2);
    }

    #[test]
    fn offline_strategy_uses_configured_race_length() {
        let data = synthetic();
        let driver = data.laps.driver_numbers()[0];
        let runner = Runner::new(WorkflowConfig {
            driver_number: Some(driver),
            total_laps: 12,
            ..config()
        });

        let model = runner.offline(&data, 4);
        let expected = StrategyCalculator::new(&data.laps)
            .recommend_pit_window(PitWindowRequest::new(driver, 4).with_total_laps(12));
        assert_eq!(model.strategy.unwrap().pit_recommendation, expected);
    }

    #[test]
    fn offline_snapshot_past_any_lap_still_builds() {
        let data = synthetic();
        let model = Runner::new(config()).offline(&data, u32::MAX);
        assert!(model.strategy.is_some());
        assert_eq!(
            model.undercut.unwrap().reason(),
            Some(AdvisoryReason::NoCurrentLapData)
        );
    }
}
