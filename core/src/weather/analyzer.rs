use crate::math::StatsHelper;
use crate::model::{LapTable, WeatherSample, WeatherTable};
use crate::prelude::{Advisory, AdvisoryReason};
use crate::telemetry::log::LogManager;
use serde::{Deserialize, Serialize};

/// Lap-time cost per degree Celsius of air temperature change.
pub const SECONDS_PER_DEGREE_C: f64 = 0.1;
/// Lap-time cost per 10 percentage points of humidity change.
pub const SECONDS_PER_10PCT_HUMIDITY: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureTrend {
    Increasing,
    Decreasing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherImpactSummary {
    pub avg_temp_c: Option<f64>,
    pub min_temp_c: Option<f64>,
    pub max_temp_c: Option<f64>,
    pub avg_humidity_pct: Option<f64>,
    pub avg_wind_speed_kph: Option<f64>,
    pub rain_occurred: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature_trend: Option<TemperatureTrend>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature_range_c: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastImpact {
    pub forecast_temp_c: f64,
    pub forecast_humidity_pct: f64,
    pub current_temp_c: f64,
    pub current_humidity_pct: f64,
    pub temp_change_c: f64,
    pub humidity_change_pct: f64,
    pub estimated_lap_time_impact_seconds: f64,
    pub description: String,
}

/// Weather summaries over one session's observations.
pub struct WeatherAnalyzer<'a> {
    weather: &'a WeatherTable,
    laps: &'a LapTable,
    logger: LogManager,
}

impl<'a> WeatherAnalyzer<'a> {
    pub fn new(weather: &'a WeatherTable, laps: &'a LapTable) -> Self {
        Self {
            weather,
            laps,
            logger: LogManager::new("weather"),
        }
    }

    /// The latest observation as recorded.
    pub fn current_conditions(&self) -> Advisory<WeatherSample> {
        match self.weather.latest() {
            Some(sample) => Advisory::Available(sample.clone()),
            None => Advisory::Unavailable(AdvisoryReason::NoWeatherData),
        }
    }

    pub fn analyze_impact(&self) -> Advisory<WeatherImpactSummary> {
        if self.weather.is_empty() {
            return Advisory::Unavailable(AdvisoryReason::NoWeatherData);
        }
        if self.laps.is_empty() {
            return Advisory::Unavailable(AdvisoryReason::NoData);
        }

        let temps = self.weather.column(|s| s.air_temperature_c);
        let min_temp_c = StatsHelper::min(&temps);
        let max_temp_c = StatsHelper::max(&temps);

        let mut summary = WeatherImpactSummary {
            avg_temp_c: StatsHelper::mean(&temps),
            min_temp_c,
            max_temp_c,
            avg_humidity_pct: StatsHelper::mean(&self.weather.column(|s| s.humidity_pct)),
            avg_wind_speed_kph: StatsHelper::mean(&self.weather.column(|s| s.wind_speed_kph)),
            rain_occurred: self.weather.samples().iter().any(|s| s.rain),
            temperature_trend: None,
            temperature_range_c: None,
        };

        // A single-lap session has no trend to speak of.
        if self.laps.distinct_lap_count() > 1 {
            if let (Some(min), Some(max)) = (min_temp_c, max_temp_c) {
                summary.temperature_trend = Some(if max > min {
                    TemperatureTrend::Increasing
                } else {
                    TemperatureTrend::Decreasing
                });
                summary.temperature_range_c = Some(max - min);
            }
        }

        Advisory::Available(summary)
    }

    /// Linear lap-time impact of moving from the session averages to a forecast.
    pub fn forecast_impact(
        &self,
        forecast_temp_c: f64,
        forecast_humidity_pct: f64,
    ) -> Advisory<ForecastImpact> {
        if self.weather.is_empty() {
            return Advisory::Unavailable(AdvisoryReason::NoWeatherData);
        }

        let current_temp = StatsHelper::mean(&self.weather.column(|s| s.air_temperature_c));
        let current_humidity = StatsHelper::mean(&self.weather.column(|s| s.humidity_pct));
        let (Some(current_temp_c), Some(current_humidity_pct)) = (current_temp, current_humidity)
        else {
            self.logger
                .data_gap("forecast skipped: no valid temperature or humidity samples");
            return Advisory::Unavailable(AdvisoryReason::UndefinedAverages);
        };

        let temp_change_c = forecast_temp_c - current_temp_c;
        let humidity_change_pct = forecast_humidity_pct - current_humidity_pct;
        let impact = temp_change_c * SECONDS_PER_DEGREE_C
            + humidity_change_pct / 10.0 * SECONDS_PER_10PCT_HUMIDITY;
        let sign = if impact > 0.0 { "+" } else { "" };

        Advisory::Available(ForecastImpact {
            forecast_temp_c,
            forecast_humidity_pct,
            current_temp_c,
            current_humidity_pct,
            temp_change_c,
            humidity_change_pct,
            estimated_lap_time_impact_seconds: impact,
            description: format!("{}{:.3}s per lap", sign, impact),
        })
    }
}
