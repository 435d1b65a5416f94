use serde::{Deserialize, Serialize};

/// One timestamped environmental observation. Every field is independently optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherSample {
    pub timestamp: Option<String>,
    pub air_temperature_c: Option<f64>,
    pub track_temperature_c: Option<f64>,
    pub humidity_pct: Option<f64>,
    pub pressure_hpa: Option<f64>,
    pub wind_speed_kph: Option<f64>,
    pub wind_direction_deg: Option<f64>,
    #[serde(default)]
    pub rain: bool,
}

/// Weather observations in recording order; the last one is the latest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeatherTable {
    samples: Vec<WeatherSample>,
}

impl WeatherTable {
    pub fn new(samples: Vec<WeatherSample>) -> Self {
        Self { samples }
    }

    pub fn samples(&self) -> &[WeatherSample] {
        &self.samples
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn latest(&self) -> Option<&WeatherSample> {
        self.samples.last()
    }

    /// Finite values of one column, skipping absent samples.
    pub fn column<F>(&self, field: F) -> Vec<f64>
    where
        F: Fn(&WeatherSample) -> Option<f64>,
    {
        self.samples
            .iter()
            .filter_map(field)
            .filter(|value| value.is_finite())
            .collect()
    }
}
