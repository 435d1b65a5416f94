use crate::loader::RaceData;
use pitwallcore::math::format_race_time;
use pitwallcore::model::{LapRecord, LapTable, WeatherSample, WeatherTable};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Section split of a lap: S1, S2, S3 shares.
const SECTION_SHARES: [f64; 3] = [0.32, 0.36, 0.32];

/// Configuration for generating a synthetic race.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub drivers: u32,
    pub laps: u32,
    pub base_lap_seconds: f64,
    /// Pace gap between consecutive drivers on the grid.
    pub driver_spread_seconds: f64,
    /// Lap time added per lap of tire wear.
    pub wear_per_lap_seconds: f64,
    pub noise: f64,
    pub track_length_km: f64,
    pub start_air_temp_c: f64,
    pub temp_drift_c: f64,
    pub humidity_pct: f64,
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            drivers: 12,
            laps: 30,
            base_lap_seconds: 98.0,
            driver_spread_seconds: 0.15,
            wear_per_lap_seconds: 0.12,
            noise: 0.25,
            track_length_km: 3.7,
            start_air_temp_c: 24.0,
            temp_drift_c: 3.0,
            humidity_pct: 48.0,
            seed: 0,
        }
    }
}

impl GeneratorConfig {
    fn jitter(&self, rng: &mut StdRng) -> f64 {
        if self.noise > 0.0 {
            rng.gen_range(-self.noise..self.noise)
        } else {
            0.0
        }
    }
}

/// Entries reserved up front; larger grids grow the table as they go.
const PREALLOCATED_ROWS: usize = 1 << 16;

/// Car numbers spread out the way a real entry list looks.
///
/// Each block of 97 entries is shuffled within its own hundred, so numbers stay unique.
fn car_number(index: u32) -> u32 {
    (index / 97)
        .saturating_mul(100)
        .saturating_add(index % 97 * 7 % 97 + 2)
}

pub fn build_lap_table(config: &GeneratorConfig) -> LapTable {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let rows = (config.drivers as usize).saturating_mul(config.laps as usize);
    let mut records = Vec::with_capacity(rows.min(PREALLOCATED_ROWS));

    for lap in 1..=config.laps {
        for index in 0..config.drivers {
            let lap_time = config.base_lap_seconds
                + index as f64 * config.driver_spread_seconds
                + (lap - 1) as f64 * config.wear_per_lap_seconds
                + config.jitter(&mut rng);
            let kph = config.track_length_km / lap_time * 3600.0;

            let mut record = LapRecord::new(car_number(index), lap, Some(lap_time));
            record.lap_time_text = Some(format_race_time(lap_time));
            record.section_times_seconds = SECTION_SHARES.map(|share| Some(lap_time * share));
            record.speed_kph = Some(kph);
            record.top_speed_kph = Some(kph * 1.45);
            records.push(record);
        }
    }

    LapTable::new(records)
}

/// One weather sample per lap, air temperature drifting linearly.
pub fn build_weather_table(config: &GeneratorConfig) -> WeatherTable {
    let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(1));
    let steps = config.laps.max(1);
    let samples = (0..steps)
        .map(|step| {
            let progress = if steps > 1 {
                step as f64 / (steps - 1) as f64
            } else {
                0.0
            };
            let air = config.start_air_temp_c + config.temp_drift_c * progress;
            WeatherSample {
                timestamp: Some(format!("lap {:02}", step + 1)),
                air_temperature_c: Some(air),
                track_temperature_c: Some(air + 14.0),
                humidity_pct: Some(config.humidity_pct + config.jitter(&mut rng)),
                pressure_hpa: Some(1012.0),
                wind_speed_kph: Some(8.0 + config.jitter(&mut rng).abs()),
                wind_direction_deg: Some(210.0),
                rain: false,
            }
        })
        .collect();

    WeatherTable::new(samples)
}

pub fn build_race(config: &GeneratorConfig) -> RaceData {
    RaceData {
        laps: build_lap_table(config),
        weather: build_weather_table(config),
        ..Default::default()
    }
}
