use super::lap_rows::numeric;
use super::raw::RawTable;
use pitwallcore::model::{WeatherSample, WeatherTable};

fn rain_flag(cell: Option<&str>) -> bool {
    match cell {
        Some(value) if value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("yes") => {
            true
        }
        other => numeric(other).is_some_and(|v| v > 0.0),
    }
}

/// Builds the weather table from a weather export, one sample per row.
pub fn weather_table_from_raw(raw: &RawTable) -> WeatherTable {
    let time_col = raw.column(&["TIME_UTC_STR"]);
    let air_col = raw.column(&["AIR_TEMP"]);
    let track_col = raw.column(&["TRACK_TEMP"]);
    let humidity_col = raw.column(&["HUMIDITY"]);
    let pressure_col = raw.column(&["PRESSURE"]);
    let wind_speed_col = raw.column(&["WIND_SPEED"]);
    let wind_dir_col = raw.column(&["WIND_DIRECTION"]);
    let rain_col = raw.column(&["RAIN"]);

    let samples = raw
        .rows
        .iter()
        .map(|row| WeatherSample {
            timestamp: RawTable::cell(row, time_col).map(str::to_string),
            air_temperature_c: numeric(RawTable::cell(row, air_col)),
            track_temperature_c: numeric(RawTable::cell(row, track_col)),
            humidity_pct: numeric(RawTable::cell(row, humidity_col)),
            pressure_hpa: numeric(RawTable::cell(row, pressure_col)),
            wind_speed_kph: numeric(RawTable::cell(row, wind_speed_col)),
            wind_direction_deg: numeric(RawTable::cell(row, wind_dir_col)),
            rain: rain_flag(RawTable::cell(row, rain_col)),
        })
        .collect();

    WeatherTable::new(samples)
}
