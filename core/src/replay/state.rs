use crate::math::format_race_time;
use crate::model::{rank_by_lap_time, LapRecord, LapTable};
use serde::{Deserialize, Serialize};

/// One car in the live order for the projected lap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionEntry {
    pub position: u32,
    pub driver_number: u32,
    pub lap_time_text: Option<String>,
    pub lap_time_seconds: Option<f64>,
    pub speed_kph: Option<f64>,
    pub section_times_seconds: [Option<f64>; 3],
}

/// Race projection at one query instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceState {
    pub current_lap: u32,
    pub elapsed_seconds: f64,
    pub elapsed_formatted: String,
    pub positions: Vec<PositionEntry>,
    /// Rows of the current lap in table order.
    pub lap_rows: Vec<LapRecord>,
}

impl RaceState {
    /// Builds the ordering for `current_lap`, fastest lap time first.
    pub fn at_lap(table: &LapTable, current_lap: u32, elapsed_seconds: f64) -> Self {
        let lap_rows: Vec<LapRecord> = table.for_lap(current_lap).cloned().collect();
        let positions = rank_by_lap_time(&lap_rows)
            .into_iter()
            .enumerate()
            .map(|(idx, record)| PositionEntry {
                position: idx as u32 + 1,
                driver_number: record.driver_number,
                lap_time_text: record.lap_time_text.clone(),
                lap_time_seconds: record.lap_time_seconds,
                speed_kph: record.speed_kph,
                section_times_seconds: record.section_times_seconds,
            })
            .collect();

        Self {
            current_lap,
            elapsed_seconds,
            elapsed_formatted: format_race_time(elapsed_seconds),
            positions,
            lap_rows,
        }
    }

    pub fn leader(&self) -> Option<&PositionEntry> {
        self.positions.first()
    }
}
