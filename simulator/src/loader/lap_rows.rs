use super::raw::RawTable;
use log::debug;
use pitwallcore::math::parse_lap_time;
use pitwallcore::model::{LapRecord, LapTable};

const DRIVER_COLUMNS: &[&str] = &["NUMBER", "DRIVER_NUMBER"];
const SECTION_TEXT_COLUMNS: [&str; 3] = ["S1", "S2", "S3"];
const SECTION_SECONDS_COLUMNS: [&str; 3] = ["S1_SECONDS", "S2_SECONDS", "S3_SECONDS"];

/// Numeric cell; anything unparseable or non-finite is absent.
pub(crate) fn numeric(cell: Option<&str>) -> Option<f64> {
    cell.and_then(|value| value.parse::<f64>().ok())
        .filter(|value| value.is_finite())
}

fn whole_number(cell: Option<&str>) -> Option<u32> {
    numeric(cell)
        .filter(|value| *value >= 0.0 && value.fract() == 0.0 && *value <= f64::from(u32::MAX))
        .map(|value| value as u32)
}

fn time_seconds(cell: Option<&str>) -> Option<f64> {
    cell.and_then(|value| parse_lap_time(value).ok())
}

/// Builds the canonical lap table from a lap-analysis export.
///
/// Rows without a usable driver or lap number are dropped; bad lap or section
/// times just become absent.
pub fn lap_table_from_raw(raw: &RawTable) -> LapTable {
    let driver_col = raw.column(DRIVER_COLUMNS);
    let lap_col = raw.column(&["LAP_NUMBER"]);
    let time_col = raw.column(&["LAP_TIME"]);
    let kph_col = raw.column(&["KPH"]);
    let top_speed_col = raw.column(&["TOP_SPEED"]);
    let section_secs: Vec<Option<usize>> = SECTION_SECONDS_COLUMNS
        .iter()
        .map(|name| raw.column(&[*name]))
        .collect();
    let section_text: Vec<Option<usize>> = SECTION_TEXT_COLUMNS
        .iter()
        .map(|name| raw.column(&[*name]))
        .collect();

    let mut records = Vec::with_capacity(raw.rows.len());
    let mut skipped = 0usize;
    for row in &raw.rows {
        let (Some(driver_number), Some(lap_number)) = (
            whole_number(RawTable::cell(row, driver_col)),
            whole_number(RawTable::cell(row, lap_col)).filter(|lap| *lap > 0),
        ) else {
            skipped += 1;
            continue;
        };

        let lap_time_text = RawTable::cell(row, time_col).map(str::to_string);
        let mut sections = [None; 3];
        for (idx, slot) in sections.iter_mut().enumerate() {
            *slot = numeric(RawTable::cell(row, section_secs[idx]))
                .or_else(|| time_seconds(RawTable::cell(row, section_text[idx])));
        }

        records.push(LapRecord {
            driver_number,
            lap_number,
            lap_time_seconds: time_seconds(lap_time_text.as_deref()),
            lap_time_text,
            section_times_seconds: sections,
            speed_kph: numeric(RawTable::cell(row, kph_col)),
            top_speed_kph: numeric(RawTable::cell(row, top_speed_col)),
        });
    }

    if skipped > 0 {
        debug!("skipped {} lap rows without driver or lap number", skipped);
    }
    LapTable::new(records)
}
