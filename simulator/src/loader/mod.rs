//! Reads a race's CSV exports into the core's typed tables.

pub mod discovery;
pub mod lap_rows;
pub mod raw;
pub mod weather_rows;

use crate::workflow::catalog;
use anyhow::{bail, Context};
use discovery::{locate, ExportKind};
use log::{info, warn};
use pitwallcore::model::{LapTable, WeatherTable};
use raw::{read_table, RawTable};
use std::path::Path;

/// Everything loaded for one race.
#[derive(Debug, Clone, Default)]
pub struct RaceData {
    pub laps: LapTable,
    pub weather: WeatherTable,
    /// Opaque classification rows, shown as-is.
    pub results: RawTable,
    pub best_laps: RawTable,
}

fn load_export(track_dir: &Path, race: u32, kind: ExportKind) -> anyhow::Result<RawTable> {
    match locate(track_dir, race, kind) {
        Some(path) => {
            let table = read_table(&path)?;
            info!("loaded {:?} export {} ({} rows)", kind, path.display(), table.rows.len());
            Ok(table)
        }
        None => {
            warn!("no {:?} export for race {} under {}", kind, race, track_dir.display());
            Ok(RawTable::default())
        }
    }
}

/// Loads all exports for `track` / `race`; missing files become empty tables.
pub fn load_race(data_root: &Path, track: &str, race: u32) -> anyhow::Result<RaceData> {
    let Some(entry) = catalog::find(track) else {
        bail!(
            "unknown track {:?}; expected one of {}",
            track,
            catalog::available_tracks().join(", ")
        );
    };
    let track_dir = data_root.join(entry.folder);

    let laps = load_export(&track_dir, race, ExportKind::LapAnalysis)
        .with_context(|| format!("loading lap analysis for {} race {}", track, race))?;
    let weather = load_export(&track_dir, race, ExportKind::Weather)
        .with_context(|| format!("loading weather for {} race {}", track, race))?;
    let results = load_export(&track_dir, race, ExportKind::Results)
        .with_context(|| format!("loading results for {} race {}", track, race))?;
    let best_laps = load_export(&track_dir, race, ExportKind::BestLaps)
        .with_context(|| format!("loading best laps for {} race {}", track, race))?;

    Ok(RaceData {
        laps: lap_rows::lap_table_from_raw(&laps),
        weather: weather_rows::weather_table_from_raw(&weather),
        results,
        best_laps,
    })
}
