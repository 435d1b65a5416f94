use std::path::{Path, PathBuf};

/// Kinds of timing exports published per race.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Results,
    LapAnalysis,
    Weather,
    BestLaps,
}

impl ExportKind {
    /// Known file names for this export, most specific first.
    pub fn file_names(self, race: u32) -> Vec<String> {
        match self {
            ExportKind::Results => vec![
                format!("03_Provisional Results_Race {race}_Anonymized.CSV"),
                format!("03_Provisional Results_Race {race}.CSV"),
                format!("03_GR Cup Race {race} Official Results.CSV"),
                format!("00_Results GR Cup Race {race} Official_Anonymized.CSV"),
            ],
            ExportKind::LapAnalysis => vec![
                format!("23_AnalysisEnduranceWithSections_Race {race}_Anonymized.CSV"),
                format!("23_AnalysisEnduranceWithSections_Race {race}.CSV"),
            ],
            ExportKind::Weather => vec![
                format!("26_Weather_Race {race}_Anonymized.CSV"),
                format!("26_Weather_Race {race}.CSV"),
            ],
            ExportKind::BestLaps => vec![
                format!("99_Best 10 Laps By Driver_Race {race}_Anonymized.CSV"),
                format!("99_Best 10 Laps By Driver_Race {race}.CSV"),
            ],
        }
    }
}

/// Looks for an export under `<track_dir>/Race N/` first, then directly in `<track_dir>`.
pub fn locate(track_dir: &Path, race: u32, kind: ExportKind) -> Option<PathBuf> {
    let race_dir = track_dir.join(format!("Race {race}"));
    kind.file_names(race).into_iter().find_map(|name| {
        [race_dir.join(&name), track_dir.join(&name)]
            .into_iter()
            .find(|candidate| candidate.is_file())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn prefers_race_folder_then_track_folder() {
        let dir = tempfile::tempdir().unwrap();
        let track = dir.path();
        fs::create_dir_all(track.join("Race 2")).unwrap();
        fs::write(track.join("Race 2/26_Weather_Race 2_Anonymized.CSV"), "AIR_TEMP\n20\n").unwrap();
        fs::write(track.join("23_AnalysisEnduranceWithSections_Race 2.CSV"), "NUMBER\n").unwrap();

        let weather = locate(track, 2, ExportKind::Weather).unwrap();
        assert!(weather.ends_with("Race 2/26_Weather_Race 2_Anonymized.CSV"));
        let laps = locate(track, 2, ExportKind::LapAnalysis).unwrap();
        assert!(laps.ends_with("23_AnalysisEnduranceWithSections_Race 2.CSV"));
        assert!(locate(track, 2, ExportKind::Results).is_none());
        assert!(locate(track, 1, ExportKind::Weather).is_none());
    }
}
