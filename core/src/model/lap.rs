use serde::{Deserialize, Serialize};

/// One driver's one completed lap, as produced by the loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LapRecord {
    pub driver_number: u32,
    pub lap_number: u32,
    /// Lap time as exported (e.g. `1:39.167`), kept for display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lap_time_text: Option<String>,
    pub lap_time_seconds: Option<f64>,
    /// S1, S2, S3 in seconds.
    pub section_times_seconds: [Option<f64>; 3],
    pub speed_kph: Option<f64>,
    pub top_speed_kph: Option<f64>,
}

impl LapRecord {
    pub fn new(driver_number: u32, lap_number: u32, lap_time_seconds: Option<f64>) -> Self {
        Self {
            driver_number,
            lap_number,
            lap_time_text: None,
            lap_time_seconds,
            section_times_seconds: [None; 3],
            speed_kph: None,
            top_speed_kph: None,
        }
    }

    /// Lap time when present, finite and strictly positive.
    pub fn valid_lap_time(&self) -> Option<f64> {
        self.lap_time_seconds
            .filter(|secs| secs.is_finite() && *secs > 0.0)
    }
}

/// Read-only table of lap records in load order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LapTable {
    records: Vec<LapRecord>,
}

impl LapTable {
    pub fn new(records: Vec<LapRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[LapRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Unique driver numbers in order of first appearance.
    pub fn driver_numbers(&self) -> Vec<u32> {
        let mut seen = Vec::new();
        for record in &self.records {
            if !seen.contains(&record.driver_number) {
                seen.push(record.driver_number);
            }
        }
        seen
    }

    pub fn for_driver(&self, driver_number: u32) -> impl Iterator<Item = &LapRecord> + '_ {
        self.records
            .iter()
            .filter(move |record| record.driver_number == driver_number)
    }

    pub fn for_lap(&self, lap_number: u32) -> impl Iterator<Item = &LapRecord> + '_ {
        self.records
            .iter()
            .filter(move |record| record.lap_number == lap_number)
    }

    pub fn valid_lap_times(&self) -> Vec<f64> {
        self.records
            .iter()
            .filter_map(LapRecord::valid_lap_time)
            .collect()
    }

    pub fn max_lap_number(&self) -> Option<u32> {
        self.records.iter().map(|record| record.lap_number).max()
    }

    pub fn distinct_lap_count(&self) -> usize {
        let mut laps: Vec<u32> = self.records.iter().map(|r| r.lap_number).collect();
        laps.sort_unstable();
        laps.dedup();
        laps.len()
    }
}

/// Orders rows by valid lap time, fastest first; invalid times sink to the end.
///
/// The sort is stable so equal times keep table order.
pub fn rank_by_lap_time<'a>(rows: impl IntoIterator<Item = &'a LapRecord>) -> Vec<&'a LapRecord> {
    let mut ranked: Vec<&LapRecord> = rows.into_iter().collect();
    ranked.sort_by(|a, b| match (a.valid_lap_time(), b.valid_lap_time()) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_lap_times_are_filtered() {
        assert_eq!(LapRecord::new(1, 1, None).valid_lap_time(), None);
        assert_eq!(LapRecord::new(1, 1, Some(0.0)).valid_lap_time(), None);
        assert_eq!(LapRecord::new(1, 1, Some(-3.0)).valid_lap_time(), None);
        assert_eq!(LapRecord::new(1, 1, Some(f64::NAN)).valid_lap_time(), None);
        assert_eq!(LapRecord::new(1, 1, Some(90.1)).valid_lap_time(), Some(90.1));
    }

    #[test]
    fn driver_numbers_keep_encounter_order() {
        let table = LapTable::new(vec![
            LapRecord::new(22, 1, Some(90.0)),
            LapRecord::new(7, 1, Some(91.0)),
            LapRecord::new(22, 2, Some(90.5)),
        ]);
        assert_eq!(table.driver_numbers(), vec![22, 7]);
        assert_eq!(table.max_lap_number(), Some(2));
        assert_eq!(table.distinct_lap_count(), 2);
        assert_eq!(table.valid_lap_times().len(), 3);
    }

    #[test]
    fn ranking_sinks_invalid_and_is_stable() {
        let rows = vec![
            LapRecord::new(1, 4, None),
            LapRecord::new(2, 4, Some(91.0)),
            LapRecord::new(3, 4, Some(90.0)),
            LapRecord::new(4, 4, Some(91.0)),
        ];
        let order: Vec<u32> = rank_by_lap_time(&rows)
            .iter()
            .map(|r| r.driver_number)
            .collect();
        assert_eq!(order, vec![3, 2, 4, 1]);
    }
}
