pub mod stats;
pub mod timing;

pub use stats::StatsHelper;
pub use timing::{format_race_time, parse_lap_time, TimeParseError};
