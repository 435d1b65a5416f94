pub mod lap;
pub mod weather;

pub use lap::{rank_by_lap_time, LapRecord, LapTable};
pub use weather::{WeatherSample, WeatherTable};
