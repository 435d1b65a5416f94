use serde::{Deserialize, Serialize};

/// Why an advisory could not be produced from the loaded tables.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisoryReason {
    #[error("no data")]
    NoData,
    #[error("no current lap data")]
    NoCurrentLapData,
    #[error("driver not found")]
    DriverNotFound,
    #[error("already at or ahead of target")]
    AlreadyAheadOfTarget,
    #[error("target position not found")]
    TargetNotFound,
    #[error("lap time unavailable for comparison")]
    MissingLapTime,
    #[error("insufficient data")]
    InsufficientData,
    #[error("no weather data")]
    NoWeatherData,
    #[error("weather averages undefined")]
    UndefinedAverages,
    #[error("simulation not started")]
    SimulationStopped,
}

/// Result of a core query: either the computed value or the reason it is missing.
///
/// Expected data absence is never an `Err`; callers render the reason text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Advisory<T> {
    Available(T),
    Unavailable(AdvisoryReason),
}

impl<T> Advisory<T> {
    pub fn is_available(&self) -> bool {
        matches!(self, Advisory::Available(_))
    }

    pub fn into_available(self) -> Option<T> {
        match self {
            Advisory::Available(value) => Some(value),
            Advisory::Unavailable(_) => None,
        }
    }

    pub fn reason(&self) -> Option<AdvisoryReason> {
        match self {
            Advisory::Available(_) => None,
            Advisory::Unavailable(reason) => Some(*reason),
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Advisory<U> {
        match self {
            Advisory::Available(value) => Advisory::Available(f(value)),
            Advisory::Unavailable(reason) => Advisory::Unavailable(reason),
        }
    }
}
