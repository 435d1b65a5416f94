//! Race replay: projects recorded laps onto a scaled wall clock.

pub mod clock;
pub mod history;
pub mod session;
pub mod state;

pub use clock::{Clock, ManualClock, SystemClock};
pub use history::{lap_history, DriverStats};
pub use session::{ReplaySession, DEFAULT_LAP_CAP};
pub use state::{PositionEntry, RaceState};
