//! Rocket Range - a 2D projectile launch game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, physics, termination engine)
//! - `scheduler`: Fixed-cadence frame driver on a dedicated thread
//! - `session`: Target placement, scoring and post-run feedback
//! - `settings`: Data-driven tuning (tick rate, step size, display scale)
//! - `error`: Error types shared by the above

pub mod error;
pub mod scheduler;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::{SimError, ValidationError};
pub use scheduler::{FrameSnapshot, RunEvent, RunHandle, start_run, stop_run};
pub use session::{Feedback, Scoreboard, Session};
pub use settings::SimSettings;

/// Game configuration constants
pub mod consts {
    /// Gravitational constant used by the trajectory equation
    pub const GRAVITY: f64 = 9.8;

    /// Horizontal advance per simulation step (screen units)
    pub const DEFAULT_DELTA_X: f64 = 5.0;
    /// Real-time period between ticks
    pub const DEFAULT_TICK_PERIOD_MS: u64 = 50;
    /// Upper bound on waiting for the worker thread during teardown
    pub const DEFAULT_TEARDOWN_TIMEOUT_MS: u64 = 1000;

    /// Extra slack on the left edge of a trigger zone
    pub const TRIGGER_MARGIN: f64 = 5.0;
    /// Default target extent (stands in for the target sprite size)
    pub const DEFAULT_TARGET_SIZE: f64 = 48.0;

    /// Default playing field
    pub const DEFAULT_FIELD_WIDTH: f64 = 800.0;
    pub const DEFAULT_FIELD_HEIGHT: f64 = 480.0;

    /// Below this |cos(theta)| the trajectory equation divides by ~zero
    pub const MIN_COS_THETA: f64 = 1e-9;
}

/// Convert an angle in degrees to radians
#[inline]
pub fn deg_to_rad(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}
