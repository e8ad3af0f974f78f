//! Error types for run setup, simulation and teardown

use std::time::Duration;

use thiserror::Error;

/// A launch parameter that cannot produce a well-defined trajectory
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("velocity must be finite and positive, got {0}")]
    Velocity(f64),
    #[error("angle must be within 0..=360 degrees, got {0}")]
    AngleRange(f64),
    #[error("angle {0} degrees is vertical; the trajectory is undefined")]
    VerticalAngle(f64),
    #[error("velocity {velocity} at {angle} degrees gives a degenerate trajectory")]
    DegenerateTrajectory { angle: f64, velocity: f64 },
    #[error("field must have finite positive size, got {width}x{height}")]
    Field { width: f64, height: f64 },
    #[error("unit scale must be finite and non-negative, got {0}")]
    UnitScale(f64),
    #[error("step size must be finite and positive, got {0}")]
    DeltaX(f64),
    #[error("target must have finite coordinates and extent")]
    Target,
}

#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid launch parameters: {0}")]
    Validation(#[from] ValidationError),
    #[error("scheduler did not stop within {waited:?}")]
    SchedulerTeardownTimeout { waited: Duration },
    #[error("simulation produced a non-finite position ({x}, {y})")]
    NonFinitePosition { x: f64, y: f64 },
    #[error("run was cancelled before it finished")]
    Cancelled,
    #[error("scheduler thread panicked")]
    WorkerPanicked,
    #[error("failed to spawn scheduler thread: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Config(#[from] serde_json::Error),
}
