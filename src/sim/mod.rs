//! Deterministic simulation module
//!
//! All run logic lives here. This module must be pure and deterministic:
//! - Fixed step size in x, no wall-clock time
//! - No threads, rendering or platform dependencies

pub mod collision;
pub mod engine;
pub mod geometry;
pub mod physics;
pub mod state;

pub use collision::TriggerZone;
pub use engine::{SimulationEngine, StepResult};
pub use geometry::{Position, Rect};
pub use physics::PhysicsStepper;
pub use state::{
    FieldBounds, LaunchParams, Outcome, ProjectileState, RunPhase, RunRequest, RunState,
    TargetSpec,
};
