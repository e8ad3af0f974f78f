//! Run state and core simulation types
//!
//! Everything a single launch needs lives here: the immutable parameters
//! fixed at launch, the moving projectile, and the terminal outcome.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::geometry::Position;
use crate::consts::*;
use crate::deg_to_rad;
use crate::error::ValidationError;

/// Launch parameters, fixed for the lifetime of a run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaunchParams {
    /// Degrees from horizontal, math convention
    angle_degrees: f64,
    velocity: f64,
    gravity: f64,
}

impl LaunchParams {
    /// Validate and build launch parameters
    ///
    /// Rejects anything that would make the trajectory equation divide by zero
    /// (`velocity == 0`, `cos(theta) == 0`).
    pub fn new(angle_degrees: f64, velocity: f64) -> Result<Self, ValidationError> {
        if !velocity.is_finite() || velocity <= 0.0 {
            return Err(ValidationError::Velocity(velocity));
        }
        if !angle_degrees.is_finite() || !(0.0..=360.0).contains(&angle_degrees) {
            return Err(ValidationError::AngleRange(angle_degrees));
        }
        let cos = deg_to_rad(angle_degrees).cos();
        if cos.abs() < MIN_COS_THETA {
            return Err(ValidationError::VerticalAngle(angle_degrees));
        }
        // Denominator of the trajectory equation
        let denom = 2.0 * velocity * velocity * cos * cos;
        if !denom.is_finite() || denom == 0.0 {
            return Err(ValidationError::DegenerateTrajectory {
                angle: angle_degrees,
                velocity,
            });
        }
        Ok(Self {
            angle_degrees,
            velocity,
            gravity: GRAVITY,
        })
    }

    pub fn angle_degrees(&self) -> f64 {
        self.angle_degrees
    }

    pub fn theta(&self) -> f64 {
        deg_to_rad(self.angle_degrees)
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn gravity(&self) -> f64 {
        self.gravity
    }
}

/// Playing field size; the origin is the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldBounds {
    pub width: f64,
    pub height: f64,
}

impl FieldBounds {
    pub fn new(width: f64, height: f64) -> Result<Self, ValidationError> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(width) || !valid(height) {
            return Err(ValidationError::Field { width, height });
        }
        Ok(Self { width, height })
    }

    /// Any coordinate strictly outside `[0, width] x [0, height]`
    #[inline]
    pub fn is_out_of_bounds(&self, x: f64, y: f64) -> bool {
        x < 0.0 || x > self.width || y < 0.0 || y > self.height
    }

    /// Launch point: left edge, bottom of the field
    pub fn launch_point(&self) -> Position {
        DVec2::new(0.0, self.height)
    }
}

impl Default for FieldBounds {
    fn default() -> Self {
        Self {
            width: DEFAULT_FIELD_WIDTH,
            height: DEFAULT_FIELD_HEIGHT,
        }
    }
}

/// Target location and extent, only used to derive the trigger zone
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetSpec {
    pub pos: Position,
    pub width: f64,
    pub height: f64,
}

impl TargetSpec {
    pub fn new(pos: Position, width: f64, height: f64) -> Self {
        Self { pos, width, height }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.pos.is_finite() && self.width.is_finite() && self.height.is_finite() {
            Ok(())
        } else {
            Err(ValidationError::Target)
        }
    }
}

/// The simulated body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileState {
    pub pos: Position,
    params: LaunchParams,
}

impl ProjectileState {
    pub fn launch(params: LaunchParams, field: &FieldBounds) -> Self {
        Self {
            pos: field.launch_point(),
            params,
        }
    }

    pub fn params(&self) -> &LaunchParams {
        &self.params
    }
}

/// Terminal result of a run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub x: f64,
    pub y: f64,
    /// Smallest screen y reached during the run (raw, not height above ground)
    pub max_height: f64,
    pub hit: bool,
}

impl Outcome {
    /// Apex as a distance above the bottom edge of the field
    pub fn height_above_ground(&self, field_height: f64) -> f64 {
        field_height - self.max_height
    }
}

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RunPhase {
    Running,
    Terminated(Outcome),
    /// A step produced a non-finite position; the run has no outcome
    Failed { x: f64, y: f64 },
}

/// Running aggregate owned by the engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunState {
    /// Running minimum of y; starts at the field height
    pub max_height_reached: f64,
    pub phase: RunPhase,
    /// Steps taken so far
    pub steps: u64,
}

impl RunState {
    pub fn new(field: &FieldBounds) -> Self {
        Self {
            max_height_reached: field.height,
            phase: RunPhase::Running,
            steps: 0,
        }
    }

    pub fn is_terminated(&self) -> bool {
        matches!(self.phase, RunPhase::Terminated(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.phase, RunPhase::Failed { .. })
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            RunPhase::Terminated(outcome) => Some(outcome),
            RunPhase::Running | RunPhase::Failed { .. } => None,
        }
    }
}

/// Everything a caller supplies to start a run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunRequest {
    pub angle_degrees: f64,
    pub velocity: f64,
    pub target: TargetSpec,
    pub field_width: f64,
    pub field_height: f64,
    /// Display density factor applied to computed heights
    pub unit_scale: f64,
}

impl RunRequest {
    pub fn new(
        angle_degrees: f64,
        velocity: f64,
        target: Position,
        field_width: f64,
        field_height: f64,
    ) -> Self {
        Self {
            angle_degrees,
            velocity,
            target: TargetSpec::new(target, DEFAULT_TARGET_SIZE, DEFAULT_TARGET_SIZE),
            field_width,
            field_height,
            unit_scale: 1.0,
        }
    }

    pub fn with_unit_scale(mut self, unit_scale: f64) -> Self {
        self.unit_scale = unit_scale;
        self
    }

    pub fn with_target_extent(mut self, width: f64, height: f64) -> Self {
        self.target.width = width;
        self.target.height = height;
        self
    }

    /// Check every field; returns the validated pieces
    pub fn validate(&self) -> Result<(LaunchParams, FieldBounds), ValidationError> {
        let params = LaunchParams::new(self.angle_degrees, self.velocity)?;
        let field = FieldBounds::new(self.field_width, self.field_height)?;
        if !self.unit_scale.is_finite() || self.unit_scale < 0.0 {
            return Err(ValidationError::UnitScale(self.unit_scale));
        }
        self.target.validate()?;
        Ok((params, field))
    }
}
