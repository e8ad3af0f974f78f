//! Trajectory stepping
//!
//! The projectile follows the closed-form trajectory
//! `h(x) = x tan(theta) - g x^2 / (2 v^2 cos^2(theta))`.
//! Each step moves x forward by a constant amount and re-evaluates h, so
//! real-time speed depends only on how often `step` is called.

use super::state::ProjectileState;
use crate::error::ValidationError;

/// Advances a projectile by a fixed horizontal increment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsStepper {
    delta_x: f64,
    unit_scale: f64,
    field_height: f64,
}

impl PhysicsStepper {
    pub fn new(delta_x: f64, unit_scale: f64, field_height: f64) -> Result<Self, ValidationError> {
        if !delta_x.is_finite() || delta_x <= 0.0 {
            return Err(ValidationError::DeltaX(delta_x));
        }
        if !unit_scale.is_finite() || unit_scale < 0.0 {
            return Err(ValidationError::UnitScale(unit_scale));
        }
        Ok(Self {
            delta_x,
            unit_scale,
            field_height,
        })
    }

    pub fn delta_x(&self) -> f64 {
        self.delta_x
    }

    /// Height above the launch point at horizontal distance `x`
    pub fn height_at(state: &ProjectileState, x: f64) -> f64 {
        let params = state.params();
        let theta = params.theta();
        let v = params.velocity();
        let cos = theta.cos();
        x * theta.tan() - (x * x * params.gravity()) / (2.0 * v * v * cos * cos)
    }

    /// Move the projectile one increment along its trajectory
    pub fn step(&self, state: &mut ProjectileState) {
        let new_x = state.pos.x + self.delta_x;
        let height = Self::height_at(state, new_x);
        state.pos.x = new_x;
        state.pos.y = self.field_height - height * self.unit_scale;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{FieldBounds, LaunchParams};

    fn projectile(angle: f64, velocity: f64, field: &FieldBounds) -> ProjectileState {
        ProjectileState::launch(LaunchParams::new(angle, velocity).unwrap(), field)
    }

    #[test]
    fn test_first_steps_match_closed_form() {
        let field = FieldBounds::new(2000.0, 1000.0).unwrap();
        let stepper = PhysicsStepper::new(5.0, 1.0, field.height).unwrap();
        let mut p = projectile(45.0, 20.0, &field);

        // h(x) = x - 0.0245 x^2 for theta = 45, v = 20
        let expected = [(5.0, 995.6125), (10.0, 992.45), (15.0, 990.5125)];
        for (x, y) in expected {
            stepper.step(&mut p);
            assert!((p.pos.x - x).abs() < 1e-9);
            assert!((p.pos.y - y).abs() < 1e-6, "y at x={x}: {}", p.pos.y);
        }
    }

    #[test]
    fn test_unit_scale_multiplies_height() {
        let field = FieldBounds::new(2000.0, 1000.0).unwrap();
        let stepper = PhysicsStepper::new(5.0, 2.0, field.height).unwrap();
        let mut p = projectile(45.0, 20.0, &field);
        stepper.step(&mut p);
        assert!((p.pos.y - (1000.0 - 2.0 * 4.3875)).abs() < 1e-6);

        // A zero scale flattens the trajectory onto the ground line
        let flat = PhysicsStepper::new(5.0, 0.0, field.height).unwrap();
        let mut p = projectile(45.0, 20.0, &field);
        flat.step(&mut p);
        assert_eq!(p.pos.y, 1000.0);
    }

    #[test]
    fn test_step_is_pure_in_x() {
        let field = FieldBounds::new(2000.0, 1000.0).unwrap();
        let stepper = PhysicsStepper::new(5.0, 1.0, field.height).unwrap();
        let mut a = projectile(30.0, 50.0, &field);
        let mut b = projectile(30.0, 50.0, &field);
        b.pos.y = 12.0; // y is recomputed, never accumulated
        stepper.step(&mut a);
        stepper.step(&mut b);
        assert_eq!(a.pos, b.pos);
    }

    #[test]
    fn test_zero_angle_drops_below_ground() {
        let field = FieldBounds::new(2000.0, 1000.0).unwrap();
        let stepper = PhysicsStepper::new(5.0, 1.0, field.height).unwrap();
        let mut p = projectile(0.0, 20.0, &field);
        stepper.step(&mut p);
        assert!(p.pos.y > field.height);
    }

    #[test]
    fn test_rejects_bad_step_config() {
        assert_eq!(
            PhysicsStepper::new(0.0, 1.0, 100.0),
            Err(ValidationError::DeltaX(0.0))
        );
        assert_eq!(
            PhysicsStepper::new(5.0, f64::INFINITY, 100.0),
            Err(ValidationError::UnitScale(f64::INFINITY))
        );
    }
}
