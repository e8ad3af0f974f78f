//! Per-frame simulation step
//!
//! One call to [`SimulationEngine::step`] is one frame: record the apex,
//! evaluate the termination predicates (out-of-bounds first, then the trigger
//! zone), and only if neither fires advance the projectile.

use super::collision::TriggerZone;
use super::geometry::Position;
use super::physics::PhysicsStepper;
use super::state::{FieldBounds, Outcome, ProjectileState, RunPhase, RunRequest, RunState};
use crate::error::SimError;

/// Result of a single engine step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepResult {
    /// Projectile moved; carries the new position
    Advanced(Position),
    /// The run ended on this step
    Terminated(Outcome),
    /// The run had already ended; nothing changed
    Idle,
}

/// Owns everything that changes during a run
#[derive(Debug, Clone)]
pub struct SimulationEngine {
    projectile: Option<ProjectileState>,
    zone: TriggerZone,
    field: FieldBounds,
    stepper: PhysicsStepper,
    run: RunState,
}

impl SimulationEngine {
    /// Validate a request and set up a fresh run
    pub fn new(request: &RunRequest, delta_x: f64) -> Result<Self, SimError> {
        let (params, field) = request.validate()?;
        let stepper = PhysicsStepper::new(delta_x, request.unit_scale, field.height)?;
        let zone = TriggerZone::from_target(&request.target);
        if zone.is_inverted() {
            log::warn!(
                "Trigger zone is inverted ({:?}); this run can never hit",
                zone.rect()
            );
        }

        Ok(Self {
            projectile: Some(ProjectileState::launch(params, &field)),
            zone,
            field,
            stepper,
            run: RunState::new(&field),
        })
    }

    /// Advance the run by one frame
    ///
    /// A non-finite position is fatal: the run moves to `Failed`, drops the
    /// projectile, and every later call returns the same error.
    pub fn step(&mut self) -> Result<StepResult, SimError> {
        if let RunPhase::Failed { x, y } = self.run.phase {
            return Err(SimError::NonFinitePosition { x, y });
        }
        let Some(projectile) = self.projectile.as_mut() else {
            return Ok(StepResult::Idle);
        };

        let (x, y) = (projectile.pos.x, projectile.pos.y);

        if y < self.run.max_height_reached {
            self.run.max_height_reached = y;
        }

        let hit = if self.field.is_out_of_bounds(x, y) {
            Some(false)
        } else if self.zone.contains(x, y) {
            Some(true)
        } else {
            None
        };

        if let Some(hit) = hit {
            let outcome = Outcome {
                x,
                y,
                max_height: self.run.max_height_reached,
                hit,
            };
            self.projectile = None;
            self.run.phase = RunPhase::Terminated(outcome);
            log::debug!(
                "Run terminated after {} steps: {}",
                self.run.steps,
                if hit { "hit" } else { "out of bounds" }
            );
            return Ok(StepResult::Terminated(outcome));
        }

        self.stepper.step(projectile);
        self.run.steps += 1;

        let pos = projectile.pos;
        if !pos.is_finite() {
            self.projectile = None;
            self.run.phase = RunPhase::Failed { x: pos.x, y: pos.y };
            return Err(SimError::NonFinitePosition { x: pos.x, y: pos.y });
        }
        Ok(StepResult::Advanced(pos))
    }

    /// Current projectile position, `None` once the run has ended
    pub fn position(&self) -> Option<Position> {
        self.projectile.as_ref().map(|p| p.pos)
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.run.outcome()
    }

    pub fn is_terminated(&self) -> bool {
        self.run.is_terminated()
    }

    pub fn is_failed(&self) -> bool {
        self.run.is_failed()
    }

    pub fn run_state(&self) -> &RunState {
        &self.run
    }

    pub fn trigger_zone(&self) -> &TriggerZone {
        &self.zone
    }

    pub fn field(&self) -> &FieldBounds {
        &self.field
    }

    /// Upper bound on steps before x must leave the field
    pub fn max_steps(&self) -> u64 {
        (self.field.width / self.stepper.delta_x()).ceil() as u64 + 2
    }

    /// Step until the run ends and return its outcome
    pub fn run_to_end(&mut self) -> Result<Outcome, SimError> {
        loop {
            match self.step()? {
                StepResult::Terminated(outcome) => return Ok(outcome),
                StepResult::Advanced(_) => {}
                StepResult::Idle => return self.outcome().ok_or(SimError::Cancelled),
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn place_projectile(&mut self, pos: Position) {
        if let Some(p) = self.projectile.as_mut() {
            p.pos = pos;
        }
    }
}
