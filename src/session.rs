//! Game session around individual runs
//!
//! Places targets, keeps score and turns a missed run into a hint for the
//! next attempt. High scores live in memory only; saving them is up to the
//! caller.

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::settings::SimSettings;
use crate::sim::{FieldBounds, Outcome, Position, RunRequest};

/// Pick a target in the right half of the field, in its middle band
///
/// `x` lands in `[W/2, W/2 + W/4)` and `y` in `[H/3, H/3 + H/4)`, using
/// integer screen coordinates. Returns `None` for a field smaller than one
/// unit in either direction.
pub fn generate_target<R: Rng>(rng: &mut R, field: &FieldBounds) -> Option<Position> {
    let w = field.width as i64;
    let h = field.height as i64;
    if w == 0 || h == 0 {
        return None;
    }

    let mut offset = |span: i64| if span > 0 { rng.random_range(0..span) } else { 0 };
    let x = w / 2 + offset(w / 2 - w / 4);
    let y = h / 3 + offset(h / 2 - h / 4);
    Some(DVec2::new(x as f64, y as f64))
}

/// Hint given after a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Feedback {
    Hit,
    IncreaseAngle,
    DecreaseAngle,
    IncreaseVelocity,
    DecreaseVelocity,
}

impl Feedback {
    /// Compare where a missed shot went with where the target is
    ///
    /// Short shots that peaked above the target were too steep; short shots
    /// that stayed low lacked speed. Long shots that peaked above the target
    /// had too much speed; long flat shots need a steeper angle.
    ///
    /// Both heights are measured up from the ground; the target's raw screen y
    /// grows downward and is not compared with the apex directly.
    pub fn analyze(outcome: &Outcome, target: Position, field_height: f64) -> Self {
        if outcome.hit {
            return Feedback::Hit;
        }
        let apex = outcome.height_above_ground(field_height);
        let target_elevation = field_height - target.y;
        let too_high = apex > target_elevation;

        match (outcome.x < target.x, too_high) {
            (true, true) => Feedback::DecreaseAngle,
            (true, false) => Feedback::IncreaseVelocity,
            (false, true) => Feedback::DecreaseVelocity,
            (false, false) => Feedback::IncreaseAngle,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Feedback::Hit => "Target hit!",
            Feedback::IncreaseAngle => "Try a steeper angle",
            Feedback::DecreaseAngle => "Try a flatter angle",
            Feedback::IncreaseVelocity => "Try more velocity",
            Feedback::DecreaseVelocity => "Try less velocity",
        }
    }
}

/// Hits in the current session and the best seen so far
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub current: u32,
    pub high: u32,
}

impl Scoreboard {
    /// Start from a previously saved high score
    pub fn with_high(high: u32) -> Self {
        Self { current: 0, high }
    }

    /// Count a hit; returns true if it set a new high score
    pub fn record_hit(&mut self) -> bool {
        self.current += 1;
        if self.current > self.high {
            self.high = self.current;
            true
        } else {
            false
        }
    }
}

/// A sequence of launches at randomly placed targets
pub struct Session {
    rng: Pcg32,
    field: FieldBounds,
    target: Position,
    scoreboard: Scoreboard,
    settings: SimSettings,
}

impl Session {
    pub fn new(seed: u64, field: FieldBounds, settings: SimSettings) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let target = generate_target(&mut rng, &field)
            .unwrap_or_else(|| DVec2::new(field.width / 2.0, field.height / 2.0));
        log::info!("New session (seed {seed}), target at ({}, {})", target.x, target.y);
        Self {
            rng,
            field,
            target,
            scoreboard: Scoreboard::default(),
            settings,
        }
    }

    pub fn with_scoreboard(mut self, scoreboard: Scoreboard) -> Self {
        self.scoreboard = scoreboard;
        self
    }

    pub fn target(&self) -> Position {
        self.target
    }

    pub fn set_target(&mut self, target: Position) {
        self.target = target;
    }

    pub fn field(&self) -> &FieldBounds {
        &self.field
    }

    pub fn settings(&self) -> &SimSettings {
        &self.settings
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    /// Build the run request for a launch at the current target
    pub fn request(&self, angle_degrees: f64, velocity: f64) -> RunRequest {
        RunRequest::new(
            angle_degrees,
            velocity,
            self.target,
            self.field.width,
            self.field.height,
        )
        .with_unit_scale(self.settings.unit_scale)
        .with_target_extent(self.settings.target_width, self.settings.target_height)
    }

    /// Score a finished run; a hit moves the target
    pub fn resolve(&mut self, outcome: &Outcome) -> Feedback {
        let feedback = Feedback::analyze(outcome, self.target, self.field.height);
        if feedback == Feedback::Hit {
            if self.scoreboard.record_hit() {
                log::info!("New high score: {}", self.scoreboard.high);
            }
            self.reroll_target();
        }
        feedback
    }

    /// Abandon the current target and pick a new one
    pub fn reset(&mut self) {
        log::debug!("Session reset");
        self.reroll_target();
    }

    fn reroll_target(&mut self) {
        if let Some(target) = generate_target(&mut self.rng, &self.field) {
            self.target = target;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(x: f64, max_height: f64, hit: bool) -> Outcome {
        Outcome {
            x,
            y: 500.0,
            max_height,
            hit,
        }
    }

    #[test]
    fn test_generate_target_stays_in_band() {
        let field = FieldBounds::new(800.0, 480.0).unwrap();
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..200 {
            let t = generate_target(&mut rng, &field).unwrap();
            assert!((400.0..600.0).contains(&t.x), "x = {}", t.x);
            assert!((160.0..280.0).contains(&t.y), "y = {}", t.y);
            assert_eq!(t.x.fract(), 0.0);
        }
    }

    #[test]
    fn test_generate_target_tiny_fields() {
        let mut rng = Pcg32::seed_from_u64(1);
        let tiny = FieldBounds::new(0.5, 100.0).unwrap();
        assert_eq!(generate_target(&mut rng, &tiny), None);

        // One-unit spans leave the target at the start of each band
        let small = FieldBounds::new(3.0, 3.0).unwrap();
        assert_eq!(generate_target(&mut rng, &small), Some(DVec2::new(1.0, 1.0)));
    }

    #[test]
    fn test_generate_target_is_deterministic() {
        let field = FieldBounds::default();
        let mut a = Pcg32::seed_from_u64(42);
        let mut b = Pcg32::seed_from_u64(42);
        for _ in 0..10 {
            assert_eq!(generate_target(&mut a, &field), generate_target(&mut b, &field));
        }
    }

    #[test]
    fn test_feedback_quadrants() {
        // Target 300 across, 200 above the ground (field height 480)
        let target = DVec2::new(300.0, 280.0);
        let h = 480.0;
        // apex 250 above ground (raw y 230) vs apex 100 (raw y 380)
        assert_eq!(
            Feedback::analyze(&outcome(100.0, 230.0, false), target, h),
            Feedback::DecreaseAngle
        );
        assert_eq!(
            Feedback::analyze(&outcome(100.0, 380.0, false), target, h),
            Feedback::IncreaseVelocity
        );
        assert_eq!(
            Feedback::analyze(&outcome(500.0, 230.0, false), target, h),
            Feedback::DecreaseVelocity
        );
        assert_eq!(
            Feedback::analyze(&outcome(500.0, 380.0, false), target, h),
            Feedback::IncreaseAngle
        );
        assert_eq!(
            Feedback::analyze(&outcome(500.0, 380.0, true), target, h),
            Feedback::Hit
        );
    }

    #[test]
    fn test_scoreboard_tracks_high() {
        let mut board = Scoreboard::with_high(2);
        assert!(!board.record_hit());
        assert!(!board.record_hit());
        assert!(board.record_hit());
        assert_eq!(board, Scoreboard { current: 3, high: 3 });
    }

    #[test]
    fn test_session_hit_scores_and_moves_target() {
        let field = FieldBounds::default();
        let mut session = Session::new(99, field, SimSettings::default());
        let first = session.target();

        let miss = outcome(10.0, 470.0, false);
        assert_ne!(session.resolve(&miss), Feedback::Hit);
        assert_eq!(session.target(), first);
        assert_eq!(session.scoreboard().current, 0);

        // Keep hitting until the reroll lands somewhere new
        let mut moved = false;
        for _ in 0..10 {
            assert_eq!(session.resolve(&outcome(0.0, 0.0, true)), Feedback::Hit);
            moved |= session.target() != first;
        }
        assert!(moved);
        assert_eq!(session.scoreboard().current, 10);
        assert_eq!(session.scoreboard().high, 10);
    }

    #[test]
    fn test_session_request_uses_settings() {
        let settings = SimSettings {
            unit_scale: 2.5,
            target_width: 30.0,
            target_height: 20.0,
            ..Default::default()
        };
        let mut session = Session::new(5, FieldBounds::default(), settings);
        session.set_target(DVec2::new(500.0, 200.0));
        let request = session.request(40.0, 60.0);
        assert_eq!(request.unit_scale, 2.5);
        assert_eq!(request.target.pos, DVec2::new(500.0, 200.0));
        assert_eq!((request.target.width, request.target.height), (30.0, 20.0));
        assert_eq!(request.field_width, 800.0);
        assert!(request.validate().is_ok());
        assert_eq!(session.settings().unit_scale, 2.5);
    }

    #[test]
    fn test_session_resumes_saved_high_score() {
        let mut session = Session::new(3, FieldBounds::default(), SimSettings::default())
            .with_scoreboard(Scoreboard::with_high(2));
        assert_eq!(*session.scoreboard(), Scoreboard { current: 0, high: 2 });

        let hit = outcome(0.0, 0.0, true);
        session.resolve(&hit);
        session.resolve(&hit);
        assert_eq!(session.scoreboard().high, 2);
        session.resolve(&hit);
        assert_eq!(*session.scoreboard(), Scoreboard { current: 3, high: 3 });
    }
}
