//! Trigger zone around the target
//!
//! A hit is registered when the projectile's reference point enters an
//! axis-aligned box derived from the target's position and extent. The box is
//! deliberately lopsided: it reaches a full target width plus a margin to the
//! left, but only half a width to the right.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Position, Rect};
use super::state::TargetSpec;
use crate::consts::TRIGGER_MARGIN;

/// Hit box for one run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TriggerZone {
    rect: Rect,
}

impl TriggerZone {
    /// Derive the zone from a target
    ///
    /// Corners are kept exactly as computed. Negative extents produce an
    /// inverted zone that never matches.
    pub fn from_target(target: &TargetSpec) -> Self {
        let upper_left = DVec2::new(
            target.pos.x - target.width - TRIGGER_MARGIN,
            target.pos.y - target.height,
        );
        let lower_right = DVec2::new(
            target.pos.x + target.width / 2.0,
            target.pos.y + target.height,
        );
        Self {
            rect: Rect::new(upper_left, lower_right),
        }
    }

    pub fn from_rect(rect: Rect) -> Self {
        Self { rect }
    }

    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.rect.contains(x, y)
    }

    #[inline]
    pub fn contains_point(&self, p: Position) -> bool {
        self.rect.contains_point(p)
    }

    pub fn is_inverted(&self) -> bool {
        self.rect.is_inverted()
    }

    pub fn rect(&self) -> &Rect {
        &self.rect
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_corners_from_target() {
        let target = TargetSpec::new(DVec2::new(400.0, 200.0), 40.0, 30.0);
        let zone = TriggerZone::from_target(&target);
        assert_eq!(zone.rect().upper_left, DVec2::new(355.0, 170.0));
        assert_eq!(zone.rect().lower_right, DVec2::new(420.0, 230.0));
        assert!(!zone.is_inverted());
    }

    #[test]
    fn test_zone_is_asymmetric() {
        let target = TargetSpec::new(DVec2::new(400.0, 200.0), 40.0, 30.0);
        let zone = TriggerZone::from_target(&target);
        // 45 units to the left of the target point, only 20 to the right
        assert!(zone.contains(355.0, 200.0));
        assert!(!zone.contains(354.9, 200.0));
        assert!(zone.contains(420.0, 200.0));
        assert!(!zone.contains(420.1, 200.0));
    }

    #[test]
    fn test_zone_inclusive_edges() {
        let zone = TriggerZone::from_rect(Rect::new(
            DVec2::new(10.0, 10.0),
            DVec2::new(50.0, 50.0),
        ));
        assert!(zone.contains(10.0, 10.0));
        assert!(zone.contains(50.0, 50.0));
        assert!(!zone.contains(9.0, 30.0));
        assert!(!zone.contains(30.0, 9.0));
    }

    #[test]
    fn test_zero_extent_target_degrades_to_strip() {
        let target = TargetSpec::new(DVec2::new(100.0, 100.0), 0.0, 0.0);
        let zone = TriggerZone::from_target(&target);
        assert!(zone.contains(100.0, 100.0));
        assert!(zone.contains(95.0, 100.0));
        assert!(!zone.contains(100.0, 100.5));
    }

    #[test]
    fn test_negative_extent_yields_inverted_zone_kept_as_is() {
        let target = TargetSpec::new(DVec2::new(100.0, 100.0), -40.0, 10.0);
        let zone = TriggerZone::from_target(&target);
        // ul.x = 100 + 40 - 5 = 135, lr.x = 100 - 20 = 80
        assert_eq!(zone.rect().upper_left.x, 135.0);
        assert_eq!(zone.rect().lower_right.x, 80.0);
        assert!(zone.is_inverted());
        assert!(!zone.contains(100.0, 100.0));
        assert!(!zone.contains_point(target.pos));
    }
}
