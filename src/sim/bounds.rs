//! Play area geometry
//!
//! The play area is an axis-aligned rectangle in screen space (y grows down).
//! Entity positions are top-left corners, matching how the DOM lays them out.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Rectangle the player is confined to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayArea {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl PlayArea {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Radius of the circle enemies spawn on
    pub fn spawn_distance(&self, margin: f32) -> f32 {
        self.width.max(self.height) / 2.0 + margin
    }

    /// Clamp a top-left position so a box of `dims` stays fully inside
    pub fn clamp_box(&self, pos: Vec2, dims: Vec2) -> Vec2 {
        // max before min: an oversized box pins to the top-left edge
        Vec2::new(
            pos.x.min(self.right() - dims.x).max(self.left),
            pos.y.min(self.bottom() - dims.y).max(self.top),
        )
    }

    /// True when a box of `dims` at `pos` lies fully inside
    pub fn contains_box(&self, pos: Vec2, dims: Vec2) -> bool {
        pos.x >= self.left
            && pos.y >= self.top
            && pos.x + dims.x <= self.right()
            && pos.y + dims.y <= self.bottom()
    }

    /// True when `point` is further than `threshold` from the center on either axis
    pub fn beyond(&self, point: Vec2, threshold: f32) -> bool {
        let offset = (point - self.center()).abs();
        offset.x > threshold || offset.y > threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_and_spawn_distance() {
        let area = PlayArea::new(10.0, 20.0, 800.0, 600.0);
        assert_eq!(area.center(), Vec2::new(410.0, 320.0));
        assert_eq!(area.spawn_distance(100.0), 500.0);
    }

    #[test]
    fn test_clamp_box() {
        let area = PlayArea::new(0.0, 0.0, 200.0, 100.0);
        let dims = Vec2::new(10.0, 50.0);

        assert_eq!(area.clamp_box(Vec2::new(-5.0, -5.0), dims), Vec2::ZERO);
        assert_eq!(
            area.clamp_box(Vec2::new(500.0, 500.0), dims),
            Vec2::new(190.0, 50.0)
        );
        let inside = Vec2::new(40.0, 20.0);
        assert_eq!(area.clamp_box(inside, dims), inside);
        assert!(area.contains_box(area.clamp_box(Vec2::new(195.0, 99.0), dims), dims));
    }

    #[test]
    fn test_beyond() {
        let area = PlayArea::new(0.0, 0.0, 200.0, 200.0);
        assert!(!area.beyond(Vec2::new(100.0, 100.0), 50.0));
        assert!(!area.beyond(Vec2::new(150.0, 50.0), 50.0));
        assert!(area.beyond(Vec2::new(151.0, 100.0), 50.0));
        assert!(area.beyond(Vec2::new(100.0, 49.0), 50.0));
    }
}
