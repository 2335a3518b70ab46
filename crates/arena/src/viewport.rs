//! # Viewport
//!
//! Smoothed camera window that trails a followed entity, one per client.
//!
//! Each update the window aims to center the followed position and closes a
//! fraction of the gap (first-order exponential lag). `smoothing` is the
//! fraction closed per frame at `REFERENCE_TICK_RATE`; it is converted to a
//! decay rate so the motion is the same at any frame rate:
//!
//! ```text
//! rate  = -ln(1 - smoothing) * REFERENCE_TICK_RATE
//! alpha = 1 - exp(-rate * dt)
//! ```
//!
//! After smoothing, the window is clamped inside the bounds, if any.

use arena_shared::{Vec2, REFERENCE_TICK_RATE};
use serde::{Deserialize, Serialize};

use crate::error::{ArenaError, ArenaResult};

/// Viewport settings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Visible width in world units.
    pub width: f32,
    /// Visible height in world units.
    pub height: f32,
    /// Fraction of the remaining distance closed per reference frame, in (0, 1].
    pub smoothing: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            smoothing: 0.1,
        }
    }
}

impl ViewportConfig {
    /// Checks the settings are usable.
    ///
    /// # Errors
    ///
    /// Returns `ArenaError::InvalidConfig` for a non-positive size or a
    /// smoothing factor outside (0, 1].
    pub fn validate(&self) -> ArenaResult<()> {
        if !(self.width > 0.0 && self.height > 0.0) || !self.width.is_finite() || !self.height.is_finite() {
            return Err(ArenaError::InvalidConfig(format!(
                "viewport size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if !(self.smoothing > 0.0 && self.smoothing <= 1.0) {
            return Err(ArenaError::InvalidConfig(format!(
                "viewport.smoothing must be within (0, 1], got {}",
                self.smoothing
            )));
        }
        Ok(())
    }
}

/// Smoothed, optionally bounded camera window.
#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
    /// Top-left corner in world units.
    position: Vec2,
    /// Where the top-left corner is heading.
    target: Vec2,
    /// Position of the entity being followed.
    followed: Vec2,
    /// Visible size in world units.
    size: Vec2,
    /// Per-reference-frame smoothing factor.
    smoothing: f32,
    /// Width and height of the area the window must stay inside.
    bounds: Option<Vec2>,
}

impl Viewport {
    /// Creates a viewport at the origin.
    #[must_use]
    pub fn new(size: Vec2, smoothing: f32) -> Self {
        Self {
            position: Vec2::ZERO,
            target: Vec2::ZERO,
            followed: Vec2::ZERO,
            size,
            smoothing,
            bounds: None,
        }
    }

    /// Creates a viewport from settings.
    #[must_use]
    pub fn from_config(config: &ViewportConfig) -> Self {
        Self::new(Vec2::new(config.width, config.height), config.smoothing)
    }

    /// Sets the position to follow.
    pub fn follow(&mut self, position: Vec2) {
        self.followed = position;
    }

    /// Keeps the window inside a `width x height` area.
    pub fn set_bounds(&mut self, width: f32, height: f32) {
        self.bounds = Some(Vec2::new(width, height));
    }

    /// Removes the bounds.
    pub fn clear_bounds(&mut self) {
        self.bounds = None;
    }

    /// Advances the smoothing by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        self.target = self.followed - self.size * 0.5;
        let alpha = self.blend_factor(dt);
        self.position += (self.target - self.position) * alpha;
        self.clamp_to_bounds();
    }

    /// Jumps straight to the target, e.g. on respawn.
    pub fn snap_to_target(&mut self) {
        self.target = self.followed - self.size * 0.5;
        self.position = self.target;
        self.clamp_to_bounds();
    }

    /// Fraction of the remaining distance closed over `dt` seconds.
    #[must_use]
    pub fn blend_factor(&self, dt: f32) -> f32 {
        if !(dt > 0.0) || !(self.smoothing > 0.0) {
            return 0.0;
        }
        if self.smoothing >= 1.0 || dt.is_infinite() {
            return 1.0;
        }
        let rate = -(1.0 - self.smoothing).ln() * REFERENCE_TICK_RATE;
        1.0 - (-rate * dt).exp()
    }

    fn clamp_to_bounds(&mut self) {
        if let Some(bounds) = self.bounds {
            self.position.x = self.position.x.min(bounds.x - self.size.x).max(0.0);
            self.position.y = self.position.y.min(bounds.y - self.size.y).max(0.0);
        }
    }

    /// Top-left corner in world units.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Current target of the top-left corner.
    #[must_use]
    pub const fn target(&self) -> Vec2 {
        self.target
    }

    /// Visible size in world units.
    #[must_use]
    pub const fn size(&self) -> Vec2 {
        self.size
    }

    /// Bounds, if set.
    #[must_use]
    pub const fn bounds(&self) -> Option<Vec2> {
        self.bounds
    }

    /// Converts a world point to window-relative coordinates.
    #[must_use]
    pub fn world_to_screen(&self, point: Vec2) -> Vec2 {
        point - self.position
    }

    /// Converts window-relative coordinates to a world point.
    #[must_use]
    pub fn screen_to_world(&self, point: Vec2) -> Vec2 {
        point + self.position
    }

    /// Returns true if `point` is inside the window grown by `margin` on every side.
    #[must_use]
    pub fn is_visible(&self, point: Vec2, margin: f32) -> bool {
        let local = self.world_to_screen(point);
        local.x >= -margin
            && local.y >= -margin
            && local.x <= self.size.x + margin
            && local.y <= self.size.y + margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f32 = 1.0 / 60.0;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_one_reference_frame_matches_plain_lerp() {
        let mut viewport = Viewport::new(Vec2::new(800.0, 600.0), 0.1);
        viewport.follow(Vec2::new(1400.0, 1300.0));
        viewport.update(FRAME);

        // target = (1000, 1000); one step closes 10%
        assert_eq!(viewport.target(), Vec2::new(1000.0, 1000.0));
        assert!(approx(viewport.position().x, 100.0));
        assert!(approx(viewport.position().y, 100.0));
    }

    #[test]
    fn test_frame_rate_independent() {
        let mut fast = Viewport::new(Vec2::new(800.0, 600.0), 0.2);
        let mut slow = fast.clone();
        fast.follow(Vec2::new(2000.0, 900.0));
        slow.follow(Vec2::new(2000.0, 900.0));

        for _ in 0..120 {
            fast.update(1.0 / 120.0);
        }
        for _ in 0..30 {
            slow.update(1.0 / 30.0);
        }

        // both traveled for one second; only f32 rounding differs
        assert!((fast.position().x - slow.position().x).abs() < 0.05);
        assert!((fast.position().y - slow.position().y).abs() < 0.05);
    }

    #[test]
    fn test_converges_on_target() {
        let mut viewport = Viewport::new(Vec2::new(100.0, 100.0), 0.1);
        viewport.follow(Vec2::new(550.0, 350.0));
        for _ in 0..600 {
            viewport.update(FRAME);
        }

        assert!(approx(viewport.position().x, 500.0));
        assert!(approx(viewport.position().y, 300.0));
    }

    #[test]
    fn test_bounds_clamp() {
        let mut viewport = Viewport::new(Vec2::new(800.0, 600.0), 1.0);
        viewport.set_bounds(2000.0, 1500.0);

        viewport.follow(Vec2::new(0.0, 0.0));
        viewport.update(FRAME);
        assert_eq!(viewport.position(), Vec2::new(0.0, 0.0));

        viewport.follow(Vec2::new(5000.0, 5000.0));
        viewport.update(FRAME);
        assert_eq!(viewport.position(), Vec2::new(1200.0, 900.0));

        viewport.clear_bounds();
        viewport.update(FRAME);
        assert_eq!(viewport.position(), Vec2::new(4600.0, 4700.0));
    }

    #[test]
    fn test_zero_dt_does_not_move() {
        let mut viewport = Viewport::new(Vec2::new(100.0, 100.0), 0.5);
        viewport.follow(Vec2::new(1000.0, 1000.0));
        viewport.update(0.0);
        viewport.update(-1.0);
        viewport.update(f32::NAN);

        assert_eq!(viewport.position(), Vec2::ZERO);
    }

    #[test]
    fn test_snap_and_visibility() {
        let mut viewport = Viewport::new(Vec2::new(200.0, 100.0), 0.1);
        viewport.follow(Vec2::new(500.0, 500.0));
        viewport.snap_to_target();

        assert_eq!(viewport.position(), Vec2::new(400.0, 450.0));
        assert!(viewport.is_visible(Vec2::new(500.0, 500.0), 0.0));
        assert!(!viewport.is_visible(Vec2::new(390.0, 500.0), 0.0));
        assert!(viewport.is_visible(Vec2::new(390.0, 500.0), 20.0));

        let screen = viewport.world_to_screen(Vec2::new(450.0, 460.0));
        assert_eq!(screen, Vec2::new(50.0, 10.0));
        assert_eq!(viewport.screen_to_world(screen), Vec2::new(450.0, 460.0));
    }

    #[test]
    fn test_config_validation() {
        assert!(ViewportConfig::default().validate().is_ok());
        assert!(ViewportConfig { smoothing: 1.0, ..ViewportConfig::default() }.validate().is_ok());
        assert!(ViewportConfig { smoothing: 1.5, ..ViewportConfig::default() }.validate().is_err());
        assert!(ViewportConfig { width: 0.0, ..ViewportConfig::default() }.validate().is_err());
    }
}
