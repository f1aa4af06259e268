//! Viewport animation: eased interpolation of projection center and scale.
//!
//! An animation is a plain value advanced by host frame timestamps. It does
//! not own the projection; each [`Animator::frame`] hands back the viewport
//! for that instant and the controller applies it. Starting a new zoom drops
//! the running one, so two zooms never interleave their frames.

#[cfg(test)]
#[path = "animate_test.rs"]
mod animate_test;

use crate::projection::Viewport;

/// Quadratic ease-in-out on `[0, 1]`.
#[must_use]
pub fn ease_quad_in_out(t: f64) -> f64 {
    let t = t * 2.0;
    if t <= 1.0 {
        t * t / 2.0
    } else {
        let t = t - 1.0;
        (t * (2.0 - t) + 1.0) / 2.0
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// One sampled animation frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationFrame {
    pub viewport: Viewport,
    pub done: bool,
}

/// A single zoom from one viewport to another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomAnimation {
    from: Viewport,
    to: Viewport,
    duration_ms: f64,
    /// Pinned by the first sampled frame.
    started_at: Option<f64>,
}

impl ZoomAnimation {
    #[must_use]
    pub fn new(from: Viewport, to: Viewport, duration_ms: f64) -> Self {
        Self { from, to, duration_ms, started_at: None }
    }

    /// Viewport at timestamp `now` (milliseconds, host clock).
    pub fn sample(&mut self, now: f64) -> AnimationFrame {
        let started_at = *self.started_at.get_or_insert(now);
        let progress = if self.duration_ms > 0.0 {
            ((now - started_at) / self.duration_ms).clamp(0.0, 1.0)
        } else {
            1.0
        };
        let eased = ease_quad_in_out(progress);
        if eased >= 1.0 {
            return AnimationFrame { viewport: self.to, done: true };
        }
        let viewport = Viewport {
            center: (
                lerp(self.from.center.0, self.to.center.0, eased),
                lerp(self.from.center.1, self.to.center.1, eased),
            ),
            scale: lerp(self.from.scale, self.to.scale, eased),
        };
        AnimationFrame { viewport, done: false }
    }
}

/// Holds at most one running zoom.
#[derive(Debug, Default)]
pub struct Animator {
    active: Option<ZoomAnimation>,
}

impl Animator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start zooming from `from` to `to`, cancelling any zoom in flight.
    ///
    /// Returns `false` when there is nothing to animate (`from == to`).
    pub fn start(&mut self, from: Viewport, to: Viewport, duration_ms: f64) -> bool {
        if from == to {
            self.active = None;
            return false;
        }
        self.active = Some(ZoomAnimation::new(from, to, duration_ms));
        true
    }

    /// Advance to `now`. Returns `None` when idle.
    pub fn frame(&mut self, now: f64) -> Option<AnimationFrame> {
        let frame = self.active.as_mut()?.sample(now);
        if frame.done {
            self.active = None;
        }
        Some(frame)
    }

    pub fn cancel(&mut self) {
        self.active = None;
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }
}
