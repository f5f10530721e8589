//! Linear transform tweens

use std::time::Duration;

use glam::Mat4;

/// Linear interpolation between two local transforms.
///
/// Scale and translation are interpolated linearly, rotation spherically.
#[derive(Debug, Clone)]
pub struct TransformTween {
    from: Mat4,
    to: Mat4,
    duration: Duration,
    elapsed: Duration,
}

impl TransformTween {
    /// Create a tween that starts at `from`
    pub fn new(from: Mat4, to: Mat4, duration: Duration) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
        }
    }

    /// Target transform
    pub fn target(&self) -> Mat4 {
        self.to
    }

    /// Advance the tween by `dt`
    pub fn advance(&mut self, dt: Duration) {
        self.elapsed = (self.elapsed + dt).min(self.duration);
    }

    /// Whether the tween has reached its target
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Progress in `[0, 1]`
    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// Transform presented at the current progress
    pub fn current(&self) -> Mat4 {
        let t = self.progress();
        if t >= 1.0 {
            return self.to;
        }
        let (s0, r0, t0) = self.from.to_scale_rotation_translation();
        let (s1, r1, t1) = self.to.to_scale_rotation_translation();
        Mat4::from_scale_rotation_translation(s0.lerp(s1, t), r0.slerp(r1, t), t0.lerp(t1, t))
    }
}
