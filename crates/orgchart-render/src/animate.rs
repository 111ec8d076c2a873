//! The interpolation contract for animated transitions.
//!
//! The engine never runs timers: it hands out tweens (start value, end
//! value, duration) and the host samples them from its own frame scheduler.
//! A new render mid-flight simply issues fresh tweens starting from the
//! elements' current interpolated state.

use crate::viewport::ViewportTransform;

pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Symmetric cubic ease: slow in, slow out.
pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    #[default]
    CubicInOut,
}

impl Easing {
    fn apply(self, t: f64) -> f64 {
        match self {
            Easing::Linear => t.clamp(0.0, 1.0),
            Easing::CubicInOut => ease_cubic_in_out(t),
        }
    }
}

/// A scalar transition. `value_at` clamps to the endpoints, so sampling
/// before the start or after the end is safe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: f64,
    pub to: f64,
    pub duration_ms: f64,
    pub easing: Easing,
}

impl Tween {
    pub fn new(from: f64, to: f64, duration_ms: f64) -> Self {
        Self {
            from,
            to,
            duration_ms,
            easing: Easing::default(),
        }
    }

    pub fn value_at(&self, elapsed_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return self.to;
        }
        let t = self.easing.apply(elapsed_ms / self.duration_ms);
        lerp(self.from, self.to, t)
    }

    pub fn is_done(&self, elapsed_ms: f64) -> bool {
        elapsed_ms >= self.duration_ms
    }
}

/// Interpolates a full viewport transform, the way the animated zoom
/// buttons move the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformTween {
    pub from: ViewportTransform,
    pub to: ViewportTransform,
    pub duration_ms: f64,
    pub easing: Easing,
}

impl TransformTween {
    pub fn new(from: ViewportTransform, to: ViewportTransform, duration_ms: f64) -> Self {
        Self {
            from,
            to,
            duration_ms,
            easing: Easing::default(),
        }
    }

    pub fn value_at(&self, elapsed_ms: f64) -> ViewportTransform {
        if self.duration_ms <= 0.0 {
            return self.to;
        }
        let t = self.easing.apply(elapsed_ms / self.duration_ms);
        ViewportTransform::new(
            lerp(self.from.translate_x, self.to.translate_x, t),
            lerp(self.from.translate_y, self.to.translate_y, t),
            lerp(self.from.scale, self.to.scale, t),
        )
    }
}
