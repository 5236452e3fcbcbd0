//! Easing functions and duration-based tweens

use std::f32::consts::PI;

/// Default stage duration when none is configured, in milliseconds.
pub const DEFAULT_DURATION_MS: f32 = 350.0;

/// Easing function over normalized progress.
///
/// Every variant satisfies `apply(0) == 0` and `apply(1) == 1`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Easing {
    Linear,
    SineIn,
    SineOut,
    /// Sinusoidal in-out, the engine-wide default.
    #[default]
    SineInOut,
    QuadIn,
    QuadOut,
    QuadInOut,
    CubicIn,
    CubicOut,
    CubicInOut,
    /// CSS-style cubic bezier control points (x1, y1, x2, y2).
    Bezier(f32, f32, f32, f32),
}

impl Easing {
    /// Apply the easing to a progress value in [0, 1].
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::SineIn => 1.0 - (t * PI / 2.0).cos(),
            Easing::SineOut => (t * PI / 2.0).sin(),
            Easing::SineInOut => 0.5 * (1.0 - (t * PI).cos()),
            Easing::QuadIn => t * t,
            Easing::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::CubicIn => t * t * t,
            Easing::CubicOut => 1.0 - (1.0 - t).powi(3),
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::Bezier(x1, y1, x2, y2) => bezier(t, x1, y1, x2, y2),
        }
    }
}

/// Duration + easing descriptor for a duration-mode property.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    pub duration_ms: f32,
    pub ease: Easing,
}

impl Default for Tween {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_DURATION_MS,
            ease: Easing::default(),
        }
    }
}

impl Tween {
    pub fn new(duration_ms: f32, ease: Easing) -> Self {
        Self { duration_ms, ease }
    }

    /// Eased progress for the elapsed time within a stage.
    ///
    /// A zero or negative duration counts as already complete.
    pub fn progress(&self, elapsed_ms: f32) -> f32 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        self.ease.apply((elapsed_ms / self.duration_ms).clamp(0.0, 1.0))
    }

    /// Terminal once the full duration has elapsed.
    pub fn is_finished(&self, elapsed_ms: f32) -> bool {
        elapsed_ms >= self.duration_ms
    }
}

/// Evaluate a CSS cubic bezier easing at progress `t`.
///
/// Solves for the curve parameter whose x equals `t` with Newton-Raphson,
/// falling back to bisection when the slope is too flat to iterate on.
/// Internals run in f64; f32 precision jitters visibly at high frame rates.
fn bezier(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    let x = t as f64;
    let (x1, y1, x2, y2) = (x1 as f64, y1 as f64, x2 as f64, y2 as f64);

    let mut p = x;
    for _ in 0..8 {
        let err = curve(p, x1, x2) - x;
        if err.abs() < 1e-7 {
            return curve(p, y1, y2) as f32;
        }
        let slope = slope(p, x1, x2);
        if slope.abs() < 1e-7 {
            break;
        }
        p -= err / slope;
    }

    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    p = x;
    for _ in 0..20 {
        let val = curve(p, x1, x2);
        if (val - x).abs() < 1e-7 {
            break;
        }
        if val < x {
            lo = p;
        } else {
            hi = p;
        }
        p = (lo + hi) * 0.5;
    }

    curve(p, y1, y2) as f32
}

/// One-dimensional cubic bezier with endpoints pinned at 0 and 1, in Horner
/// form.
#[inline]
fn curve(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    ((a * t + b) * t + c) * t
}

#[inline]
fn slope(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    (3.0 * a * t + 2.0 * b) * t + c
}
