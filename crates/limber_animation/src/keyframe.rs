//! Keyframes and per-property dynamic descriptors
//!
//! A keyframe is one stage of a multi-stage animation: a delay plus the set
//! of properties it drives. While a stage is in flight each property channel
//! carries a [`Dynamic`] descriptor - the animation intent, a spring
//! integrator, and (in duration mode) a tween.

use smallvec::SmallVec;

use limber_core::StyleProperty;

use crate::easing::Tween;
use crate::spring::Spring;

/// Animation intent for one channel, as a pure function of the prior
/// resolved value and normalized progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Target {
    /// Move to an absolute value.
    To(f32),
    /// Move by a positive delta from the prior value.
    Add(f32),
    /// Move by a negative delta from the prior value.
    Sub(f32),
    /// Hold the prior value in place.
    Stay,
}

impl Target {
    /// Value at progress `t` in [0, 1], starting from `from`.
    pub fn resolve(self, from: f32, t: f32) -> f32 {
        match self {
            Target::To(v) => from + (v - from) * t,
            Target::Add(d) => from + d * t,
            Target::Sub(d) => from - d * t,
            Target::Stay => from,
        }
    }

    /// Total displacement this intent covers from `from`.
    pub(crate) fn span(self, from: f32) -> f32 {
        self.resolve(from, 1.0) - from
    }
}

/// In-flight state for one property channel.
///
/// `tween: Some` selects duration/easing mode; `None` selects spring mode.
/// The two are mutually exclusive per channel per keyframe.
#[derive(Clone, Copy, Debug)]
pub struct Dynamic {
    pub target: Target,
    pub spring: Spring,
    pub tween: Option<Tween>,
}

impl Dynamic {
    pub fn new(target: Target, spring: Spring, tween: Option<Tween>) -> Self {
        Self {
            target,
            spring,
            tween,
        }
    }

    /// Normalized progress for this channel: eased time in duration mode,
    /// spring displacement in spring mode.
    pub(crate) fn progress(&self, elapsed_in_stage_ms: f32) -> f32 {
        match &self.tween {
            Some(tween) => tween.progress(elapsed_in_stage_ms),
            None => self.spring.position(),
        }
    }

    /// Whether this channel has reached its terminal condition.
    pub(crate) fn is_terminal(&self, elapsed_in_stage_ms: f32) -> bool {
        match &self.tween {
            Some(tween) => tween.is_finished(elapsed_in_stage_ms),
            None => self.spring.is_settled(),
        }
    }
}

/// One stage of a multi-stage animation.
#[derive(Clone, Debug, Default)]
pub struct StyleKeyframe {
    /// Time to wait before the stage's duration/spring window opens.
    pub delay_ms: f32,
    /// Properties this stage drives. An empty set is a no-op stage that
    /// completes on the first tick past its delay.
    pub target: SmallVec<[StyleProperty<Dynamic>; 4]>,
}

impl StyleKeyframe {
    pub fn new(
        delay_ms: f32,
        target: impl IntoIterator<Item = StyleProperty<Dynamic>>,
    ) -> Self {
        Self {
            delay_ms,
            target: target.into_iter().collect(),
        }
    }

    /// The stage cannot complete before its longest configured tween has
    /// elapsed, even if every channel already reads as terminal.
    pub(crate) fn duration_floor(&self) -> f32 {
        let mut floor = 0.0f32;
        for prop in &self.target {
            prop.for_each_channel(|_, dynamic| {
                if let Some(tween) = &dynamic.tween {
                    floor = floor.max(tween.duration_ms);
                }
            });
        }
        floor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Easing;
    use crate::spring::SpringConfig;

    fn tweened(target: Target, duration_ms: f32) -> Dynamic {
        Dynamic::new(
            target,
            Spring::new(SpringConfig::default()),
            Some(Tween::new(duration_ms, Easing::Linear)),
        )
    }

    #[test]
    fn target_resolution() {
        assert_eq!(Target::To(100.0).resolve(0.0, 0.5), 50.0);
        assert_eq!(Target::Add(10.0).resolve(5.0, 1.0), 15.0);
        assert_eq!(Target::Sub(10.0).resolve(5.0, 1.0), -5.0);
        assert_eq!(Target::Stay.resolve(7.0, 0.3), 7.0);
    }

    #[test]
    fn span_covers_full_displacement() {
        assert_eq!(Target::To(100.0).span(40.0), 60.0);
        assert_eq!(Target::Sub(25.0).span(0.0), -25.0);
        assert_eq!(Target::Stay.span(3.0), 0.0);
    }

    #[test]
    fn duration_floor_takes_longest_tween() {
        let frame = StyleKeyframe::new(
            0.0,
            [
                StyleProperty::Left(tweened(Target::To(10.0), 200.0)),
                StyleProperty::Opacity(tweened(Target::To(1.0), 500.0)),
            ],
        );
        assert_eq!(frame.duration_floor(), 500.0);
    }

    #[test]
    fn duration_floor_is_zero_for_spring_only_stages() {
        let frame = StyleKeyframe::new(
            0.0,
            [StyleProperty::Left(Dynamic::new(
                Target::To(10.0),
                Spring::new(SpringConfig::no_wobble()),
                None,
            ))],
        );
        assert_eq!(frame.duration_floor(), 0.0);
    }
}
