//! Declarative animation builder
//!
//! Sequences are assembled as explicit immutable values: every
//! configuration call consumes the builder and returns the updated one, and
//! stage boundaries are explicit via [`Sequence::and_then`]. `build()`
//! resolves each stage's options onto every property it drives and produces
//! the [`Action`] the model consumes.
//!
//! # Example
//!
//! ```
//! use limber_animation::builder::{animate, to};
//! use limber_animation::StyleProperty;
//!
//! let action = animate()
//!     .props([StyleProperty::Left(to(100.0)), StyleProperty::Opacity(to(0.5))])
//!     .duration(500.0)
//!     .and_then()
//!     .props([StyleProperty::Left(to(0.0))])
//!     .build();
//! # let _ = action;
//! ```

use smallvec::SmallVec;

use limber_core::StyleProperty;

use crate::easing::{Easing, Tween, DEFAULT_DURATION_MS};
use crate::keyframe::{Dynamic, StyleKeyframe, Target};
use crate::model::Action;
use crate::spring::{Spring, SpringConfig};

/// Start a sequence that replaces whatever is currently in flight.
pub fn animate() -> Sequence {
    Sequence::new(Mode::Interrupt)
}

/// Start a sequence that runs after the current queue completes.
pub fn queue() -> Sequence {
    Sequence::new(Mode::Queue)
}

/// Animate to an absolute value.
pub fn to(value: f32) -> Target {
    Target::To(value)
}

/// Animate by a positive delta from the current value.
pub fn add(delta: f32) -> Target {
    Target::Add(delta)
}

/// Animate by a negative delta from the current value.
pub fn sub(delta: f32) -> Target {
    Target::Sub(delta)
}

/// Hold the current value in place for the stage.
pub fn stay() -> Target {
    Target::Stay
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Interrupt,
    Queue,
}

/// Options for one stage, applied last-write-wins per field.
#[derive(Clone, Debug, Default)]
struct Stage {
    delay_ms: f32,
    duration_ms: Option<f32>,
    easing: Option<Easing>,
    spring: Option<SpringConfig>,
    props: Vec<StyleProperty<Target>>,
}

impl Stage {
    fn is_empty(&self) -> bool {
        self.props.is_empty() && self.delay_ms <= 0.0
    }

    /// Distribute the stage's resolved configuration onto every property.
    /// A spring option wins over easing/duration; with no options at all
    /// the defaults apply (350ms, sinusoidal in-out).
    fn resolve(self) -> StyleKeyframe {
        let tween = if self.spring.is_some() {
            None
        } else {
            Some(Tween::new(
                self.duration_ms.unwrap_or(DEFAULT_DURATION_MS),
                self.easing.unwrap_or_default(),
            ))
        };
        let spring = Spring::new(self.spring.unwrap_or_default());
        let target: SmallVec<[StyleProperty<Dynamic>; 4]> = self
            .props
            .into_iter()
            .map(|prop| prop.map(|t| Dynamic::new(t, spring, tween)))
            .collect();
        StyleKeyframe {
            delay_ms: self.delay_ms.max(0.0),
            target,
        }
    }
}

/// An animation sequence under construction.
#[derive(Clone, Debug)]
pub struct Sequence {
    mode: Mode,
    done: Vec<Stage>,
    current: Stage,
}

impl Sequence {
    fn new(mode: Mode) -> Self {
        Self {
            mode,
            done: Vec::new(),
            current: Stage::default(),
        }
    }

    /// Add properties to the current stage.
    pub fn props(mut self, props: impl IntoIterator<Item = StyleProperty<Target>>) -> Self {
        self.current.props.extend(props);
        self
    }

    /// Set the current stage's duration in milliseconds.
    pub fn duration(mut self, ms: f32) -> Self {
        self.current.duration_ms = Some(ms);
        self
    }

    /// Set the current stage's delay in milliseconds.
    pub fn delay(mut self, ms: f32) -> Self {
        self.current.delay_ms = ms;
        self
    }

    /// Set the current stage's easing.
    pub fn easing(mut self, easing: Easing) -> Self {
        self.current.easing = Some(easing);
        self
    }

    /// Drive the current stage's properties with spring physics. Overrides
    /// any easing/duration configured for the stage.
    pub fn spring(mut self, config: SpringConfig) -> Self {
        self.current.spring = Some(config);
        self
    }

    /// Close the current stage and start the next one.
    pub fn and_then(mut self) -> Self {
        let stage = std::mem::take(&mut self.current);
        self.done.push(stage);
        self
    }

    /// Resolve every stage into a keyframe and produce the action.
    ///
    /// A trailing stage with no properties and no delay is dropped; an
    /// empty stage with a delay is kept and acts as a pause.
    pub fn build(mut self) -> Action {
        if !self.current.is_empty() {
            self.done.push(self.current);
        }
        let frames: Vec<StyleKeyframe> = self.done.into_iter().map(Stage::resolve).collect();
        match self.mode {
            Mode::Interrupt => Action::Interrupt(frames),
            Mode::Queue => Action::Queue(frames),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use limber_core::PropertyId;

    fn frames(action: Action) -> Vec<StyleKeyframe> {
        match action {
            Action::Interrupt(frames) | Action::Queue(frames) => frames,
            Action::Tick(_) => unreachable!(),
        }
    }

    fn first_dynamic(frame: &StyleKeyframe) -> Dynamic {
        let mut out = None;
        frame.target[0].for_each_channel(|_, d| {
            if out.is_none() {
                out = Some(*d);
            }
        });
        out.unwrap()
    }

    #[test]
    fn defaults_apply_when_no_options_given() {
        let frames = frames(animate().props([StyleProperty::Left(to(10.0))]).build());
        assert_eq!(frames.len(), 1);
        let dynamic = first_dynamic(&frames[0]);
        let tween = dynamic.tween.expect("duration mode by default");
        assert_eq!(tween.duration_ms, DEFAULT_DURATION_MS);
        assert_eq!(tween.ease, Easing::SineInOut);
    }

    #[test]
    fn last_write_wins_per_field() {
        let frames = frames(
            animate()
                .props([StyleProperty::Left(to(10.0))])
                .duration(200.0)
                .duration(800.0)
                .build(),
        );
        let tween = first_dynamic(&frames[0]).tween.unwrap();
        assert_eq!(tween.duration_ms, 800.0);
    }

    #[test]
    fn spring_overrides_easing_and_duration() {
        let frames = frames(
            animate()
                .props([StyleProperty::Left(to(10.0))])
                .duration(500.0)
                .easing(Easing::CubicOut)
                .spring(SpringConfig::wobbly())
                .build(),
        );
        let dynamic = first_dynamic(&frames[0]);
        assert!(dynamic.tween.is_none());
        assert_eq!(dynamic.spring.config(), SpringConfig::wobbly());
    }

    #[test]
    fn and_then_splits_stages() {
        let frames = frames(
            queue()
                .props([StyleProperty::Left(to(10.0))])
                .and_then()
                .props([StyleProperty::Left(to(0.0))])
                .build(),
        );
        assert_eq!(frames.len(), 2);
    }

    #[test]
    fn trailing_empty_stage_is_dropped_but_pause_is_kept() {
        let frames = frames(
            animate()
                .props([StyleProperty::Left(to(10.0))])
                .and_then()
                .build(),
        );
        assert_eq!(frames.len(), 1);

        let frames = frames_with_pause();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[1].delay_ms, 250.0);
        assert!(frames[1].target.is_empty());
    }

    fn frames_with_pause() -> Vec<StyleKeyframe> {
        frames(
            animate()
                .props([StyleProperty::Left(to(10.0))])
                .and_then()
                .delay(250.0)
                .build(),
        )
    }

    #[test]
    fn config_distributes_to_every_property() {
        let frames = frames(
            animate()
                .props([
                    StyleProperty::Left(to(10.0)),
                    StyleProperty::Opacity(to(0.0)),
                ])
                .duration(120.0)
                .build(),
        );
        for prop in &frames[0].target {
            prop.for_each_channel(|_, d| {
                assert_eq!(d.tween.unwrap().duration_ms, 120.0);
            });
        }
        assert_eq!(frames[0].target[1].id(), PropertyId::Opacity);
    }
}
