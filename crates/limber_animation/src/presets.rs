//! Preset animation sequences
//!
//! Canned entry/exit and feedback animations built on the sequence
//! builder. Each returns the builder itself so callers can keep chaining
//! (add a delay, queue further stages) before building.

use limber_core::StyleProperty;

use crate::builder::{add, animate, queue, sub, to, Sequence};
use crate::easing::Easing;
use crate::spring::SpringConfig;

/// Fade to fully opaque.
pub fn fade_in(duration_ms: f32) -> Sequence {
    animate()
        .props([StyleProperty::Opacity(to(1.0))])
        .duration(duration_ms)
        .easing(Easing::SineOut)
}

/// Fade to fully transparent.
pub fn fade_out(duration_ms: f32) -> Sequence {
    animate()
        .props([StyleProperty::Opacity(to(0.0))])
        .duration(duration_ms)
        .easing(Easing::SineIn)
}

/// Place the subject `distance` to the left, transparent, then slide it
/// into position while fading in.
pub fn slide_in_left(duration_ms: f32, distance: f32) -> Sequence {
    slide_in(duration_ms, -distance)
}

/// Place the subject `distance` to the right, transparent, then slide it
/// into position while fading in.
pub fn slide_in_right(duration_ms: f32, distance: f32) -> Sequence {
    slide_in(duration_ms, distance)
}

fn slide_in(duration_ms: f32, offset: f32) -> Sequence {
    animate()
        .props([
            StyleProperty::TranslateX(to(offset)),
            StyleProperty::Opacity(to(0.0)),
        ])
        .duration(0.0)
        .and_then()
        .props([
            StyleProperty::TranslateX(to(0.0)),
            StyleProperty::Opacity(to(1.0)),
        ])
        .duration(duration_ms)
        .easing(Easing::SineOut)
}

/// Scale up from nothing with a springy overshoot.
pub fn pop_in() -> Sequence {
    animate()
        .props([
            StyleProperty::Scale(to(0.0)),
            StyleProperty::Opacity(to(0.0)),
        ])
        .duration(0.0)
        .and_then()
        .props([
            StyleProperty::Scale(to(1.0)),
            StyleProperty::Opacity(to(1.0)),
        ])
        .spring(SpringConfig::wobbly())
}

/// Shift sideways and back, queued behind whatever is running.
pub fn nudge(distance: f32) -> Sequence {
    queue()
        .props([StyleProperty::TranslateX(add(distance))])
        .duration(120.0)
        .easing(Easing::SineOut)
        .and_then()
        .props([StyleProperty::TranslateX(sub(distance))])
        .duration(120.0)
        .easing(Easing::SineIn)
}
