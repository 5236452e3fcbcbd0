//! Baking: resolving an in-flight keyframe into a merged snapshot
//!
//! Baking reconciles the head keyframe's independently-evolving properties
//! with the previous snapshot: touched identities are recomputed in place,
//! untouched ones carry forward, and identities the snapshot has never seen
//! are appended starting from their neutral baselines.

use rustc_hash::{FxHashMap, FxHashSet};

use limber_core::{PropertyId, Style, StyleProperty};

use crate::keyframe::{Dynamic, StyleKeyframe};

/// Compute the full merged snapshot for a stage at `elapsed_in_stage_ms`
/// (time past the stage's delay).
///
/// The result carries exactly one entry per identity seen across both
/// inputs, in previous-snapshot order with new identities appended in frame
/// order.
pub fn bake(frame: &StyleKeyframe, elapsed_in_stage_ms: f32, previous: &Style) -> Style {
    let elapsed = elapsed_in_stage_ms.max(0.0);

    // First frame entry per identity wins.
    let mut touched: FxHashMap<PropertyId, &StyleProperty<Dynamic>> = FxHashMap::default();
    for prop in &frame.target {
        touched.entry(prop.id()).or_insert(prop);
    }

    let mut out = Vec::with_capacity(previous.len() + frame.target.len());
    let mut consumed: FxHashSet<PropertyId> = FxHashSet::default();

    // Recompute touched identities in place, carry the rest forward. A
    // transform identity duplicated by seeding is retargeted only at its
    // first occurrence.
    for prev in previous {
        let id = prev.id();
        match touched.get(&id) {
            Some(&dynamic) if !consumed.contains(&id) => {
                consumed.insert(id);
                out.push(resolve(dynamic, Some(prev), elapsed));
            }
            _ => out.push(*prev),
        }
    }

    // Identities the snapshot has never tracked start from their baselines.
    let mut appended: FxHashSet<PropertyId> = FxHashSet::default();
    for prop in &frame.target {
        let id = prop.id();
        if consumed.contains(&id) || !appended.insert(id) {
            continue;
        }
        out.push(resolve(prop, None, elapsed));
    }

    Style::from_properties(out)
}

/// Resolve one dynamic property into static channel values.
fn resolve(
    dynamic: &StyleProperty<Dynamic>,
    from: Option<&StyleProperty<f32>>,
    elapsed_ms: f32,
) -> StyleProperty<f32> {
    let id = dynamic.id();
    dynamic.map_indexed(|i, d| {
        let from_v = from
            .map(|p| p.channel_or_baseline(i))
            .unwrap_or_else(|| id.baseline(i));
        d.target.resolve(from_v, d.progress(elapsed_ms))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::{Easing, Tween};
    use crate::keyframe::Target;
    use crate::spring::{Spring, SpringConfig};

    fn linear(target: Target, duration_ms: f32) -> Dynamic {
        Dynamic::new(
            target,
            Spring::new(SpringConfig::default()),
            Some(Tween::new(duration_ms, Easing::Linear)),
        )
    }

    #[test]
    fn untouched_properties_carry_forward() {
        let previous =
            Style::from_properties([StyleProperty::Left(10.0), StyleProperty::Opacity(0.8)]);
        let frame = StyleKeyframe::new(
            0.0,
            [StyleProperty::Left(linear(Target::To(20.0), 100.0))],
        );
        let baked = bake(&frame, 50.0, &previous);
        assert_eq!(baked.get(PropertyId::Left), Some(&StyleProperty::Left(15.0)));
        assert_eq!(
            baked.get(PropertyId::Opacity),
            Some(&StyleProperty::Opacity(0.8))
        );
    }

    #[test]
    fn unseen_identities_start_from_baseline() {
        let frame = StyleKeyframe::new(
            0.0,
            [
                StyleProperty::Opacity(linear(Target::Sub(0.5), 100.0)),
                StyleProperty::Top(linear(Target::Add(10.0), 100.0)),
            ],
        );
        let baked = bake(&frame, 100.0, &Style::new());
        // Opacity rests at 1.0, offsets at 0.0
        assert_eq!(
            baked.get(PropertyId::Opacity),
            Some(&StyleProperty::Opacity(0.5))
        );
        assert_eq!(baked.get(PropertyId::Top), Some(&StyleProperty::Top(10.0)));
    }

    #[test]
    fn merge_preserves_previous_order_then_appends() {
        let previous =
            Style::from_properties([StyleProperty::Left(1.0), StyleProperty::Width(2.0)]);
        let frame = StyleKeyframe::new(
            0.0,
            [
                StyleProperty::Opacity(linear(Target::To(0.0), 100.0)),
                StyleProperty::Width(linear(Target::To(4.0), 100.0)),
            ],
        );
        let baked = bake(&frame, 100.0, &previous);
        let ids: Vec<_> = baked.iter().map(|p| p.id()).collect();
        assert_eq!(
            ids,
            vec![PropertyId::Left, PropertyId::Width, PropertyId::Opacity]
        );
        assert_eq!(baked.get(PropertyId::Width), Some(&StyleProperty::Width(4.0)));
    }

    #[test]
    fn duplicate_transform_identity_retargets_first_occurrence() {
        let previous = Style::from_properties([
            StyleProperty::TranslateX(5.0),
            StyleProperty::TranslateX(8.0),
        ]);
        let frame = StyleKeyframe::new(
            0.0,
            [StyleProperty::TranslateX(linear(Target::To(10.0), 100.0))],
        );
        let baked = bake(&frame, 100.0, &previous);
        let values: Vec<_> = baked.iter().collect();
        assert_eq!(values[0], &StyleProperty::TranslateX(10.0));
        assert_eq!(values[1], &StyleProperty::TranslateX(8.0));
    }

    #[test]
    fn color_channels_resolve_together() {
        let previous =
            Style::from_properties([StyleProperty::Color(0.0, 0.0, 0.0, 1.0)]);
        let frame = StyleKeyframe::new(
            0.0,
            [StyleProperty::Color(
                linear(Target::To(255.0), 100.0),
                linear(Target::To(128.0), 100.0),
                linear(Target::Stay, 100.0),
                linear(Target::Stay, 100.0),
            )],
        );
        let baked = bake(&frame, 50.0, &previous);
        assert_eq!(
            baked.get(PropertyId::Color),
            Some(&StyleProperty::Color(127.5, 64.0, 0.0, 1.0))
        );
    }
}
