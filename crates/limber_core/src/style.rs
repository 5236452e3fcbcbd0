//! Resolved style snapshots
//!
//! A `Style` is the last fully-known-good rendering state for one animated
//! subject: an ordered set of resolved properties with at most one entry per
//! identity. Transform-kind entries are the exception: multiple transform
//! components combine into a single output value, so duplicates are kept.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::property::{PropertyId, StyleProperty};

/// Ordered set of resolved style properties, keyed by property identity.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Style {
    props: Vec<StyleProperty<f32>>,
}

impl Style {
    /// Empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot from a property list, deduplicating by identity.
    ///
    /// The first occurrence of a non-transform identity wins; later
    /// duplicates are dropped. Transform entries are all retained, in order,
    /// because their components compose in the rendered output.
    pub fn from_properties(props: impl IntoIterator<Item = StyleProperty<f32>>) -> Self {
        let mut seen = FxHashSet::default();
        let mut out = Vec::new();
        for prop in props {
            let id = prop.id();
            if id.is_transform() || seen.insert(id) {
                out.push(prop);
            }
        }
        Self { props: out }
    }

    /// Look up the first entry with the given identity.
    pub fn get(&self, id: PropertyId) -> Option<&StyleProperty<f32>> {
        self.props.iter().find(|p| p.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StyleProperty<f32>> {
        self.props.iter()
    }

    pub fn len(&self) -> usize {
        self.props.len()
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    /// Render into ordered `(name, value)` pairs.
    ///
    /// Non-transform properties emit one pair each, in snapshot order. All
    /// transform components are collected into a single `"transform"` pair
    /// appended after the rest, preserving their relative order.
    pub fn render(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.props.len());
        let mut transforms: SmallVec<[String; 4]> = SmallVec::new();
        for prop in &self.props {
            let id = prop.id();
            if id.is_transform() {
                transforms.push(format!("{}({})", id.name(), prop.render_value()));
            } else {
                pairs.push((id.name().to_string(), prop.render_value()));
            }
        }
        if !transforms.is_empty() {
            pairs.push(("transform".to_string(), transforms.join(" ")));
        }
        pairs
    }
}

impl FromIterator<StyleProperty<f32>> for Style {
    fn from_iter<I: IntoIterator<Item = StyleProperty<f32>>>(iter: I) -> Self {
        Self::from_properties(iter)
    }
}

impl<'a> IntoIterator for &'a Style {
    type Item = &'a StyleProperty<f32>;
    type IntoIter = std::slice::Iter<'a, StyleProperty<f32>>;

    fn into_iter(self) -> Self::IntoIter {
        self.props.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedup_keeps_first_non_transform_entry() {
        let style = Style::from_properties([
            StyleProperty::Left(5.0),
            StyleProperty::Left(9.0),
            StyleProperty::Opacity(0.3),
        ]);
        assert_eq!(style.len(), 2);
        assert_eq!(style.get(PropertyId::Left), Some(&StyleProperty::Left(5.0)));
    }

    #[test]
    fn dedup_retains_duplicate_transform_entries() {
        let style = Style::from_properties([
            StyleProperty::TranslateX(5.0),
            StyleProperty::TranslateX(8.0),
        ]);
        assert_eq!(style.len(), 2);
        let rendered = style.render();
        assert_eq!(
            rendered,
            vec![(
                "transform".to_string(),
                "translateX(5px) translateX(8px)".to_string()
            )]
        );
    }

    #[test]
    fn render_merges_transforms_after_other_pairs() {
        let style = Style::from_properties([
            StyleProperty::TranslateX(5.0),
            StyleProperty::Opacity(0.5),
            StyleProperty::Rotate(10.0),
        ]);
        assert_eq!(
            style.render(),
            vec![
                ("opacity".to_string(), "0.5".to_string()),
                (
                    "transform".to_string(),
                    "translateX(5px) rotate(10deg)".to_string()
                ),
            ]
        );
    }

    #[test]
    fn render_empty_style_is_empty() {
        assert!(Style::new().render().is_empty());
    }
}
