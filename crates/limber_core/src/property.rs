//! Animatable style properties
//!
//! The property model is a closed tagged union over every property kind the
//! engine can drive, generic over the per-channel value type `V`. A resolved
//! snapshot uses `StyleProperty<f32>`; the animation crate instantiates the
//! same shape with its in-flight dynamic descriptor.
//!
//! Color kinds carry four channels (r, g, b, a) under a single identity;
//! channels are not independently addressable.

/// A single animatable style property, generic over the channel value type.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StyleProperty<V> {
    Left(V),
    Top(V),
    Right(V),
    Bottom(V),
    Width(V),
    Height(V),
    Padding(V),
    Margin(V),
    Opacity(V),
    Color(V, V, V, V),
    BackgroundColor(V, V, V, V),
    BorderColor(V, V, V, V),
    TranslateX(V),
    TranslateY(V),
    Rotate(V),
    Scale(V),
    ScaleX(V),
    ScaleY(V),
}

/// Property identity, derived from the tag alone.
///
/// Multi-channel kinds (colors) have a single identity covering all their
/// channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PropertyId {
    Left,
    Top,
    Right,
    Bottom,
    Width,
    Height,
    Padding,
    Margin,
    Opacity,
    Color,
    BackgroundColor,
    BorderColor,
    TranslateX,
    TranslateY,
    Rotate,
    Scale,
    ScaleX,
    ScaleY,
}

impl PropertyId {
    /// Rendered name: the CSS property name, or the transform function name
    /// for transform kinds.
    pub fn name(self) -> &'static str {
        match self {
            PropertyId::Left => "left",
            PropertyId::Top => "top",
            PropertyId::Right => "right",
            PropertyId::Bottom => "bottom",
            PropertyId::Width => "width",
            PropertyId::Height => "height",
            PropertyId::Padding => "padding",
            PropertyId::Margin => "margin",
            PropertyId::Opacity => "opacity",
            PropertyId::Color => "color",
            PropertyId::BackgroundColor => "background-color",
            PropertyId::BorderColor => "border-color",
            PropertyId::TranslateX => "translateX",
            PropertyId::TranslateY => "translateY",
            PropertyId::Rotate => "rotate",
            PropertyId::Scale => "scale",
            PropertyId::ScaleX => "scaleX",
            PropertyId::ScaleY => "scaleY",
        }
    }

    /// Transform kinds combine into a single `transform` output entry.
    pub fn is_transform(self) -> bool {
        matches!(
            self,
            PropertyId::TranslateX
                | PropertyId::TranslateY
                | PropertyId::Rotate
                | PropertyId::Scale
                | PropertyId::ScaleX
                | PropertyId::ScaleY
        )
    }

    /// Number of value channels this kind carries.
    pub fn channel_count(self) -> usize {
        match self {
            PropertyId::Color | PropertyId::BackgroundColor | PropertyId::BorderColor => 4,
            _ => 1,
        }
    }

    /// Neutral baseline for a channel, used as the starting value when a
    /// property is animated with no prior entry in the snapshot.
    pub fn baseline(self, channel: usize) -> f32 {
        match self {
            PropertyId::Opacity | PropertyId::Scale | PropertyId::ScaleX | PropertyId::ScaleY => {
                1.0
            }
            PropertyId::Color | PropertyId::BackgroundColor | PropertyId::BorderColor => {
                // Alpha channel rests at fully opaque
                if channel == 3 {
                    1.0
                } else {
                    0.0
                }
            }
            _ => 0.0,
        }
    }
}

impl<V> StyleProperty<V> {
    /// Identity of this property.
    pub fn id(&self) -> PropertyId {
        match self {
            StyleProperty::Left(_) => PropertyId::Left,
            StyleProperty::Top(_) => PropertyId::Top,
            StyleProperty::Right(_) => PropertyId::Right,
            StyleProperty::Bottom(_) => PropertyId::Bottom,
            StyleProperty::Width(_) => PropertyId::Width,
            StyleProperty::Height(_) => PropertyId::Height,
            StyleProperty::Padding(_) => PropertyId::Padding,
            StyleProperty::Margin(_) => PropertyId::Margin,
            StyleProperty::Opacity(_) => PropertyId::Opacity,
            StyleProperty::Color(..) => PropertyId::Color,
            StyleProperty::BackgroundColor(..) => PropertyId::BackgroundColor,
            StyleProperty::BorderColor(..) => PropertyId::BorderColor,
            StyleProperty::TranslateX(_) => PropertyId::TranslateX,
            StyleProperty::TranslateY(_) => PropertyId::TranslateY,
            StyleProperty::Rotate(_) => PropertyId::Rotate,
            StyleProperty::Scale(_) => PropertyId::Scale,
            StyleProperty::ScaleX(_) => PropertyId::ScaleX,
            StyleProperty::ScaleY(_) => PropertyId::ScaleY,
        }
    }

    /// Map every channel into a new value type, preserving the tag.
    ///
    /// Channels are visited in declaration order (r, g, b, a for colors).
    pub fn map_indexed<U>(self, mut f: impl FnMut(usize, V) -> U) -> StyleProperty<U> {
        match self {
            StyleProperty::Left(v) => StyleProperty::Left(f(0, v)),
            StyleProperty::Top(v) => StyleProperty::Top(f(0, v)),
            StyleProperty::Right(v) => StyleProperty::Right(f(0, v)),
            StyleProperty::Bottom(v) => StyleProperty::Bottom(f(0, v)),
            StyleProperty::Width(v) => StyleProperty::Width(f(0, v)),
            StyleProperty::Height(v) => StyleProperty::Height(f(0, v)),
            StyleProperty::Padding(v) => StyleProperty::Padding(f(0, v)),
            StyleProperty::Margin(v) => StyleProperty::Margin(f(0, v)),
            StyleProperty::Opacity(v) => StyleProperty::Opacity(f(0, v)),
            StyleProperty::Color(r, g, b, a) => {
                StyleProperty::Color(f(0, r), f(1, g), f(2, b), f(3, a))
            }
            StyleProperty::BackgroundColor(r, g, b, a) => {
                StyleProperty::BackgroundColor(f(0, r), f(1, g), f(2, b), f(3, a))
            }
            StyleProperty::BorderColor(r, g, b, a) => {
                StyleProperty::BorderColor(f(0, r), f(1, g), f(2, b), f(3, a))
            }
            StyleProperty::TranslateX(v) => StyleProperty::TranslateX(f(0, v)),
            StyleProperty::TranslateY(v) => StyleProperty::TranslateY(f(0, v)),
            StyleProperty::Rotate(v) => StyleProperty::Rotate(f(0, v)),
            StyleProperty::Scale(v) => StyleProperty::Scale(f(0, v)),
            StyleProperty::ScaleX(v) => StyleProperty::ScaleX(f(0, v)),
            StyleProperty::ScaleY(v) => StyleProperty::ScaleY(f(0, v)),
        }
    }

    /// Map every channel, ignoring its index.
    pub fn map<U>(self, mut f: impl FnMut(V) -> U) -> StyleProperty<U> {
        self.map_indexed(|_, v| f(v))
    }

    /// Borrow a channel by index, if it exists for this kind.
    pub fn channel(&self, index: usize) -> Option<&V> {
        match self {
            StyleProperty::Color(r, g, b, a)
            | StyleProperty::BackgroundColor(r, g, b, a)
            | StyleProperty::BorderColor(r, g, b, a) => [r, g, b, a].get(index).copied(),
            StyleProperty::Left(v)
            | StyleProperty::Top(v)
            | StyleProperty::Right(v)
            | StyleProperty::Bottom(v)
            | StyleProperty::Width(v)
            | StyleProperty::Height(v)
            | StyleProperty::Padding(v)
            | StyleProperty::Margin(v)
            | StyleProperty::Opacity(v)
            | StyleProperty::TranslateX(v)
            | StyleProperty::TranslateY(v)
            | StyleProperty::Rotate(v)
            | StyleProperty::Scale(v)
            | StyleProperty::ScaleX(v)
            | StyleProperty::ScaleY(v) => (index == 0).then_some(v),
        }
    }

    /// Visit every channel in order with mutable access.
    pub fn for_each_channel_mut(&mut self, mut f: impl FnMut(usize, &mut V)) {
        match self {
            StyleProperty::Color(r, g, b, a)
            | StyleProperty::BackgroundColor(r, g, b, a)
            | StyleProperty::BorderColor(r, g, b, a) => {
                for (i, v) in [r, g, b, a].into_iter().enumerate() {
                    f(i, v);
                }
            }
            StyleProperty::Left(v)
            | StyleProperty::Top(v)
            | StyleProperty::Right(v)
            | StyleProperty::Bottom(v)
            | StyleProperty::Width(v)
            | StyleProperty::Height(v)
            | StyleProperty::Padding(v)
            | StyleProperty::Margin(v)
            | StyleProperty::Opacity(v)
            | StyleProperty::TranslateX(v)
            | StyleProperty::TranslateY(v)
            | StyleProperty::Rotate(v)
            | StyleProperty::Scale(v)
            | StyleProperty::ScaleX(v)
            | StyleProperty::ScaleY(v) => f(0, v),
        }
    }

    /// Visit every channel in order.
    pub fn for_each_channel(&self, mut f: impl FnMut(usize, &V)) {
        match self {
            StyleProperty::Color(r, g, b, a)
            | StyleProperty::BackgroundColor(r, g, b, a)
            | StyleProperty::BorderColor(r, g, b, a) => {
                for (i, v) in [r, g, b, a].into_iter().enumerate() {
                    f(i, v);
                }
            }
            StyleProperty::Left(v)
            | StyleProperty::Top(v)
            | StyleProperty::Right(v)
            | StyleProperty::Bottom(v)
            | StyleProperty::Width(v)
            | StyleProperty::Height(v)
            | StyleProperty::Padding(v)
            | StyleProperty::Margin(v)
            | StyleProperty::Opacity(v)
            | StyleProperty::TranslateX(v)
            | StyleProperty::TranslateY(v)
            | StyleProperty::Rotate(v)
            | StyleProperty::Scale(v)
            | StyleProperty::ScaleX(v)
            | StyleProperty::ScaleY(v) => f(0, v),
        }
    }
}

impl StyleProperty<f32> {
    /// Channel value with the kind's baseline as fallback for out-of-range
    /// indices (colors matched against single-channel kinds never hit this
    /// in practice; identities agree on channel count).
    pub fn channel_or_baseline(&self, index: usize) -> f32 {
        self.channel(index)
            .copied()
            .unwrap_or_else(|| self.id().baseline(index))
    }

    /// Format this property's value for output.
    ///
    /// Lengths render as `{n}px`, rotation as `{n}deg`, colors as
    /// `rgba(r, g, b, a)` with integer rgb channels, unitless kinds as bare
    /// numbers. Transform kinds render the function argument only; the
    /// enclosing `name(..)` wrapper is applied during style rendering.
    pub fn render_value(&self) -> String {
        match *self {
            StyleProperty::Left(v)
            | StyleProperty::Top(v)
            | StyleProperty::Right(v)
            | StyleProperty::Bottom(v)
            | StyleProperty::Width(v)
            | StyleProperty::Height(v)
            | StyleProperty::Padding(v)
            | StyleProperty::Margin(v)
            | StyleProperty::TranslateX(v)
            | StyleProperty::TranslateY(v) => format!("{}px", fmt_number(v)),
            StyleProperty::Rotate(v) => format!("{}deg", fmt_number(v)),
            StyleProperty::Opacity(v)
            | StyleProperty::Scale(v)
            | StyleProperty::ScaleX(v)
            | StyleProperty::ScaleY(v) => fmt_number(v),
            StyleProperty::Color(r, g, b, a)
            | StyleProperty::BackgroundColor(r, g, b, a)
            | StyleProperty::BorderColor(r, g, b, a) => {
                format!(
                    "rgba({}, {}, {}, {})",
                    channel_u8(r),
                    channel_u8(g),
                    channel_u8(b),
                    fmt_number(a)
                )
            }
        }
    }
}

fn channel_u8(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Render a number without a trailing fractional part when it is whole.
fn fmt_number(v: f32) -> String {
    if (v - v.round()).abs() < 1e-4 {
        format!("{}", v.round() as i64)
    } else {
        let s = format!("{v:.3}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
