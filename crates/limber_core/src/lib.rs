//! Limber Core
//!
//! Foundational types for the limber animation engine:
//!
//! - **Property Model**: the closed set of animatable style properties,
//!   generic over the per-channel value representation
//! - **Style Snapshots**: ordered, identity-deduplicated sets of resolved
//!   properties, rendered into `(name, value)` string pairs

pub mod property;
pub mod style;

pub use property::{PropertyId, StyleProperty};
pub use style::Style;
