//! Limber Animation Engine
//!
//! Tick-driven animation of CSS-like style properties.
//!
//! # Features
//!
//! - **Spring Physics**: semi-implicit Euler springs with settle detection
//! - **Duration Tweens**: easing-curve interpolation with per-stage delays
//! - **Keyframe Queues**: multi-stage sequences with interrupt semantics
//! - **Continuity**: retargeted properties keep their momentum instead of
//!   jumping
//! - **Cooperative**: the engine never schedules; every processed action
//!   answers with a request for zero or one follow-up ticks
//!
//! # Example
//!
//! ```
//! use limber_animation::builder::{animate, to};
//! use limber_animation::{Action, Model, StyleProperty};
//!
//! let mut model = Model::with_style([StyleProperty::Left(0.0)]);
//! let mut request = model.update(
//!     animate()
//!         .props([StyleProperty::Left(to(100.0))])
//!         .duration(250.0)
//!         .build(),
//! );
//! while request.is_requested() {
//!     request = model.update(Action::Tick(16.0));
//! }
//! assert_eq!(model.render(), vec![("left".into(), "100px".into())]);
//! ```

pub mod bake;
pub mod builder;
pub mod easing;
pub mod keyframe;
pub mod model;
pub mod presets;
pub mod scheduler;
pub mod spring;

pub use bake::bake;
pub use builder::Sequence;
pub use easing::{Easing, Tween, DEFAULT_DURATION_MS};
pub use keyframe::{Dynamic, StyleKeyframe, Target};
pub use model::{Action, Model, TickRequest};
pub use scheduler::{Scheduler, SubjectId};
pub use spring::{Spring, SpringConfig};

pub use limber_core::{PropertyId, Style, StyleProperty};
