//! Animation model and tick-driven state machine
//!
//! A [`Model`] owns one animated subject's in-flight state: the keyframe
//! queue, elapsed time within the current stage, and the last baked
//! snapshot. It is advanced exclusively through [`Action`]s delivered by its
//! owner and never schedules anything itself - every processed action
//! answers with a [`TickRequest`] telling the owner whether to deliver
//! another tick.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use limber_core::{PropertyId, Style, StyleProperty};

use crate::bake::bake;
use crate::keyframe::StyleKeyframe;

/// Input to the state machine.
#[derive(Clone, Debug)]
pub enum Action {
    /// Replace the in-flight queue. The current stage is baked at its
    /// present values first, so retargeted properties continue from where
    /// they are.
    Interrupt(Vec<StyleKeyframe>),
    /// Append stages to the end of the queue; the current stage is
    /// unaffected.
    Queue(Vec<StyleKeyframe>),
    /// Advance time by a non-negative delta, in milliseconds.
    Tick(f32),
}

/// Follow-up effect attached to every processed action.
#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickRequest {
    /// Still animating; the owner should deliver another tick.
    Again,
    /// Idle; no further ticks are needed.
    Done,
}

impl TickRequest {
    pub fn is_requested(self) -> bool {
        matches!(self, TickRequest::Again)
    }
}

fn pending(more: bool) -> TickRequest {
    if more {
        TickRequest::Again
    } else {
        TickRequest::Done
    }
}

/// Per-channel momentum captured at an interruption, in value units per
/// second.
type Momentum = FxHashMap<PropertyId, SmallVec<[f32; 4]>>;

/// Animation state for one subject.
#[derive(Clone, Debug, Default)]
pub struct Model {
    /// Accumulated time across the model's whole life.
    clock_ms: f32,
    /// Time spent in the current stage, including its delay.
    elapsed_ms: f32,
    /// Clock value at which the current stage began; set on the stage's
    /// first tick.
    start_ms: Option<f32>,
    /// Pending stages; the front entry is the only one being integrated.
    frames: VecDeque<StyleKeyframe>,
    /// Last fully-baked snapshot.
    previous: Style,
}

impl Model {
    /// Model with no tracked properties.
    pub fn new() -> Self {
        Self::default()
    }

    /// Model seeded with an initial resolved style, deduplicated by
    /// identity (first occurrence wins; transform duplicates are kept).
    pub fn with_style(seed: impl IntoIterator<Item = StyleProperty<f32>>) -> Self {
        Self {
            previous: Style::from_properties(seed),
            ..Self::default()
        }
    }

    /// Last baked snapshot.
    pub fn style(&self) -> &Style {
        &self.previous
    }

    pub fn is_idle(&self) -> bool {
        self.frames.is_empty()
    }

    /// Stages waiting in the queue, the in-flight one included.
    pub fn pending_stages(&self) -> usize {
        self.frames.len()
    }

    /// Process one action, answering with the follow-up tick request.
    pub fn update(&mut self, action: Action) -> TickRequest {
        match action {
            Action::Interrupt(frames) => self.interrupt(frames),
            Action::Queue(frames) => self.enqueue(frames),
            // Negative deltas are clamped rather than propagated into the
            // integrators.
            Action::Tick(dt_ms) => self.tick(dt_ms.max(0.0)),
        }
    }

    /// Render the subject's present values as ordered `(name, value)`
    /// pairs. Idle models render the baked snapshot directly; a running
    /// model bakes its in-flight stage first. Never mutates the model.
    pub fn render(&self) -> Vec<(String, String)> {
        match self.frames.front() {
            None => self.previous.render(),
            Some(head) => bake(head, self.elapsed_ms - head.delay_ms, &self.previous).render(),
        }
    }

    fn interrupt(&mut self, frames: Vec<StyleKeyframe>) -> TickRequest {
        let mut carried = Momentum::default();
        if let Some(head) = self.frames.front() {
            carried = capture_momentum(head, &self.previous);
            let net = (self.elapsed_ms - head.delay_ms).max(0.0);
            self.previous = bake(head, net, &self.previous);
            tracing::debug!(
                stages_discarded = self.frames.len(),
                "interrupting in-flight animation"
            );
        }
        self.frames = frames.into();
        self.elapsed_ms = 0.0;
        self.start_ms = None;
        if let Some(new_head) = self.frames.front_mut() {
            seed_momentum(new_head, &carried, &self.previous);
        }
        pending(!self.frames.is_empty())
    }

    fn enqueue(&mut self, frames: Vec<StyleKeyframe>) -> TickRequest {
        self.frames.extend(frames);
        pending(!self.frames.is_empty())
    }

    fn tick(&mut self, dt_ms: f32) -> TickRequest {
        self.clock_ms += dt_ms;
        let Some(head) = self.frames.front_mut() else {
            return TickRequest::Done;
        };
        if self.start_ms.is_none() {
            self.start_ms = Some(self.clock_ms - dt_ms);
            tracing::trace!(delay_ms = head.delay_ms, "stage started");
        }
        self.elapsed_ms += dt_ms;

        let net = self.elapsed_ms - head.delay_ms;
        if net < 0.0 {
            // Still waiting out the delay; nothing advances.
            return TickRequest::Again;
        }

        // Only the slice of this tick past the delay drives the
        // integrators.
        let spring_dt = dt_ms.min(net);
        for prop in head.target.iter_mut() {
            prop.for_each_channel_mut(|_, dynamic| {
                if dynamic.tween.is_none() {
                    dynamic.spring.step(spring_dt);
                }
            });
        }

        let mut terminal = true;
        for prop in head.target.iter() {
            prop.for_each_channel(|_, dynamic| {
                if !dynamic.is_terminal(net) {
                    terminal = false;
                }
            });
        }

        if terminal && net >= head.duration_floor() {
            self.previous = bake(head, net, &self.previous);
            self.frames.pop_front();
            self.elapsed_ms = 0.0;
            self.start_ms = None;
            tracing::debug!(stages_remaining = self.frames.len(), "stage complete");
            pending(!self.frames.is_empty())
        } else {
            TickRequest::Again
        }
    }
}

/// Capture value-space spring velocities for every spring-mode channel of
/// the in-flight stage, keyed by property identity.
fn capture_momentum(head: &StyleKeyframe, previous: &Style) -> Momentum {
    let mut carried = Momentum::default();
    for prop in &head.target {
        let id = prop.id();
        if carried.contains_key(&id) {
            continue;
        }
        let from = previous.get(id);
        let mut channels: SmallVec<[f32; 4]> = SmallVec::new();
        let mut moving = false;
        prop.for_each_channel(|i, dynamic| {
            let velocity = if dynamic.tween.is_none() {
                let from_v = from
                    .map(|p| p.channel_or_baseline(i))
                    .unwrap_or_else(|| id.baseline(i));
                dynamic.spring.velocity() * dynamic.target.span(from_v)
            } else {
                0.0
            };
            if velocity != 0.0 {
                moving = true;
            }
            channels.push(velocity);
        });
        if moving {
            carried.insert(id, channels);
        }
    }
    carried
}

/// Re-install carried momentum into the new head stage. Velocity is
/// rescaled into the new target span so the physical rate of change is
/// continuous; normalized displacement restarts at zero because the
/// interrupt bake has already absorbed it into `previous`.
fn seed_momentum(head: &mut StyleKeyframe, carried: &Momentum, previous: &Style) {
    if carried.is_empty() {
        return;
    }
    for prop in head.target.iter_mut() {
        let id = prop.id();
        let Some(channels) = carried.get(&id) else {
            continue;
        };
        let from = previous.get(id);
        tracing::trace!(?id, "carrying spring momentum across interrupt");
        prop.for_each_channel_mut(|i, dynamic| {
            if dynamic.tween.is_some() {
                return;
            }
            let from_v = from
                .map(|p| p.channel_or_baseline(i))
                .unwrap_or_else(|| id.baseline(i));
            let span = dynamic.target.span(from_v);
            if span.abs() > f32::EPSILON {
                let velocity = channels.get(i).copied().unwrap_or(0.0);
                dynamic.spring.set_velocity(velocity / span);
            }
        });
    }
}
