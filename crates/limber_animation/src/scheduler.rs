//! Multi-subject dispatch
//!
//! Each animated subject owns an independent [`Model`]; the scheduler is
//! the fan-out/fan-in layer that applies actions across a collection and
//! folds every subject's follow-up tick request into one. It performs no
//! timing of its own - the owner delivers ticks.

use slotmap::{new_key_type, SlotMap};

use crate::model::{Action, Model, TickRequest};

new_key_type! {
    /// Handle for one animated subject.
    pub struct SubjectId;
}

/// Registry of independently animated subjects.
#[derive(Default)]
pub struct Scheduler {
    subjects: SlotMap<SubjectId, Model>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, model: Model) -> SubjectId {
        self.subjects.insert(model)
    }

    pub fn remove(&mut self, id: SubjectId) -> Option<Model> {
        self.subjects.remove(id)
    }

    pub fn get(&self, id: SubjectId) -> Option<&Model> {
        self.subjects.get(id)
    }

    pub fn get_mut(&mut self, id: SubjectId) -> Option<&mut Model> {
        self.subjects.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    /// Apply an action to one subject. Unknown ids answer `Done`.
    pub fn send(&mut self, id: SubjectId, action: Action) -> TickRequest {
        match self.subjects.get_mut(id) {
            Some(model) => model.update(action),
            None => TickRequest::Done,
        }
    }

    /// Apply the same action to every subject, folding the follow-up
    /// requests into one.
    pub fn broadcast(&mut self, action: &Action) -> TickRequest {
        let mut any = false;
        for (_, model) in self.subjects.iter_mut() {
            if model.update(action.clone()).is_requested() {
                any = true;
            }
        }
        if any {
            TickRequest::Again
        } else {
            TickRequest::Done
        }
    }

    /// Advance every subject by the same delta.
    pub fn tick_all(&mut self, dt_ms: f32) -> TickRequest {
        self.broadcast(&Action::Tick(dt_ms))
    }

    /// Whether any subject still has stages in flight.
    pub fn is_animating(&self) -> bool {
        self.subjects.iter().any(|(_, model)| !model.is_idle())
    }

    pub fn iter(&self) -> impl Iterator<Item = (SubjectId, &Model)> {
        self.subjects.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{animate, to};
    use limber_core::StyleProperty;

    #[test]
    fn broadcast_fans_out_and_folds_requests() {
        let mut scheduler = Scheduler::new();
        let a = scheduler.insert(Model::with_style([StyleProperty::Left(0.0)]));
        let b = scheduler.insert(Model::with_style([StyleProperty::Left(50.0)]));

        let action = animate()
            .props([StyleProperty::Left(to(100.0))])
            .duration(100.0)
            .build();
        assert_eq!(scheduler.broadcast(&action), TickRequest::Again);
        assert!(scheduler.is_animating());

        // Run every subject to completion
        let mut guard = 0;
        while scheduler.tick_all(16.0).is_requested() {
            guard += 1;
            assert!(guard < 100);
        }
        assert!(!scheduler.is_animating());
        for id in [a, b] {
            let rendered = scheduler.get(id).unwrap().render();
            assert_eq!(rendered, vec![("left".to_string(), "100px".to_string())]);
        }
    }

    #[test]
    fn send_targets_a_single_subject() {
        let mut scheduler = Scheduler::new();
        let a = scheduler.insert(Model::with_style([StyleProperty::Left(0.0)]));
        let b = scheduler.insert(Model::with_style([StyleProperty::Left(0.0)]));

        let action = animate()
            .props([StyleProperty::Left(to(10.0))])
            .duration(50.0)
            .build();
        assert_eq!(scheduler.send(a, action), TickRequest::Again);
        assert!(scheduler.get(b).unwrap().is_idle());
        assert!(!scheduler.get(a).unwrap().is_idle());

        while scheduler.tick_all(16.0).is_requested() {}
        assert_eq!(
            scheduler.get(a).unwrap().render(),
            vec![("left".to_string(), "10px".to_string())]
        );
        assert_eq!(
            scheduler.get(b).unwrap().render(),
            vec![("left".to_string(), "0px".to_string())]
        );
    }

    #[test]
    fn removed_subject_answers_done() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.insert(Model::new());
        scheduler.remove(id);
        assert_eq!(scheduler.send(id, Action::Tick(16.0)), TickRequest::Done);
    }
}
