// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

use std::cell::Cell;
use std::fmt;

use crate::tracker::{Track, Tracker};
use crate::{Id, ROOT};

/// Forwards every event to each of a set of [`Tracker`]s that has the
/// entity enabled at the level of the event.
///
/// Ids are allocated here so that all the trackers agree on them.
pub struct MultiTracker {
    next_id: Cell<u64>,
    trackers: Vec<Tracker>,
}

impl MultiTracker {
    /// Forward events to `tracker` as well.
    pub fn add_tracker(&mut self, tracker: Tracker) {
        self.trackers.push(tracker);
    }

    fn enabled_for(&self, id: Id, level: log::Level) -> impl Iterator<Item = &Tracker> {
        self.trackers
            .iter()
            .filter(move |tracker| tracker.is_entity_enabled(id, level))
    }
}

impl Default for MultiTracker {
    fn default() -> Self {
        Self {
            next_id: Cell::new(ROOT.0 + 1),
            trackers: Vec::new(),
        }
    }
}

impl Track for MultiTracker {
    fn unique_id(&self) -> Id {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        Id(id)
    }

    fn is_entity_enabled(&self, id: Id, level: log::Level) -> bool {
        self.enabled_for(id, level).next().is_some()
    }

    fn add_entity(&self, id: Id, entity_name: &str) {
        self.trackers
            .iter()
            .for_each(|tracker| tracker.add_entity(id, entity_name));
    }

    fn create(&self, created_by: Id, id: Id, name: &str) {
        self.enabled_for(id, log::Level::Trace)
            .for_each(|tracker| tracker.create(created_by, id, name));
    }

    fn destroy(&self, destroyed_by: Id, id: Id) {
        self.enabled_for(id, log::Level::Trace)
            .for_each(|tracker| tracker.destroy(destroyed_by, id));
    }

    fn connect(&self, from: Id, to: Id) {
        self.enabled_for(from, log::Level::Trace)
            .for_each(|tracker| tracker.connect(from, to));
    }

    fn log(&self, id: Id, level: log::Level, msg: fmt::Arguments) {
        self.enabled_for(id, level)
            .for_each(|tracker| tracker.log(id, level, msg));
    }

    fn shutdown(&self) {
        self.trackers.iter().for_each(|tracker| tracker.shutdown());
    }
}
