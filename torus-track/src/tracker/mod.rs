// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

//! The [`Track`] interface and the trackers implementing it.

/// Fan events out to several trackers.
pub mod multi_tracker;
/// Write events as lines of text.
pub mod text;

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

pub use multi_tracker::MultiTracker;
use regex::Regex;
pub use text::TextTracker;

use crate::{Id, ROOT};

/// Returned when a tracker cannot be built from the configuration given.
#[derive(Debug)]
pub struct TrackConfigError(pub String);

impl fmt::Display for TrackConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Tracker configuration error: {}", self.0)
    }
}

impl std::error::Error for TrackConfigError {}

/// Receiver of _log_ and _trace_ events.
pub trait Track {
    /// Hand out an [`Id`] not used by any other entity or object.
    fn unique_id(&self) -> Id;

    /// Whether events at `level` from entity `id` should be recorded.
    fn is_entity_enabled(&self, id: Id, level: log::Level) -> bool;

    /// Register the full hierarchical name of a new entity so that its level
    /// can be decided.
    fn add_entity(&self, id: Id, entity_name: &str);

    /// Entity `created_by` created the entity `id`.
    fn create(&self, created_by: Id, id: Id, name: &str);

    /// Entity `destroyed_by` dropped the entity `id`.
    fn destroy(&self, destroyed_by: Id, id: Id);

    /// Entity `from` has been connected to entity `to`.
    fn connect(&self, from: Id, to: Id);

    /// A formatted message from entity `id`.
    fn log(&self, id: Id, level: log::Level, msg: fmt::Arguments);

    /// Flush any buffered output.
    fn shutdown(&self);
}

/// Trackers are shared by every entity of a model.
pub type Tracker = Rc<dyn Track>;

/// Decides the level of every entity from its name and hands out ids.
///
/// Entities whose name matches one of the filters use that filter's level
/// (the first matching filter is used). All other entities use the default
/// level.
pub struct EntityManager {
    default_level: log::Level,
    filters: Vec<(Regex, log::Level)>,
    next_id: Cell<u64>,

    /// Only entities whose level differs from the default are stored.
    overrides: RefCell<HashMap<Id, log::Level>>,
}

impl EntityManager {
    /// Create a manager where every entity is tracked at `default_level`
    /// until filters are added.
    #[must_use]
    pub fn new(default_level: log::Level) -> Self {
        Self {
            default_level,
            filters: Vec::new(),
            next_id: Cell::new(ROOT.0 + 1),
            overrides: RefCell::new(HashMap::new()),
        }
    }

    /// Entities matching `regex` will be tracked at `level`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use torus_track::tracker::EntityManager;
    /// use torus_track::log::Level;
    ///
    /// let mut manager = EntityManager::new(Level::Warn);
    /// manager.add_entity_level_filter(".*router.*", Level::Trace).unwrap();
    /// assert!(manager.add_entity_level_filter("node_(", Level::Trace).is_err());
    /// ```
    pub fn add_entity_level_filter(
        &mut self,
        regex: &str,
        level: log::Level,
    ) -> Result<(), TrackConfigError> {
        let compiled = Regex::new(regex)
            .map_err(|e| TrackConfigError(format!("invalid filter '{regex}': {e}")))?;
        self.filters.push((compiled, level));
        Ok(())
    }

    fn unique_id(&self) -> Id {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        Id(id)
    }

    fn level_for_name(&self, entity_name: &str) -> log::Level {
        self.filters
            .iter()
            .find(|(regex, _)| regex.is_match(entity_name))
            .map_or(self.default_level, |(_, level)| *level)
    }

    fn add_entity(&self, id: Id, entity_name: &str) {
        let level = self.level_for_name(entity_name);
        if level == self.default_level {
            return;
        }
        let previous = self.overrides.borrow_mut().insert(id, level);
        assert!(
            previous.is_none(),
            "entity id {id} registered twice ({entity_name})"
        );
    }

    fn is_enabled(&self, id: Id, level: log::Level) -> bool {
        let entity_level = self
            .overrides
            .borrow()
            .get(&id)
            .copied()
            .unwrap_or(self.default_level);
        level <= entity_level
    }
}
