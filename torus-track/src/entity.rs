// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

//! Named components.
//!
//! Every component of a model holds an [`Entity`]. Entities form a tree
//! rooted at the entity returned by [`toplevel`] and are named by their
//! path through that tree, e.g. `top::grid::node_1_2`.

use std::fmt;
use std::rc::Rc;

use crate::{Id, NO_ID, Tracker, create, destroy};

const SEPARATOR: &str = "::";

/// A named node in the component hierarchy.
///
/// Log messages are emitted against the entity's [`Id`] and the [`Tracker`]
/// decides from the entity's full name whether they are kept.
pub struct Entity {
    /// Local name (without the parent's path).
    pub name: String,

    /// `None` only for the top-level entity.
    pub parent: Option<Rc<Entity>>,

    /// Id used in all _log_ and _trace_ events.
    pub id: Id,

    /// Shared with every other entity in the hierarchy.
    pub tracker: Tracker,
}

impl Entity {
    /// Create a child of `parent`.
    #[must_use]
    pub fn new(parent: &Rc<Entity>, name: &str) -> Self {
        let tracker = parent.tracker.clone();
        let id = tracker.unique_id();
        let entity = Self {
            name: name.to_string(),
            parent: Some(parent.clone()),
            id,
            tracker,
        };
        entity.tracker.add_entity(id, &entity.full_name());
        create!(entity);
        entity
    }

    /// Id of the parent, or [`NO_ID`] for the top-level entity.
    #[must_use]
    pub fn parent_id(&self) -> Id {
        self.parent.as_ref().map_or(NO_ID, |parent| parent.id)
    }

    /// Whether events at `level` from this entity are kept by the tracker.
    #[must_use]
    pub fn is_enabled(&self, level: log::Level) -> bool {
        self.tracker.is_entity_enabled(self.id, level)
    }

    /// The path from the top-level entity, e.g. `top::grid::node_1_2`.
    #[must_use]
    pub fn full_name(&self) -> String {
        self.to_string()
    }
}

impl Drop for Entity {
    fn drop(&mut self) {
        destroy!(self);
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.parent {
            Some(parent) => write!(f, "{parent}{SEPARATOR}{}", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({}, {self})", self.id)
    }
}

/// Create the root of a hierarchy. All other entities descend from it.
pub fn toplevel(tracker: &Tracker, name: &str) -> Rc<Entity> {
    let top = Rc::new(Entity {
        name: name.to_string(),
        parent: None,
        id: tracker.unique_id(),
        tracker: tracker.clone(),
    });
    tracker.add_entity(top.id, name);
    create!(top);
    top
}

/// Access to the [`Entity`] of a model component.
pub trait GetEntity {
    /// Returns the entity a component logs through.
    fn entity(&self) -> &Rc<Entity>;
}
