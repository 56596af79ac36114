// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

//! Combined _track_ capabilities for the torus grid models.
//!
//! Two kinds of event are tracked:
//!
//!   - messages, each tagged with a [`log::Level`] and filtered per entity;
//!   - structural events: an entity being created or destroyed, and one
//!     entity being connected to another.
//!
//! There is no process-wide logger. A [`Tracker`] is built once (see
//! [`builder`]) and handed to the top-level [`Entity`](entity::Entity). Every
//! other entity inherits it from its parent, so each component of a model
//! logs under its own hierarchical name.

#![warn(missing_docs)]

pub use log;

pub mod builder;
pub mod entity;
pub mod test_helpers;
pub mod tracker;

pub use tracker::{Track, Tracker};

/// Destination of text trackers.
pub type Writer = Box<dyn std::io::Write>;

/// Unique identifier given to each entity or tracked object.
///
/// There are two reserved values: [NO_ID] and [ROOT].
#[derive(Copy, Clone, Default, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Id(pub u64);

impl std::fmt::Display for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Debug for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Id value which indicates where there is no valid id
pub const NO_ID: Id = Id(0);

/// The root id from which all other ids are derived
pub const ROOT: Id = Id(1);

/// Emit the creation event for an entity (reported by its parent).
#[macro_export]
macro_rules! create {
    ($entity:expr) => {{
        let entity = &$entity;
        if entity.is_enabled($crate::log::Level::Trace) {
            entity
                .tracker
                .create(entity.parent_id(), entity.id, &entity.full_name());
        }
    }};
}

/// Emit the destruction event for an entity (reported by its parent).
#[macro_export]
macro_rules! destroy {
    ($entity:expr) => {{
        let entity = &$entity;
        if entity.is_enabled($crate::log::Level::Trace) {
            entity.tracker.destroy(entity.parent_id(), entity.id);
        }
    }};
}

/// Record that `from` sends to `to`: `connect!(from ; to)`.
#[macro_export]
macro_rules! connect {
    ($from:expr ; $to:expr) => {{
        let from = &$from;
        if from.is_enabled($crate::log::Level::Trace) {
            from.tracker.connect(from.id, $to.id);
        }
    }};
}

/// Log against an entity at an explicit level: `log_base!(entity ; level, "fmt", args)`.
///
/// Formatting is skipped when the entity is not enabled at `level`.
#[macro_export]
macro_rules! log_base {
    ($entity:expr ; $level:expr, $($fmt:tt)+) => {{
        let entity = &$entity;
        let level = $level;
        if entity.is_enabled(level) {
            entity.tracker.log(entity.id, level, format_args!($($fmt)+));
        }
    }};
}

/// `trace!(entity ; "fmt", args)`
#[macro_export]
macro_rules! trace {
    ($entity:expr ; $($fmt:tt)+) => {
        $crate::log_base!($entity ; $crate::log::Level::Trace, $($fmt)+)
    };
}

/// `debug!(entity ; "fmt", args)`
#[macro_export]
macro_rules! debug {
    ($entity:expr ; $($fmt:tt)+) => {
        $crate::log_base!($entity ; $crate::log::Level::Debug, $($fmt)+)
    };
}

/// `info!(entity ; "fmt", args)`
#[macro_export]
macro_rules! info {
    ($entity:expr ; $($fmt:tt)+) => {
        $crate::log_base!($entity ; $crate::log::Level::Info, $($fmt)+)
    };
}

/// `warn!(entity ; "fmt", args)`
#[macro_export]
macro_rules! warn {
    ($entity:expr ; $($fmt:tt)+) => {
        $crate::log_base!($entity ; $crate::log::Level::Warn, $($fmt)+)
    };
}

/// `error!(entity ; "fmt", args)`
#[macro_export]
macro_rules! error {
    ($entity:expr ; $($fmt:tt)+) => {
        $crate::log_base!($entity ; $crate::log::Level::Error, $($fmt)+)
    };
}
