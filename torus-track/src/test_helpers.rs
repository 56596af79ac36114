// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

//! Trackers for use in tests.
//!
//! [`TestTracker`] keeps every event in memory so that a test can assert on
//! the exact sequence with [`check_and_clear`]. [`create_tracker`] writes all
//! events of a test to a file for inspection after a failure.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::fs;
use std::io::BufWriter;
use std::path::Path;
use std::rc::Rc;

use regex::Regex;

use crate::tracker::{EntityManager, TextTracker};
use crate::{Id, Track, Tracker, Writer};

/// Records every event as a line of text. All entities are enabled at all
/// levels.
pub struct TestTracker {
    events: RefCell<Vec<String>>,
    next_id: Cell<u64>,
}

impl TestTracker {
    /// Ids are handed out starting from `first_id`.
    #[must_use]
    pub fn new(first_id: u64) -> Self {
        Self {
            events: RefCell::new(Vec::new()),
            next_id: Cell::new(first_id),
        }
    }

    fn record(&self, event: fmt::Arguments) {
        let line = event.to_string();
        println!("{line}");
        self.events.borrow_mut().push(line);
    }
}

impl Track for TestTracker {
    fn unique_id(&self) -> Id {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        Id(id)
    }

    fn is_entity_enabled(&self, _id: Id, _level: log::Level) -> bool {
        true
    }

    fn add_entity(&self, _id: Id, _entity_name: &str) {}

    fn create(&self, created_by: Id, id: Id, name: &str) {
        self.record(format_args!("{created_by}: created {id}, {name}"));
    }

    fn destroy(&self, destroyed_by: Id, id: Id) {
        self.record(format_args!("{destroyed_by}: destroyed {id}"));
    }

    fn connect(&self, from: Id, to: Id) {
        self.record(format_args!("{from}: connect to {to}"));
    }

    fn log(&self, id: Id, level: log::Level, msg: fmt::Arguments) {
        self.record(format_args!("{id}:{level}: {msg}"));
    }

    fn shutdown(&self) {}
}

/// Returns a [`TestTracker`] (to inspect) and the same tracker as a
/// [`Tracker`] (to build entities with).
///
/// ```
/// use torus_track::test_helpers;
///
/// let (test_tracker, tracker) = torus_track::test_init!(10);
/// let _top = torus_track::entity::toplevel(&tracker, "top");
/// test_helpers::check_and_clear(&test_tracker, &["0: created 10, top"]);
/// ```
#[macro_export]
macro_rules! test_init {
    ($first_id:expr) => {{
        let test_tracker = std::rc::Rc::new($crate::test_helpers::TestTracker::new($first_id));
        let tracker: $crate::Tracker = test_tracker.clone();
        (test_tracker, tracker)
    }};
}

/// Assert that the events recorded since the last call match `expected`, a
/// list of regular expressions, one per event and in order. The recorded
/// events are then discarded.
pub fn check_and_clear(tracker: &TestTracker, expected: &[&str]) {
    let events = tracker.events.take();
    assert_eq!(
        events.len(),
        expected.len(),
        "expected {expected:?}, got {events:?}"
    );
    for (pattern, event) in expected.iter().zip(&events) {
        let re = Regex::new(pattern).unwrap();
        assert!(re.is_match(event), "'{event}' does not match '{pattern}'");
    }
}

/// A tracker that writes every event of a test to `traces/<test file>.log`.
///
/// Pass `file!()` as `test_file`.
#[must_use]
pub fn create_tracker(test_file: &str) -> Tracker {
    const FOLDER: &str = "traces";
    fs::create_dir_all(FOLDER).unwrap();

    let stem = Path::new(test_file)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap();
    let file = fs::File::create(Path::new(FOLDER).join(format!("{stem}.log"))).unwrap();
    let writer: Writer = Box::new(BufWriter::new(file));

    Rc::new(TextTracker::new(EntityManager::new(log::Level::Trace), writer))
}
