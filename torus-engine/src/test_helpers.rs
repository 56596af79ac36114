// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

//! Helpers shared by tests.

use std::rc::Rc;

use torus_track::entity::{Entity, toplevel};
use torus_track::test_helpers::create_tracker;

/// Create the top-level entity for a test, logging to a file named after
/// the test file (pass `file!()`).
#[must_use]
pub fn start_test(full_filepath: &str) -> Rc<Entity> {
    let tracker = create_tracker(full_filepath);
    toplevel(&tracker, "top")
}
