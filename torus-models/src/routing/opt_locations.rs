// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

//! Cache-location aware axis selection.
//!
//! For each axis take the offset of the furthest cache that is still no
//! further from the destination than the origin is (0 if there is none).
//! Move horizontally when the vertical axis has the further such cache,
//! otherwise vertically. If the origin already shares a column or row with
//! the destination there is only one axis to move along.

use std::cmp::Ordering;

use crate::grid::Coord;
use crate::routing::{Axis, Route};

#[derive(Default)]
pub struct OptLocations {
    horizontal: Vec<usize>,
    vertical: Vec<usize>,
}

/// Largest offset not beyond `distance`, or 0.
#[must_use]
pub fn best(distance: usize, offsets: &[usize]) -> usize {
    offsets
        .iter()
        .copied()
        .filter(|&offset| offset <= distance)
        .max()
        .unwrap_or(0)
}

impl Route for OptLocations {
    fn set_cache_locations(&mut self, horizontal: &[usize], vertical: &[usize]) {
        self.horizontal = horizontal.to_vec();
        self.vertical = vertical.to_vec();
    }

    fn axis(&self, origin: Coord, destination: Coord) -> Axis {
        if destination.col == origin.col {
            return Axis::Vertical;
        }
        if destination.row == origin.row {
            return Axis::Horizontal;
        }

        let best_h = best(origin.col.abs_diff(destination.col), &self.horizontal);
        let best_v = best(origin.row.abs_diff(destination.row), &self.vertical);
        match best_v.cmp(&best_h) {
            Ordering::Greater => Axis::Horizontal,
            Ordering::Less | Ordering::Equal => Axis::Vertical,
        }
    }
}
