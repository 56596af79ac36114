// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

//! Content store placement around a producer.
//!
//! Caches are only placed on the producer's own row and column. A node on
//! the producer's row gets a content store when its horizontal distance to
//! the producer is one of the horizontal offsets, and likewise for the
//! producer's column and the vertical offsets. Every other node gets a
//! content store of capacity 0.

use torus_track::{debug, info};

use crate::grid::{Coord, GridTopology};

pub struct CachePlacement {
    producer: Coord,
    horizontal_offsets: Vec<usize>,
    vertical_offsets: Vec<usize>,
    cache_size: usize,
}

impl CachePlacement {
    #[must_use]
    pub fn new(
        producer: Coord,
        horizontal_offsets: &[usize],
        vertical_offsets: &[usize],
        cache_size: usize,
    ) -> Self {
        Self {
            producer,
            horizontal_offsets: horizontal_offsets.to_vec(),
            vertical_offsets: vertical_offsets.to_vec(),
            cache_size,
        }
    }

    /// The conventional producer location: the centre of the grid.
    #[must_use]
    pub fn centre_of(grid: &GridTopology) -> Coord {
        Coord::new(grid.rows() / 2, grid.cols() / 2)
    }

    #[must_use]
    pub fn producer(&self) -> Coord {
        self.producer
    }

    /// Content store capacity for node `(row, col)`.
    #[must_use]
    pub fn capacity_at(&self, row: usize, col: usize) -> usize {
        let row_distance = row.abs_diff(self.producer.row);
        let col_distance = col.abs_diff(self.producer.col);

        let on_cached_row = row_distance == 0 && self.horizontal_offsets.contains(&col_distance);
        let on_cached_col = col_distance == 0 && self.vertical_offsets.contains(&row_distance);
        if on_cached_row || on_cached_col {
            self.cache_size
        } else {
            0
        }
    }

    /// Set the content store capacity of every node in `grid`. Returns the
    /// number of nodes given a non-zero capacity.
    pub fn apply(&self, grid: &GridTopology) -> usize {
        let mut num_caches = 0;
        for (coord, node) in grid.iter_coords() {
            let capacity = self.capacity_at(coord.row, coord.col);
            node.set_cs_capacity(capacity);
            if capacity > 0 {
                debug!(grid.entity ; "cache of {} at {}", capacity, coord);
                num_caches += 1;
            }
        }
        info!(grid.entity ; "{} caches placed around producer at {}", num_caches, self.producer);
        num_caches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_on_producer_axes() {
        let placement = CachePlacement::new(Coord::new(5, 5), &[1, 3], &[2], 10);

        assert_eq!(placement.capacity_at(5, 6), 10);
        assert_eq!(placement.capacity_at(5, 4), 10);
        assert_eq!(placement.capacity_at(5, 2), 10);
        assert_eq!(placement.capacity_at(5, 8), 10);
        assert_eq!(placement.capacity_at(5, 7), 0);

        assert_eq!(placement.capacity_at(3, 5), 10);
        assert_eq!(placement.capacity_at(7, 5), 10);
        assert_eq!(placement.capacity_at(6, 5), 0);

        // Distance matches but not on the producer's row/column
        assert_eq!(placement.capacity_at(4, 6), 0);
        assert_eq!(placement.capacity_at(5, 5), 0);
    }

    #[test]
    fn zero_offset_caches_producer() {
        let placement = CachePlacement::new(Coord::new(1, 1), &[], &[0], 4);
        assert_eq!(placement.capacity_at(1, 1), 4);
        assert_eq!(placement.capacity_at(0, 1), 0);
    }
}
