// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

use torus_engine::link::{LinkAttributes, PointToPoint};
use torus_engine::test_helpers::start_test;
use torus_models::grid::{Coord, GridTopology};
use torus_models::placement::CachePlacement;

#[test]
fn apply_sets_node_capacities() {
    let top = start_test(file!());
    let p2p = PointToPoint::new(LinkAttributes::default()).unwrap();
    let grid = GridTopology::new(&top, "grid", 10, 10, &p2p).unwrap();

    let producer = CachePlacement::centre_of(&grid);
    assert_eq!(producer, Coord::new(5, 5));

    let placement = CachePlacement::new(producer, &[2, 4], &[1], 10);
    assert_eq!(placement.producer(), producer);
    let num_caches = placement.apply(&grid);

    // (5, 3), (5, 7), (5, 1), (5, 9), (4, 5), (6, 5)
    assert_eq!(num_caches, 6);
    for (coord, node) in grid.iter_coords() {
        assert_eq!(node.cs_capacity(), placement.capacity_at(coord.row, coord.col));
    }
    assert_eq!(grid.node(5, 9).cs_capacity(), 10);
    assert_eq!(grid.node(6, 5).cs_capacity(), 10);
    assert_eq!(grid.node(6, 6).cs_capacity(), 0);
}
