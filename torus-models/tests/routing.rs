// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

use std::rc::Rc;

use torus_engine::link::{LinkAttributes, PointToPoint};
use torus_engine::name::Name;
use torus_engine::test_helpers::start_test;
use torus_models::grid::{Direction, GridTopology};
use torus_models::routing::{ForwardingEntry, RouteComputer, RoutingAlgorithm};
use torus_track::entity::Entity;

fn build_grid(top: &Rc<Entity>, rows: usize, cols: usize) -> GridTopology {
    let p2p = PointToPoint::new(LinkAttributes::default()).unwrap();
    GridTopology::new(top, "grid", rows, cols, &p2p).unwrap()
}

fn route(
    grid: &GridTopology,
    top: &Rc<Entity>,
    horizontal: &[usize],
    vertical: &[usize],
    dest: (usize, usize),
) -> Vec<ForwardingEntry> {
    let mut router = RouteComputer::new(top, "router", grid, RoutingAlgorithm::OptLocations);
    router.set_cache_locations(horizontal, vertical);
    router
        .add_route(&Name::from("/prefix"), dest.0, dest.1)
        .unwrap()
}

#[test]
fn one_entry_per_node_in_row_major_order() {
    let top = start_test(file!());
    let grid = build_grid(&top, 5, 5);
    let entries = route(&grid, &top, &[1], &[2], (1, 1));

    assert_eq!(entries.len(), 25);
    for (i, entry) in entries.iter().enumerate() {
        assert_eq!(entry.node_id, i);
        assert_eq!(entry.prefix, Name::from("/prefix"));
    }

    let prefix = Name::from("/prefix");
    for (coord, node) in grid.iter_coords() {
        let fib = node.fib();
        assert_eq!(fib.len(), 1);
        let hops = fib.next_hops(&prefix);
        assert_eq!(hops.len(), 1);
        assert_eq!(hops[0].cost, 1);

        let direction = entries[node.id()].direction;
        let expected = grid.device(coord.row, coord.col, direction);
        assert!(Rc::ptr_eq(&hops[0].device, expected));
    }
}

#[test]
fn same_row_goes_horizontal_regardless_of_offsets() {
    let top = start_test(file!());
    let grid = build_grid(&top, 5, 5);
    let origin = grid.index(1, 4);

    for vertical in [&[][..], &[1][..], &[1, 2, 3, 4][..]] {
        let entries = route(&grid, &top, &[], vertical, (1, 1));
        assert_eq!(entries[origin].direction, Direction::Left);
    }
}

#[test]
fn further_vertical_cache_goes_horizontal() {
    let top = start_test(file!());
    let grid = build_grid(&top, 5, 5);
    let entries = route(&grid, &top, &[1], &[2], (1, 1));
    assert_eq!(entries[grid.index(3, 3)].direction, Direction::Left);
}

#[test]
fn no_caches_goes_vertical() {
    let top = start_test(file!());
    let grid = build_grid(&top, 5, 5);
    let entries = route(&grid, &top, &[], &[], (1, 1));
    assert_eq!(entries[grid.index(3, 3)].direction, Direction::Down);
    assert_eq!(entries[grid.index(0, 4)].direction, Direction::Up);
    assert_eq!(entries[grid.index(1, 0)].direction, Direction::Right);
}

#[test]
fn destination_routes_up() {
    let top = start_test(file!());
    let grid = build_grid(&top, 5, 5);
    let entries = route(&grid, &top, &[1], &[1], (2, 2));
    assert_eq!(entries[grid.index(2, 2)].direction, Direction::Up);
}

#[test]
fn routes_reach_destination() {
    let top = start_test(file!());
    let (rows, cols) = (6, 7);
    let grid = build_grid(&top, rows, cols);
    let dest = (3, 2);
    route(&grid, &top, &[1, 3], &[2], dest);

    let prefix = Name::from("/prefix");
    let dest_id = grid.index(dest.0, dest.1);
    for start in grid.nodes() {
        let mut current = start.id();
        let mut hops = 0;
        while current != dest_id {
            let coord = grid.coord(current);
            let device = grid.node(coord.row, coord.col).fib().next_hops(&prefix)[0]
                .device
                .clone();
            current = device.peer().unwrap().node_id();
            hops += 1;
            assert!(hops <= rows + cols, "no route from node {}", start.id());
        }
    }
}

#[test]
fn repeated_routes_are_not_duplicated() {
    let top = start_test(file!());
    let grid = build_grid(&top, 3, 3);
    route(&grid, &top, &[], &[], (1, 1));
    route(&grid, &top, &[], &[], (1, 1));

    for node in &grid {
        assert_eq!(node.fib().next_hops(&Name::from("/prefix")).len(), 1);
    }
}

#[test]
fn unknown_algorithm_installs_nothing() {
    let top = start_test(file!());
    let grid = build_grid(&top, 3, 3);

    let result = RouteComputer::from_name(&top, "router", &grid, "Stochastic");
    assert!(result.is_err());
    for node in &grid {
        assert!(node.fib().is_empty());
    }
}

#[test]
fn algorithm_names() {
    let top = start_test(file!());
    let grid = build_grid(&top, 2, 2);
    for name in ["opt-locations", "OptLocations"] {
        assert!(RouteComputer::from_name(&top, "router", &grid, name).is_ok());
    }
    assert_eq!(RoutingAlgorithm::OptLocations.to_string(), "opt-locations");
}

#[test]
#[should_panic(expected = "coordinate (5, 0) outside 5x5 grid")]
fn destination_out_of_range() {
    let top = start_test(file!());
    let grid = build_grid(&top, 5, 5);
    let router = RouteComputer::new(&top, "router", &grid, RoutingAlgorithm::default());
    let _ = router.add_route(&Name::from("/prefix"), 5, 0);
}
