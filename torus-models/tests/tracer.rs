// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

use std::fs;
use std::rc::Rc;

use torus_engine::link::{LinkAttributes, PointToPoint};
use torus_engine::name::Name;
use torus_engine::packet::Packet;
use torus_engine::test_helpers::start_test;
use torus_models::grid::{Direction, GridTopology};
use torus_models::tracer::{NodeStats, REPORT_HEADER, TrafficCacheTracer};
use torus_track::entity::Entity;

fn build_grid(top: &Rc<Entity>, rows: usize, cols: usize) -> GridTopology {
    let p2p = PointToPoint::new(LinkAttributes::default()).unwrap();
    GridTopology::new(top, "grid", rows, cols, &p2p).unwrap()
}

fn report_lines(buf: &[u8]) -> Vec<String> {
    String::from_utf8(buf.to_vec())
        .unwrap()
        .lines()
        .map(ToString::to_string)
        .collect()
}

#[test]
fn empty_report() {
    let top = start_test(file!());
    let grid = build_grid(&top, 2, 3);
    let mut buf = Vec::<u8>::new();

    let tracer = TrafficCacheTracer::new(&top, "tracer", &grid, &mut buf, None);
    tracer.finish().unwrap();

    let lines = report_lines(&buf);
    assert_eq!(
        lines,
        vec![
            REPORT_HEADER,
            "0\t0\t0\t0\t0\t0",
            "0\t1\t0\t0\t0\t0",
            "0\t2\t0\t0\t0\t0",
            "1\t0\t0\t0\t0\t0",
            "1\t1\t0\t0\t0\t0",
            "1\t2\t0\t0\t0\t0",
        ]
    );
}

#[test]
fn cache_events_filtered_by_prefix() {
    let top = start_test(file!());
    let grid = build_grid(&top, 3, 3);
    let mut buf = Vec::<u8>::new();

    let prefix = Name::from("/static-grid/cache-test/1");
    let mut tracer =
        TrafficCacheTracer::new(&top, "tracer", &grid, &mut buf, Some(prefix.clone()));
    tracer.trace_cache_events();

    let matching = prefix.child("seg=0");
    let other = Name::from("/static-grid/cache-test/2/seg=0");

    grid.node(1, 2).notify_cs_hit(&matching, &matching);
    grid.node(1, 2).notify_cs_hit(&other, &other);
    grid.node(0, 0).notify_cs_miss(&matching);
    grid.node(0, 0).notify_cs_miss(&matching);
    grid.node(2, 2).notify_cs_miss(&other);

    assert_eq!(
        tracer.stats(1, 2),
        NodeStats {
            hits: 1,
            ..NodeStats::default()
        }
    );
    assert_eq!(
        tracer.stats(0, 0),
        NodeStats {
            misses: 2,
            ..NodeStats::default()
        }
    );
    assert_eq!(tracer.stats(2, 2), NodeStats::default());
    assert_eq!(tracer.stats(1, 1), NodeStats::default());

    tracer.finish().unwrap();
    let lines = report_lines(&buf);
    assert_eq!(lines[1], "0\t0\t0\t2\t0\t0");
    assert_eq!(lines[6], "1\t2\t1\t0\t0\t0");
}

#[test]
fn no_prefix_counts_everything() {
    let top = start_test(file!());
    let grid = build_grid(&top, 2, 2);
    let mut buf = Vec::<u8>::new();

    let mut tracer = TrafficCacheTracer::new(&top, "tracer", &grid, &mut buf, None);
    tracer.trace_cache_events();
    grid.node(0, 1).notify_cs_hit(&Name::from("/a"), &Name::from("/a"));
    grid.node(0, 1).notify_cs_miss(&Name::from("/b/c"));

    let stats = tracer.stats(0, 1);
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);
}

#[test]
fn transmissions_counted_per_node() {
    let top = start_test(file!());
    let grid = build_grid(&top, 3, 3);
    let mut buf = Vec::<u8>::new();

    let mut tracer = TrafficCacheTracer::new(&top, "tracer", &grid, &mut buf, None);
    tracer.trace_transmissions();

    grid.device(1, 2, Direction::Right)
        .transmit(&Packet::new(&top, 1024));
    grid.device(1, 2, Direction::Down)
        .transmit(&Packet::new(&top, 100));
    grid.device(0, 0, Direction::Left)
        .transmit(&Packet::new(&top, 50));

    assert_eq!(
        tracer.stats(1, 2),
        NodeStats {
            tx_packets: 2,
            tx_bytes: 1124,
            ..NodeStats::default()
        }
    );
    assert_eq!(tracer.stats(0, 0).tx_packets, 1);
    assert_eq!(tracer.stats(0, 0).tx_bytes, 50);
    assert_eq!(tracer.stats(0, 2), NodeStats::default());
}

#[test]
fn cache_events_ignored_unless_traced() {
    let top = start_test(file!());
    let grid = build_grid(&top, 2, 2);
    let mut buf = Vec::<u8>::new();

    let mut tracer = TrafficCacheTracer::new(&top, "tracer", &grid, &mut buf, None);
    tracer.trace_transmissions();
    grid.node(0, 0).notify_cs_miss(&Name::from("/a"));
    assert_eq!(tracer.stats(0, 0), NodeStats::default());
}

#[test]
fn report_written_once_on_drop() {
    let top = start_test(file!());
    let grid = build_grid(&top, 2, 2);
    let mut buf = Vec::<u8>::new();

    {
        let mut tracer = TrafficCacheTracer::new(&top, "tracer", &grid, &mut buf, None);
        tracer.trace_cache_events();
        tracer.trace_transmissions();
        grid.node(1, 1).notify_cs_miss(&Name::from("/a"));
    }

    let lines = report_lines(&buf);
    assert_eq!(lines.len(), 5);
    assert_eq!(lines.iter().filter(|l| l.starts_with('#')).count(), 1);
    assert_eq!(lines[4], "1\t1\t0\t1\t0\t0");
}

#[test]
fn subscriptions_removed_on_drop() {
    let top = start_test(file!());
    let grid = build_grid(&top, 2, 2);
    let mut buf = Vec::<u8>::new();

    let mut tracer = TrafficCacheTracer::new(&top, "tracer", &grid, &mut buf, None);
    tracer.trace_cache_events();
    tracer.trace_transmissions();
    assert_eq!(grid.node(0, 0).cs_hit().num_slots(), 1);
    assert_eq!(grid.device(0, 0, Direction::Up).mac_tx().num_slots(), 1);

    tracer.finish().unwrap();
    for node in &grid {
        assert_eq!(node.cs_hit().num_slots(), 0);
        assert_eq!(node.cs_miss().num_slots(), 0);
        for device in node.devices() {
            assert_eq!(device.mac_tx().num_slots(), 0);
        }
    }
}

#[test]
fn report_to_file() {
    let top = start_test(file!());
    let grid = build_grid(&top, 1, 2);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cs-cache.txt");

    let file = fs::File::create(&path).unwrap();
    let mut tracer = TrafficCacheTracer::new(&top, "tracer", &grid, file, None);
    tracer.trace_transmissions();
    grid.device(0, 1, Direction::Right)
        .transmit(&Packet::new(&top, 10));
    tracer.finish().unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    assert_eq!(
        contents,
        format!("{REPORT_HEADER}\n0\t0\t0\t0\t0\t0\n0\t1\t0\t0\t1\t10\n")
    );
}
