// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

//! Static routing and cache statistics on a toroidal grid.
//!
//! The application:
//!  - builds a `rows x columns` torus of point-to-point links
//!  - places a producer at the centre of the grid and gives content stores
//!    to the nodes at the configured offsets along its row and column
//!  - installs one route per node for the prefix towards the producer
//!  - traces content-store hits/misses and transmissions at every node
//!  - writes the per-node statistics to `<out-prefix>cs-cache.txt`
//!
//! The packet engine that generates traffic is not part of this workspace so
//! the statistics are written as soon as the network has been set up.
//!
//! # Examples
//!
//! ```txt
//! sim-static-grid --rows 8 --columns 8 --hcaches 1,3 --vcaches 2 --out-prefix out/
//! TORUS_ROWS=4 sim-static-grid --stdout --stdout-level debug
//! ```

use std::fs;
use std::io::BufWriter;

use torus_engine::link::{LinkAttributes, PointToPoint, parse_data_rate};
use torus_engine::name::Name;
use torus_engine::types::{SimError, SimResult};
use torus_models::grid::GridTopology;
use torus_models::placement::CachePlacement;
use torus_models::routing::RouteComputer;
use torus_models::tracer::TrafficCacheTracer;
use torus_track::builder::{TrackerConfig, TrackersConfig, setup_trackers};
use torus_track::entity::toplevel;
use torus_track::{Tracker, info};

use crate::config::Config;

pub mod config;

fn setup_all_trackers(config: &Config) -> Result<Tracker, SimError> {
    let trackers = TrackersConfig {
        stdout: TrackerConfig {
            enable: config.stdout.unwrap_or(false),
            level: config.stdout_level(),
            filter_regex: config.stdout_filter_regex.as_deref().unwrap_or_default(),
            file: None,
        },
        log_file: TrackerConfig {
            enable: config.log_file.is_some(),
            level: log::Level::Trace,
            filter_regex: "",
            file: config.log_file.as_deref(),
        },
    };
    setup_trackers(&trackers).map_err(|e| SimError(e.to_string()))
}

/// Build the network, install the routes, trace it and write the report.
pub fn run(config: &Config) -> SimResult {
    let tracker = setup_all_trackers(config)?;
    let result = build_and_trace(config, &tracker);
    tracker.shutdown();
    result
}

fn build_and_trace(config: &Config, tracker: &Tracker) -> SimResult {
    let top = toplevel(tracker, "top");

    let attributes = LinkAttributes {
        data_rate_bps: parse_data_rate(config.data_rate())?,
        delay_ns: config.delay_ns(),
        queue_packets: config.queue_packets(),
    };
    let p2p = PointToPoint::new(attributes)?;
    let grid = GridTopology::new(&top, "grid", config.rows(), config.columns(), &p2p)?;

    let horizontal = config.horizontal_offsets()?;
    let vertical = config.vertical_offsets()?;
    let placement = CachePlacement::new(
        CachePlacement::centre_of(&grid),
        &horizontal,
        &vertical,
        config.cache_size(),
    );
    placement.apply(&grid);
    let producer = placement.producer();

    let mut router = RouteComputer::from_name(&top, "router", &grid, config.router())?;
    router.set_cache_locations(&horizontal, &vertical);
    let prefix = Name::from(config.prefix());
    router.add_route(&prefix, producer.row, producer.col)?;
    info!(top ; "routes for {} installed towards producer at {}", prefix, producer);

    let report_path = config.report_path();
    if let Some(dir) = report_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .map_err(|e| SimError(format!("failed to create {}: {e}", dir.display())))?;
    }
    let file = fs::File::create(&report_path)
        .map_err(|e| SimError(format!("failed to create {}: {e}", report_path.display())))?;

    let mut tracer = TrafficCacheTracer::new(
        &top,
        "tracer",
        &grid,
        BufWriter::new(file),
        Some(prefix),
    );
    tracer.trace_cache_events();
    tracer.trace_transmissions();

    tracer
        .finish()
        .map_err(|e| SimError(format!("failed to write {}: {e}", report_path.display())))?;
    info!(top ; "report written to {}", report_path.display());
    Ok(())
}
