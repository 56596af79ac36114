// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

use std::fs;

use torus_track::builder::{TrackerConfig, TrackersConfig, setup_trackers};
use torus_track::entity::{Entity, toplevel};
use torus_track::{Track, debug, error, info};

#[test]
fn file_tracker_respects_filter() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("run.log");
    let path_str = path.to_str().unwrap();

    let config = TrackersConfig {
        stdout: TrackerConfig {
            enable: false,
            ..Default::default()
        },
        log_file: TrackerConfig {
            enable: true,
            level: log::Level::Debug,
            filter_regex: ".*router.*",
            file: Some(path_str),
        },
    };

    let tracker = setup_trackers(&config).unwrap();
    {
        let top = toplevel(&tracker, "top");
        let router = Entity::new(&top, "router");
        let grid = Entity::new(&top, "grid");

        debug!(router ; "router debug");
        debug!(grid ; "grid debug");
        info!(grid ; "grid info");
        error!(grid ; "grid error");
    }
    tracker.shutdown();

    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.contains("DEBUG: router debug"));
    assert!(!contents.contains("grid debug"));
    assert!(!contents.contains("grid info"));
    assert!(contents.contains("ERROR: grid error"));
}

#[test]
fn invalid_filter_is_an_error() {
    let config = TrackersConfig {
        stdout: TrackerConfig {
            enable: true,
            filter_regex: "[",
            ..Default::default()
        },
        log_file: TrackerConfig {
            enable: false,
            ..Default::default()
        },
    };
    assert!(setup_trackers(&config).is_err());
}

#[test]
fn missing_log_file_name_is_an_error() {
    let config = TrackersConfig {
        stdout: TrackerConfig {
            enable: false,
            ..Default::default()
        },
        log_file: TrackerConfig {
            enable: true,
            ..Default::default()
        },
    };
    assert!(setup_trackers(&config).is_err());
}
