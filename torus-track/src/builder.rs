// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

//! Build the [`Tracker`] used by an application from its settings.

use std::fs;
use std::io::{self, BufWriter};
use std::rc::Rc;

use crate::tracker::{EntityManager, MultiTracker, TextTracker, TrackConfigError};
use crate::{Tracker, Writer};

/// Settings for one text tracker.
pub struct TrackerConfig<'a> {
    /// Whether the tracker is created at all.
    pub enable: bool,

    /// Level of the entities selected by `filter_regex` (of all entities if
    /// the filter is empty).
    pub level: log::Level,

    /// Select the entities tracked at `level`. All others only report
    /// errors.
    pub filter_regex: &'a str,

    /// Output file, for trackers that write to a file.
    pub file: Option<&'a str>,
}

impl Default for TrackerConfig<'_> {
    fn default() -> Self {
        Self {
            enable: true,
            level: log::Level::Warn,
            filter_regex: "",
            file: None,
        }
    }
}

/// Settings for every tracker an application can use.
pub struct TrackersConfig<'a> {
    /// Text written to stdout.
    pub stdout: TrackerConfig<'a>,

    /// Text written to `log_file.file`.
    pub log_file: TrackerConfig<'a>,
}

fn entity_manager(config: &TrackerConfig) -> Result<EntityManager, TrackConfigError> {
    if config.filter_regex.is_empty() {
        return Ok(EntityManager::new(config.level));
    }
    let mut manager = EntityManager::new(log::Level::Error);
    manager.add_entity_level_filter(config.filter_regex, config.level)?;
    Ok(manager)
}

fn text_tracker(config: &TrackerConfig, writer: Writer) -> Result<Tracker, TrackConfigError> {
    Ok(Rc::new(TextTracker::new(entity_manager(config)?, writer)))
}

fn file_writer(config: &TrackerConfig) -> Result<Writer, TrackConfigError> {
    let Some(filename) = config.file else {
        return Err(TrackConfigError(
            "a log file tracker requires a file name".to_string(),
        ));
    };
    let file = fs::File::create(filename)
        .map_err(|e| TrackConfigError(format!("unable to create {filename}: {e}")))?;
    Ok(Box::new(BufWriter::new(file)))
}

fn stdout_writer() -> Writer {
    Box::new(BufWriter::new(io::stdout()))
}

/// Create the enabled trackers. If none is enabled then warnings and errors
/// are still printed to stdout.
pub fn setup_trackers(config: &TrackersConfig) -> Result<Tracker, TrackConfigError> {
    let mut trackers = Vec::new();
    if config.stdout.enable {
        trackers.push(text_tracker(&config.stdout, stdout_writer())?);
    }
    if config.log_file.enable {
        trackers.push(text_tracker(&config.log_file, file_writer(&config.log_file)?)?);
    }

    match trackers.len() {
        0 => text_tracker(&TrackerConfig::default(), stdout_writer()),
        1 => Ok(trackers.remove(0)),
        _ => {
            let mut multi = MultiTracker::default();
            for tracker in trackers {
                multi.add_tracker(tracker);
            }
            Ok(Rc::new(multi))
        }
    }
}
