// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

//! Configuration gathered from several sources.
//!
//! Later sources override earlier ones:
//!  1. built-in defaults
//!  2. a TOML file given with `--conf-file`
//!  3. environment variables prefixed with `TORUS_` (e.g. `TORUS_ROWS=4`)
//!  4. command-line flags

use std::path::PathBuf;

use clap::Parser;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Deserializer, Serialize};
use torus_engine::sim_error;
use torus_engine::types::SimError;

pub const ENV_PREFIX: &str = "TORUS_";
pub const REPORT_FILE: &str = "cs-cache.txt";

const DEFAULT_ROWS: usize = 10;
const DEFAULT_COLUMNS: usize = 10;
const DEFAULT_ROUTER: &str = "opt-locations";
const DEFAULT_CACHE_SIZE: usize = 10;
const DEFAULT_PREFIX: &str = "/icarus/static-grid/cache-test/1/";
const DEFAULT_OUT_PREFIX: &str = "results/";
const DEFAULT_DATA_RATE: &str = "1000Mb";
const DEFAULT_DELAY_NS: u64 = 1_000_000;
const DEFAULT_QUEUE_PACKETS: usize = 100;
const DEFAULT_STDOUT_LEVEL: log::Level = log::Level::Info;

#[derive(Parser, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[command(about = "Static routing and cache statistics on a toroidal grid")]
pub struct Config {
    /// TOML file to read configuration from.
    #[arg(long)]
    #[serde(skip)]
    pub conf_file: Option<PathBuf>,

    /// Number of rows in the grid.
    #[arg(short = 'r', long)]
    pub rows: Option<usize>,

    /// Number of columns in the grid.
    #[arg(short = 'c', long)]
    pub columns: Option<usize>,

    /// Routing algorithm used to install routes towards the producer.
    #[arg(long)]
    pub router: Option<String>,

    /// Distances from the producer, along its row, at which caches are
    /// placed. Separated by commas or spaces.
    #[arg(long)]
    #[serde(default, deserialize_with = "parse_offset_list")]
    pub hcaches: Option<String>,

    /// Distances from the producer, along its column, at which caches are
    /// placed. Separated by commas or spaces.
    #[arg(long)]
    #[serde(default, deserialize_with = "parse_offset_list")]
    pub vcaches: Option<String>,

    /// Content store capacity of the nodes that hold a cache.
    #[arg(long = "cache")]
    pub cache_size: Option<usize>,

    /// Name prefix that is routed and traced.
    #[arg(long)]
    pub prefix: Option<String>,

    /// Prefix for output files. The report is written to
    /// `<out-prefix>cs-cache.txt`.
    #[arg(long)]
    pub out_prefix: Option<String>,

    /// Link data rate (e.g. `1000Mb`, `1Gbps`).
    #[arg(long = "rate")]
    pub data_rate: Option<String>,

    /// Link propagation delay in nanoseconds.
    #[arg(long = "delay-ns")]
    pub delay_ns: Option<u64>,

    /// Number of packets each device queue can hold.
    #[arg(long)]
    pub queue_packets: Option<usize>,

    /// Enable logging to the console.
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub stdout: Option<bool>,

    /// Level of log message to display.
    #[arg(long)]
    pub stdout_level: Option<log::Level>,

    /// Set a regular expression for which entities should have logging
    /// level set to `--stdout-level`. Others will have level set to `Error`.
    #[arg(long)]
    pub stdout_filter_regex: Option<String>,

    /// Also write all log messages to this file.
    #[arg(long)]
    pub log_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            conf_file: None,
            rows: Some(DEFAULT_ROWS),
            columns: Some(DEFAULT_COLUMNS),
            router: Some(DEFAULT_ROUTER.to_string()),
            hcaches: Some(String::new()),
            vcaches: Some(String::new()),
            cache_size: Some(DEFAULT_CACHE_SIZE),
            prefix: Some(DEFAULT_PREFIX.to_string()),
            out_prefix: Some(DEFAULT_OUT_PREFIX.to_string()),
            data_rate: Some(DEFAULT_DATA_RATE.to_string()),
            delay_ns: Some(DEFAULT_DELAY_NS),
            queue_packets: Some(DEFAULT_QUEUE_PACKETS),
            stdout: Some(false),
            stdout_level: Some(DEFAULT_STDOUT_LEVEL),
            stdout_filter_regex: Some(String::new()),
            log_file: None,
        }
    }
}

/// Copy every field that was given on the command line.
macro_rules! merge_given {
    ($config:ident, $cli:ident, $($field:ident),+) => {
        $(
            if $cli.$field.is_some() {
                $config.$field = $cli.$field;
            }
        )+
    };
}

impl Config {
    /// Parse the command line and combine it with all other sources.
    pub fn parse_all_sources() -> Result<Self, SimError> {
        Self::from_sources(Self::parse())
    }

    /// Combine `cli` (already parsed command-line flags) with the defaults,
    /// the configuration file and the environment.
    pub fn from_sources(cli: Config) -> Result<Self, SimError> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        if let Some(conf_file) = &cli.conf_file {
            if !conf_file.is_file() {
                return sim_error!(format!(
                    "configuration file {} not found",
                    conf_file.display()
                ));
            }
            figment = figment.merge(Toml::file(conf_file));
        }
        figment = figment.merge(Env::prefixed(ENV_PREFIX));

        let config: Config = match figment.extract() {
            Ok(config) => config,
            Err(e) => return sim_error!(format!("invalid configuration: {e}")),
        };
        Ok(config.clap_merge(cli))
    }

    fn clap_merge(mut self, cli: Config) -> Self {
        merge_given!(
            self,
            cli,
            conf_file,
            rows,
            columns,
            router,
            hcaches,
            vcaches,
            cache_size,
            prefix,
            out_prefix,
            data_rate,
            delay_ns,
            queue_packets,
            stdout,
            stdout_level,
            stdout_filter_regex,
            log_file
        );
        self
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows.unwrap_or(DEFAULT_ROWS)
    }

    #[must_use]
    pub fn columns(&self) -> usize {
        self.columns.unwrap_or(DEFAULT_COLUMNS)
    }

    #[must_use]
    pub fn router(&self) -> &str {
        self.router.as_deref().unwrap_or(DEFAULT_ROUTER)
    }

    pub fn horizontal_offsets(&self) -> Result<Vec<usize>, SimError> {
        parse_offsets(self.hcaches.as_deref().unwrap_or_default())
    }

    pub fn vertical_offsets(&self) -> Result<Vec<usize>, SimError> {
        parse_offsets(self.vcaches.as_deref().unwrap_or_default())
    }

    #[must_use]
    pub fn cache_size(&self) -> usize {
        self.cache_size.unwrap_or(DEFAULT_CACHE_SIZE)
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        self.prefix.as_deref().unwrap_or(DEFAULT_PREFIX)
    }

    /// Path of the cache/traffic report.
    #[must_use]
    pub fn report_path(&self) -> PathBuf {
        let out_prefix = self.out_prefix.as_deref().unwrap_or(DEFAULT_OUT_PREFIX);
        PathBuf::from(format!("{out_prefix}{REPORT_FILE}"))
    }

    #[must_use]
    pub fn data_rate(&self) -> &str {
        self.data_rate.as_deref().unwrap_or(DEFAULT_DATA_RATE)
    }

    #[must_use]
    pub fn delay_ns(&self) -> u64 {
        self.delay_ns.unwrap_or(DEFAULT_DELAY_NS)
    }

    #[must_use]
    pub fn queue_packets(&self) -> usize {
        self.queue_packets.unwrap_or(DEFAULT_QUEUE_PACKETS)
    }

    #[must_use]
    pub fn stdout_level(&self) -> log::Level {
        self.stdout_level.unwrap_or(DEFAULT_STDOUT_LEVEL)
    }
}

/// An offset list may arrive as a number (e.g. `TORUS_HCACHES=3` from the
/// environment) rather than as a string.
fn parse_offset_list<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OffsetList {
        Text(String),
        Single(u64),
    }

    Ok(Option::<OffsetList>::deserialize(deserializer)?.map(|list| match list {
        OffsetList::Text(text) => text,
        OffsetList::Single(offset) => offset.to_string(),
    }))
}

/// Parse a list of cache offsets such as `1,3` or `1 3`.
pub fn parse_offsets(list: &str) -> Result<Vec<usize>, SimError> {
    list.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| match token.parse::<usize>() {
            Ok(offset) => Ok(offset),
            Err(_) => sim_error!(format!("invalid cache offset '{token}' in '{list}'")),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets() {
        assert_eq!(parse_offsets("").unwrap(), Vec::<usize>::new());
        assert_eq!(parse_offsets("1,3").unwrap(), vec![1, 3]);
        assert_eq!(parse_offsets(" 2  4,,6 ").unwrap(), vec![2, 4, 6]);
        assert!(parse_offsets("1,x").is_err());
        assert!(parse_offsets("-1").is_err());
    }

    #[test]
    fn cli_wins_only_when_given() {
        let defaults = Config::default();
        let cli = Config::parse_from(["sim-static-grid", "--rows", "4", "--stdout"]);
        let merged = defaults.clone().clap_merge(cli);
        assert_eq!(merged.rows(), 4);
        assert_eq!(merged.columns(), defaults.columns());
        assert_eq!(merged.stdout, Some(true));
        assert_eq!(merged.router(), "opt-locations");
    }

    #[test]
    fn report_path() {
        let config = Config {
            out_prefix: Some("out/run1-".to_string()),
            ..Config::default()
        };
        assert_eq!(config.report_path(), PathBuf::from("out/run1-cs-cache.txt"));
        assert_eq!(
            Config::default().report_path(),
            PathBuf::from("results/cs-cache.txt")
        );
    }
}
