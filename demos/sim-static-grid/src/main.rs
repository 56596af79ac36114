// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

//! Run a static grid cache evaluation.
//!
//! See `lib.rs` for details.

use std::process::ExitCode;

use sim_static_grid::config::Config;
use sim_static_grid::run;

fn main() -> ExitCode {
    let result = Config::parse_all_sources().and_then(|config| run(&config));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
