// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

//! Models of a toroidal grid network used to evaluate in-network caching.
//!
//! The [`GridTopology`](grid::GridTopology) is built once and then shared by
//! reference with a [`RouteComputer`](routing::RouteComputer) which installs
//! static forwarding entries and a
//! [`TrafficCacheTracer`](tracer::TrafficCacheTracer) which collects per-node
//! statistics for the rest of the run.

pub mod grid;
pub mod placement;
pub mod routing;
pub mod tracer;
