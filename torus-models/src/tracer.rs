// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

//! Per-node traffic and cache statistics.
//!
//! The tracer subscribes to hooks raised by the nodes and devices of a
//! [`GridTopology`] and keeps one [`NodeStats`] per node. When the tracer is
//! finished (or dropped) it writes a report:
//!
//! ```txt
//! # Row	Col	Hits	Misses	Packets	Bytes
//! 0	0	0	1	12	1536
//! 0	1	...
//! ```
//!
//! with one tab-separated line per node in row-major order. The report is
//! written exactly once.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use torus_engine::name::Name;
use torus_engine::node::{CsHit, CsMiss, NetDevice, Node};
use torus_engine::packet::Packet;
use torus_engine::signal::SlotId;
use torus_engine::traits::TotalBytes;
use torus_track::entity::{Entity, GetEntity};
use torus_track::{debug, error, info};

use crate::grid::{Coord, GridTopology};

pub const REPORT_HEADER: &str = "# Row\tCol\tHits\tMisses\tPackets\tBytes";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NodeStats {
    pub hits: u64,
    pub misses: u64,
    pub tx_packets: u64,
    pub tx_bytes: u64,
}

type StatsMatrix = Rc<RefCell<Vec<Vec<NodeStats>>>>;

/// Everything a per-node callback needs, captured by value.
#[derive(Clone)]
struct NodeContext {
    coord: Coord,
    stats: StatsMatrix,
    prefix: Name,
}

impl NodeContext {
    fn record(&self, update: impl FnOnce(&mut NodeStats)) {
        let mut stats = self.stats.borrow_mut();
        update(&mut stats[self.coord.row][self.coord.col]);
    }

    fn on_cs_hit(&self, hit: &CsHit) {
        if self.prefix.is_prefix_of(&hit.interest) {
            self.record(|s| s.hits += 1);
        }
    }

    fn on_cs_miss(&self, miss: &CsMiss) {
        if self.prefix.is_prefix_of(&miss.interest) {
            self.record(|s| s.misses += 1);
        }
    }

    fn on_mac_tx(&self, packet: &Packet) {
        let bytes = packet.total_bytes() as u64;
        self.record(|s| {
            s.tx_packets += 1;
            s.tx_bytes += bytes;
        });
    }
}

enum Subscription {
    CsHit(Rc<Node>, SlotId),
    CsMiss(Rc<Node>, SlotId),
    MacTx(Rc<NetDevice>, SlotId),
}

impl Subscription {
    fn disconnect(&self) {
        match self {
            Subscription::CsHit(node, id) => node.cs_hit().disconnect(*id),
            Subscription::CsMiss(node, id) => node.cs_miss().disconnect(*id),
            Subscription::MacTx(device, id) => device.mac_tx().disconnect(*id),
        };
    }
}

pub struct TrafficCacheTracer<'a, W>
where
    W: Write,
{
    pub entity: Rc<Entity>,
    grid: &'a GridTopology,
    output: Option<W>,
    prefix: Name,
    stats: StatsMatrix,
    subscriptions: Vec<Subscription>,
}

impl<'a, W> TrafficCacheTracer<'a, W>
where
    W: Write,
{
    /// Create a tracer for `grid` writing its report to `output`. Cache
    /// events are only counted for names under `prefix` (all names if
    /// `None`).
    pub fn new(
        parent: &Rc<Entity>,
        name: &str,
        grid: &'a GridTopology,
        output: W,
        prefix: Option<Name>,
    ) -> Self {
        let entity = Rc::new(Entity::new(parent, name));
        let prefix = prefix.unwrap_or_default();
        info!(entity ; "tracing {} nodes, prefix {}", grid.num_nodes(), prefix);
        Self {
            entity,
            grid,
            output: Some(output),
            prefix,
            stats: Rc::new(RefCell::new(vec![
                vec![NodeStats::default(); grid.cols()];
                grid.rows()
            ])),
            subscriptions: Vec::new(),
        }
    }

    fn context(&self, coord: Coord) -> NodeContext {
        NodeContext {
            coord,
            stats: self.stats.clone(),
            prefix: self.prefix.clone(),
        }
    }

    /// Count content-store hits and misses at every node.
    pub fn trace_cache_events(&mut self) {
        for (coord, node) in self.grid.iter_coords() {
            let context = self.context(coord);
            let hit_id = node.cs_hit().connect(move |hit| context.on_cs_hit(hit));
            let context = self.context(coord);
            let miss_id = node.cs_miss().connect(move |miss| context.on_cs_miss(miss));

            self.subscriptions
                .push(Subscription::CsHit(node.clone(), hit_id));
            self.subscriptions
                .push(Subscription::CsMiss(node.clone(), miss_id));
        }
        debug!(self.entity ; "cache events traced");
    }

    /// Count packets and bytes sent by every device of every node.
    pub fn trace_transmissions(&mut self) {
        for (coord, node) in self.grid.iter_coords() {
            for device in node.devices() {
                let context = self.context(coord);
                let id = device
                    .mac_tx()
                    .connect(move |packet| context.on_mac_tx(packet));
                self.subscriptions.push(Subscription::MacTx(device, id));
            }
        }
        debug!(self.entity ; "transmissions traced");
    }

    /// Statistics collected so far for node `(row, col)`.
    ///
    /// # Panics
    ///
    /// If the coordinate is outside the grid.
    #[must_use]
    pub fn stats(&self, row: usize, col: usize) -> NodeStats {
        let _ = self.grid.index(row, col);
        self.stats.borrow()[row][col]
    }

    /// Write the report and stop tracing.
    pub fn finish(mut self) -> io::Result<()> {
        self.write_report()
    }

    fn write_report(&mut self) -> io::Result<()> {
        let Some(mut output) = self.output.take() else {
            return Ok(());
        };

        writeln!(output, "{REPORT_HEADER}")?;
        for (row, row_stats) in self.stats.borrow().iter().enumerate() {
            for (col, s) in row_stats.iter().enumerate() {
                writeln!(
                    output,
                    "{row}\t{col}\t{}\t{}\t{}\t{}",
                    s.hits, s.misses, s.tx_packets, s.tx_bytes
                )?;
            }
        }
        output.flush()?;
        info!(self.entity ; "report written");
        Ok(())
    }
}

impl<W> Drop for TrafficCacheTracer<'_, W>
where
    W: Write,
{
    fn drop(&mut self) {
        for subscription in self.subscriptions.drain(..) {
            subscription.disconnect();
        }
        if let Err(e) = self.write_report() {
            error!(self.entity ; "failed to write report: {}", e);
        }
    }
}

impl<W> GetEntity for TrafficCacheTracer<'_, W>
where
    W: Write,
{
    fn entity(&self) -> &Rc<Entity> {
        &self.entity
    }
}
