// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

//! Links between nodes and the provisioners that create them.

use std::rc::Rc;

use byte_unit::Byte;
use torus_track::connect;

use crate::node::{NetDevice, Node};
use crate::sim_error;
use crate::types::SimError;

/// Physical parameters shared by the devices at either end of a link.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LinkAttributes {
    pub data_rate_bps: u64,
    pub delay_ns: u64,
    pub queue_packets: usize,
}

impl Default for LinkAttributes {
    fn default() -> Self {
        Self {
            data_rate_bps: 1_000_000_000,
            delay_ns: 1_000_000,
            queue_packets: 100,
        }
    }
}

/// A bidirectional link. `endpoint(0)` belongs to the first node passed to
/// [`ProvisionLink::install`] and `endpoint(1)` to the second.
pub struct Link {
    endpoints: [Rc<NetDevice>; 2],
}

impl Link {
    #[must_use]
    pub fn new(first: Rc<NetDevice>, second: Rc<NetDevice>) -> Self {
        Self {
            endpoints: [first, second],
        }
    }

    /// # Panics
    ///
    /// If `index` is not 0 or 1.
    #[must_use]
    pub fn endpoint(&self, index: usize) -> &Rc<NetDevice> {
        assert!(index < 2, "link endpoint {index} out of range");
        &self.endpoints[index]
    }
}

/// Creates a link between two nodes, adding one device to each.
pub trait ProvisionLink {
    fn install(&self, first: &Rc<Node>, second: &Rc<Node>) -> Result<Link, SimError>;
}

/// Provisions point-to-point links that all share the same attributes.
pub struct PointToPoint {
    attributes: LinkAttributes,
}

impl PointToPoint {
    pub fn new(attributes: LinkAttributes) -> Result<Self, SimError> {
        if attributes.data_rate_bps == 0 {
            return sim_error!("point-to-point data rate must be non-zero");
        }
        if attributes.queue_packets == 0 {
            return sim_error!("point-to-point queue must hold at least one packet");
        }
        Ok(Self { attributes })
    }
}

impl ProvisionLink for PointToPoint {
    fn install(&self, first: &Rc<Node>, second: &Rc<Node>) -> Result<Link, SimError> {
        let first_device = first.install_device(self.attributes);
        let second_device = second.install_device(self.attributes);
        first_device.set_peer(&second_device);
        second_device.set_peer(&first_device);
        connect!(first_device.entity ; second_device.entity);
        connect!(second_device.entity ; first_device.entity);
        Ok(Link::new(first_device, second_device))
    }
}

/// Parse a data rate such as `1000Mb`, `1Gbps` or `10MB/s` into bits per
/// second.
///
/// A lower-case `b` is bits and an upper-case `B` is bytes.
pub fn parse_data_rate(s: &str) -> Result<u64, SimError> {
    let trimmed = s.trim();
    let amount = trimmed
        .strip_suffix("ps")
        .or_else(|| trimmed.strip_suffix("/s"))
        .unwrap_or(trimmed);
    match Byte::parse_str(amount, false) {
        Ok(bytes) => Ok(bytes.as_u64() * 8),
        Err(e) => sim_error!(format!("invalid data rate '{s}': {e}")),
    }
}
