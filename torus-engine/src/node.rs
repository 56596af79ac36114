// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

//! Nodes and the network devices attached to them.

use std::cell::{Cell, Ref, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use torus_track::entity::{Entity, GetEntity};
use torus_track::trace;

use crate::fib::Fib;
use crate::link::LinkAttributes;
use crate::name::Name;
use crate::packet::Packet;
use crate::signal::Signal;
use crate::sim_error;
use crate::traits::TotalBytes;
use crate::types::SimResult;

/// Raised when a request was answered from a node's content store.
#[derive(Clone, Debug)]
pub struct CsHit {
    pub interest: Name,
    pub data: Name,
}

/// Raised when a request could not be answered from a node's content store.
#[derive(Clone, Debug)]
pub struct CsMiss {
    pub interest: Name,
}

pub struct Node {
    pub entity: Rc<Entity>,
    id: usize,
    devices: RefCell<Vec<Rc<NetDevice>>>,
    fib: RefCell<Fib>,
    cs_capacity: Cell<usize>,
    cs_hit: Signal<CsHit>,
    cs_miss: Signal<CsMiss>,
}

impl Node {
    #[must_use]
    pub fn new(parent: &Rc<Entity>, name: &str, id: usize) -> Rc<Self> {
        Rc::new(Self {
            entity: Rc::new(Entity::new(parent, name)),
            id,
            devices: RefCell::new(Vec::new()),
            fib: RefCell::new(Fib::default()),
            cs_capacity: Cell::new(0),
            cs_hit: Signal::new(),
            cs_miss: Signal::new(),
        })
    }

    /// The node's linear id within its network.
    #[must_use]
    pub fn id(&self) -> usize {
        self.id
    }

    /// Create a new device on this node. Devices are numbered in the order
    /// they are installed.
    pub fn install_device(&self, attributes: LinkAttributes) -> Rc<NetDevice> {
        let mut devices = self.devices.borrow_mut();
        let if_index = devices.len();
        let device = Rc::new(NetDevice {
            entity: Rc::new(Entity::new(&self.entity, &format!("dev{if_index}"))),
            node_id: self.id,
            if_index,
            attributes,
            peer: RefCell::new(Weak::new()),
            mac_tx: Signal::new(),
        });
        devices.push(device.clone());
        device
    }

    #[must_use]
    pub fn num_devices(&self) -> usize {
        self.devices.borrow().len()
    }

    #[must_use]
    pub fn device(&self, if_index: usize) -> Option<Rc<NetDevice>> {
        self.devices.borrow().get(if_index).cloned()
    }

    #[must_use]
    pub fn devices(&self) -> Vec<Rc<NetDevice>> {
        self.devices.borrow().clone()
    }

    #[must_use]
    pub fn fib(&self) -> Ref<'_, Fib> {
        self.fib.borrow()
    }

    /// Add a forwarding entry for `prefix` through one of this node's own
    /// devices.
    pub fn add_route(&self, prefix: &Name, device: &Rc<NetDevice>, cost: u64) -> SimResult {
        if device.node_id() != self.id
            || !self.devices.borrow().iter().any(|d| Rc::ptr_eq(d, device))
        {
            return sim_error!(format!(
                "{}: device {} does not belong to this node",
                self.entity, device.entity
            ));
        }
        trace!(self.entity ; "route {} via {} cost {}", prefix, device.entity.name, cost);
        self.fib.borrow_mut().add_route(prefix, device, cost);
        Ok(())
    }

    pub fn set_cs_capacity(&self, capacity: usize) {
        self.cs_capacity.set(capacity);
    }

    #[must_use]
    pub fn cs_capacity(&self) -> usize {
        self.cs_capacity.get()
    }

    #[must_use]
    pub fn cs_hit(&self) -> &Signal<CsHit> {
        &self.cs_hit
    }

    #[must_use]
    pub fn cs_miss(&self) -> &Signal<CsMiss> {
        &self.cs_miss
    }

    /// Called by the content store when `interest` was satisfied by `data`.
    pub fn notify_cs_hit(&self, interest: &Name, data: &Name) {
        trace!(self.entity ; "cs hit {}", interest);
        self.cs_hit.emit(&CsHit {
            interest: interest.clone(),
            data: data.clone(),
        });
    }

    /// Called by the content store when `interest` was not found.
    pub fn notify_cs_miss(&self, interest: &Name) {
        trace!(self.entity ; "cs miss {}", interest);
        self.cs_miss.emit(&CsMiss {
            interest: interest.clone(),
        });
    }
}

impl GetEntity for Node {
    fn entity(&self) -> &Rc<Entity> {
        &self.entity
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.entity)
    }
}

/// One interface of a [`Node`]. Each device is one end of a link.
pub struct NetDevice {
    pub entity: Rc<Entity>,
    node_id: usize,
    if_index: usize,
    attributes: LinkAttributes,
    peer: RefCell<Weak<NetDevice>>,
    mac_tx: Signal<Packet>,
}

impl NetDevice {
    /// Id of the node this device is installed on.
    #[must_use]
    pub fn node_id(&self) -> usize {
        self.node_id
    }

    #[must_use]
    pub fn if_index(&self) -> usize {
        self.if_index
    }

    #[must_use]
    pub fn attributes(&self) -> &LinkAttributes {
        &self.attributes
    }

    /// The device at the other end of the link, if it has been paired and
    /// still exists.
    #[must_use]
    pub fn peer(&self) -> Option<Rc<NetDevice>> {
        self.peer.borrow().upgrade()
    }

    pub(crate) fn set_peer(&self, peer: &Rc<NetDevice>) {
        *self.peer.borrow_mut() = Rc::downgrade(peer);
    }

    #[must_use]
    pub fn mac_tx(&self) -> &Signal<Packet> {
        &self.mac_tx
    }

    /// Called by the packet engine each time `packet` is put on the wire.
    pub fn transmit(&self, packet: &Packet) {
        trace!(self.entity ; "tx {} bytes", packet.total_bytes());
        self.mac_tx.emit(packet);
    }
}

impl GetEntity for NetDevice {
    fn entity(&self) -> &Rc<Entity> {
        &self.entity
    }
}

impl fmt::Display for NetDevice {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.entity)
    }
}
