// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

//! Forwarding information base.
//!
//! Each node holds one [`Fib`] mapping name prefixes to the devices packets
//! for that prefix should be sent out of.

use std::rc::Rc;

use crate::name::Name;
use crate::node::NetDevice;

#[derive(Clone)]
pub struct NextHop {
    pub device: Rc<NetDevice>,
    pub cost: u64,
}

pub struct FibEntry {
    prefix: Name,
    next_hops: Vec<NextHop>,
}

impl FibEntry {
    #[must_use]
    pub fn prefix(&self) -> &Name {
        &self.prefix
    }

    #[must_use]
    pub fn next_hops(&self) -> &[NextHop] {
        &self.next_hops
    }
}

#[derive(Default)]
pub struct Fib {
    entries: Vec<FibEntry>,
}

impl Fib {
    /// Add `device` as a next hop for `prefix`. If the device is already a
    /// next hop then only its cost is updated.
    pub fn add_route(&mut self, prefix: &Name, device: &Rc<NetDevice>, cost: u64) {
        let index = match self.entries.iter().position(|e| &e.prefix == prefix) {
            Some(index) => index,
            None => {
                self.entries.push(FibEntry {
                    prefix: prefix.clone(),
                    next_hops: Vec::new(),
                });
                self.entries.len() - 1
            }
        };

        let next_hops = &mut self.entries[index].next_hops;
        match next_hops.iter_mut().find(|h| Rc::ptr_eq(&h.device, device)) {
            Some(hop) => hop.cost = cost,
            None => next_hops.push(NextHop {
                device: device.clone(),
                cost,
            }),
        }
    }

    /// Next hops registered for exactly `prefix`.
    #[must_use]
    pub fn next_hops(&self, prefix: &Name) -> &[NextHop] {
        self.entries
            .iter()
            .find(|e| &e.prefix == prefix)
            .map(|e| e.next_hops.as_slice())
            .unwrap_or_default()
    }

    /// The entry with the longest prefix of `name`.
    #[must_use]
    pub fn longest_prefix_match(&self, name: &Name) -> Option<&FibEntry> {
        self.entries
            .iter()
            .filter(|e| e.prefix.is_prefix_of(name))
            .max_by_key(|e| e.prefix.len())
    }

    /// Number of prefixes in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FibEntry> {
        self.entries.iter()
    }
}
