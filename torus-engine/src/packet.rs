// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

//! The unit handed to a [`NetDevice`](crate::node::NetDevice) for
//! transmission.

use std::fmt;

use torus_track::Id;
use torus_track::entity::Entity;

use crate::traits::TotalBytes;

#[derive(Clone, Debug)]
pub struct Packet {
    id: Id,
    size_bytes: usize,
}

impl Packet {
    #[must_use]
    pub fn new(created_by: &Entity, size_bytes: usize) -> Self {
        Self {
            id: created_by.tracker.unique_id(),
            size_bytes,
        }
    }

    #[must_use]
    pub fn id(&self) -> Id {
        self.id
    }
}

impl TotalBytes for Packet {
    fn total_bytes(&self) -> usize {
        self.size_bytes
    }
}

impl fmt::Display for Packet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "packet {} ({} bytes)", self.id, self.size_bytes)
    }
}
