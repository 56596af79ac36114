// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

//! Network primitives seen by the torus grid models.
//!
//! This crate does not schedule events or move packets. It provides the
//! objects that an external packet engine drives and that the models
//! configure and observe:
//!
//!  - [`Node`](node::Node)s with a forwarding table ([`Fib`](fib::Fib)) and
//!    content-store hit/miss hooks.
//!  - [`NetDevice`](node::NetDevice)s which are the endpoints of
//!    [`Link`](link::Link)s and raise a hook for every transmitted
//!    [`Packet`](packet::Packet).
//!  - [`ProvisionLink`](link::ProvisionLink) which creates a link between two
//!    nodes, with [`PointToPoint`](link::PointToPoint) as the standard
//!    implementation.
//!  - [`Signal`](signal::Signal)s through which observers subscribe to the
//!    hooks.
//!
//! Everything is single-threaded: handles are shared with [`Rc`](std::rc::Rc)
//! and interior state uses [`RefCell`](std::cell::RefCell).

pub mod fib;
pub mod link;
pub mod name;
pub mod node;
pub mod packet;
pub mod signal;
pub mod test_helpers;
pub mod traits;
pub mod types;
