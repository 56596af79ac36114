// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

//! A set of common traits.

/// The `TotalBytes` trait is used to determine how many bytes an object
/// represents on the wire.
pub trait TotalBytes {
    fn total_bytes(&self) -> usize;
}
