// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

//! Static route computation over a [`GridTopology`].
//!
//! A [`RouteComputer`] walks every node of the grid and installs exactly one
//! forwarding entry per node for a name prefix towards a destination. The
//! choice between moving along the row or along the column is made by a
//! pluggable [`Route`] algorithm selected with [`RoutingAlgorithm`].
//!
//! Distances are measured linearly: routes never use the wrap-around links.

use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use torus_engine::name::Name;
use torus_engine::sim_error;
use torus_engine::types::SimError;
use torus_track::entity::{Entity, GetEntity};
use torus_track::{debug, info};

use crate::grid::{Coord, Direction, GridTopology};

pub mod opt_locations;

use opt_locations::OptLocations;

#[derive(clap::ValueEnum, Clone, Copy, Default, Debug, Serialize, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoutingAlgorithm {
    #[default]
    /// Pick the axis using the configured cache locations
    OptLocations,
}

impl fmt::Display for RoutingAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RoutingAlgorithm::OptLocations => write!(f, "opt-locations"),
        }
    }
}

impl FromStr for RoutingAlgorithm {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "opt-locations" | "OptLocations" => Ok(RoutingAlgorithm::OptLocations),
            _ => sim_error!(format!("not a valid routing algorithm: '{s}'")),
        }
    }
}

/// The axis a packet should move along.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// A routing algorithm decides which axis to move along for each
/// origin/destination pair.
pub trait Route {
    /// Distances from the destination at which caches are present along
    /// each axis.
    fn set_cache_locations(&mut self, horizontal: &[usize], vertical: &[usize]);

    fn axis(&self, origin: Coord, destination: Coord) -> Axis;
}

/// The direction to move along `axis` to get from `origin` towards
/// `destination` without wrapping around.
#[must_use]
pub fn direction(axis: Axis, origin: Coord, destination: Coord) -> Direction {
    match axis {
        Axis::Horizontal => {
            if destination.col >= origin.col {
                Direction::Right
            } else {
                Direction::Left
            }
        }
        Axis::Vertical => {
            if destination.row >= origin.row {
                Direction::Up
            } else {
                Direction::Down
            }
        }
    }
}

/// A route installed at one node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ForwardingEntry {
    pub prefix: Name,
    pub node_id: usize,
    pub direction: Direction,
}

pub struct RouteComputer<'a> {
    pub entity: Rc<Entity>,
    grid: &'a GridTopology,
    algorithm: Box<dyn Route>,
}

impl<'a> RouteComputer<'a> {
    #[must_use]
    pub fn new(
        parent: &Rc<Entity>,
        name: &str,
        grid: &'a GridTopology,
        algorithm: RoutingAlgorithm,
    ) -> Self {
        let entity = Rc::new(Entity::new(parent, name));
        info!(entity ; "using {} routing", algorithm);
        let algorithm: Box<dyn Route> = match algorithm {
            RoutingAlgorithm::OptLocations => Box::new(OptLocations::default()),
        };
        Self {
            entity,
            grid,
            algorithm,
        }
    }

    /// Create a route computer from an algorithm name. An unknown name is an
    /// error.
    pub fn from_name(
        parent: &Rc<Entity>,
        name: &str,
        grid: &'a GridTopology,
        algorithm: &str,
    ) -> Result<Self, SimError> {
        let algorithm = algorithm.parse::<RoutingAlgorithm>()?;
        Ok(Self::new(parent, name, grid, algorithm))
    }

    pub fn set_cache_locations(&mut self, horizontal: &[usize], vertical: &[usize]) {
        debug!(self.entity ; "cache locations h={:?} v={:?}", horizontal, vertical);
        self.algorithm.set_cache_locations(horizontal, vertical);
    }

    /// Install a route for `prefix` towards `(dest_row, dest_col)` at every
    /// node in the grid, visiting nodes in row-major order.
    ///
    /// # Panics
    ///
    /// If the destination is outside the grid.
    pub fn add_route(
        &self,
        prefix: &Name,
        dest_row: usize,
        dest_col: usize,
    ) -> Result<Vec<ForwardingEntry>, SimError> {
        let _ = self.grid.index(dest_row, dest_col);
        let destination = Coord::new(dest_row, dest_col);
        info!(self.entity ; "add route {} to {}", prefix, destination);

        let mut entries = Vec::with_capacity(self.grid.num_nodes());
        for (origin, node) in self.grid.iter_coords() {
            let axis = self.algorithm.axis(origin, destination);
            let direction = direction(axis, origin, destination);
            let device = self.grid.device(origin.row, origin.col, direction);
            node.add_route(prefix, device, 1)?;
            debug!(self.entity ; "{}: {} via {}", origin, prefix, direction);
            entries.push(ForwardingEntry {
                prefix: prefix.clone(),
                node_id: node.id(),
                direction,
            });
        }
        Ok(entries)
    }
}

impl GetEntity for RouteComputer<'_> {
    fn entity(&self) -> &Rc<Entity> {
        &self.entity
    }
}
