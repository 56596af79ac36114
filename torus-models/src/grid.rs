// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

//! A toroidal grid of nodes.
//!
//! Nodes are numbered in row-major order: node `(row, col)` has the linear id
//! `row * cols + col`.
//!
//! Each node owns two links:
//!  - a horizontal link to `(row, (col + 1) % cols)`
//!  - a vertical link to `((row + 1) % rows, col)`
//!
//! Endpoint 0 of a link is on the owning node and endpoint 1 on the
//! neighbour, so the four directions of a node resolve as:
//!
//! ```txt
//!                 UP: endpoint 0 of own vertical link
//!                  |
//! LEFT: endpoint 1 |
//! of horizontal  --+--  RIGHT: endpoint 0 of own horizontal link
//! link owned by    |
//! (row, col - 1)   |
//!                 DOWN: endpoint 1 of vertical link owned by (row - 1, col)
//! ```
//!
//! With a single row (or column) the vertical (or horizontal) links connect
//! a node to itself.

use std::fmt;
use std::rc::Rc;

use torus_engine::link::{Link, ProvisionLink};
use torus_engine::node::{NetDevice, Node};
use torus_engine::sim_error;
use torus_engine::types::SimError;
use torus_track::entity::{Entity, GetEntity};
use torus_track::info;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        write!(f, "{s}")
    }
}

/// A `(row, col)` position in the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    #[must_use]
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

pub struct GridTopology {
    pub entity: Rc<Entity>,
    rows: usize,
    cols: usize,
    nodes: Vec<Rc<Node>>,
    horizontal: Vec<Link>,
    vertical: Vec<Link>,
}

impl GridTopology {
    /// Build a `rows x cols` grid, using `provisioner` to create every link.
    pub fn new(
        parent: &Rc<Entity>,
        name: &str,
        rows: usize,
        cols: usize,
        provisioner: &dyn ProvisionLink,
    ) -> Result<Self, SimError> {
        if rows == 0 || cols == 0 {
            return sim_error!(format!(
                "cannot create a {rows}x{cols} grid, it needs at least one row and one column"
            ));
        }

        let entity = Rc::new(Entity::new(parent, name));

        let mut nodes = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                nodes.push(Node::new(
                    &entity,
                    format!("node_{row}_{col}").as_str(),
                    row * cols + col,
                ));
            }
        }

        let mut horizontal = Vec::with_capacity(rows * cols);
        let mut vertical = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                let this = &nodes[row * cols + col];
                let right = &nodes[row * cols + (col + 1) % cols];
                let up = &nodes[((row + 1) % rows) * cols + col];
                horizontal.push(provisioner.install(this, right)?);
                vertical.push(provisioner.install(this, up)?);
            }
        }

        info!(entity ; "created {}x{} torus", rows, cols);
        Ok(Self {
            entity,
            rows,
            cols,
            nodes,
            horizontal,
            vertical,
        })
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Linear id of node `(row, col)`.
    ///
    /// # Panics
    ///
    /// If the coordinate is outside the grid.
    #[must_use]
    pub fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.rows && col < self.cols,
            "{}: coordinate ({row}, {col}) outside {}x{} grid",
            self.entity,
            self.rows,
            self.cols
        );
        row * self.cols + col
    }

    /// Coordinate of the node with linear id `id`.
    ///
    /// # Panics
    ///
    /// If `id` is not a node of this grid.
    #[must_use]
    pub fn coord(&self, id: usize) -> Coord {
        assert!(
            id < self.nodes.len(),
            "{}: node id {id} outside {}x{} grid",
            self.entity,
            self.rows,
            self.cols
        );
        Coord::new(id / self.cols, id % self.cols)
    }

    /// # Panics
    ///
    /// If the coordinate is outside the grid.
    #[must_use]
    pub fn node(&self, row: usize, col: usize) -> &Rc<Node> {
        &self.nodes[self.index(row, col)]
    }

    /// The horizontal link owned by node `(row, col)`.
    #[must_use]
    pub fn horizontal_link(&self, row: usize, col: usize) -> &Link {
        &self.horizontal[self.index(row, col)]
    }

    /// The vertical link owned by node `(row, col)`.
    #[must_use]
    pub fn vertical_link(&self, row: usize, col: usize) -> &Link {
        &self.vertical[self.index(row, col)]
    }

    /// The device on node `(row, col)` facing `direction`.
    ///
    /// # Panics
    ///
    /// If the coordinate is outside the grid.
    #[must_use]
    pub fn device(&self, row: usize, col: usize, direction: Direction) -> &Rc<NetDevice> {
        // Check before the wrapping arithmetic below can hide a bad coordinate
        let _ = self.index(row, col);
        match direction {
            Direction::Right => self.horizontal_link(row, col).endpoint(0),
            Direction::Up => self.vertical_link(row, col).endpoint(0),
            Direction::Left => self
                .horizontal_link(row, (col + self.cols - 1) % self.cols)
                .endpoint(1),
            Direction::Down => self
                .vertical_link((row + self.rows - 1) % self.rows, col)
                .endpoint(1),
        }
    }

    /// All nodes in row-major order.
    pub fn nodes(&self) -> impl Iterator<Item = &Rc<Node>> {
        self.nodes.iter()
    }

    /// All nodes in row-major order together with their coordinate.
    pub fn iter_coords(&self) -> impl Iterator<Item = (Coord, &Rc<Node>)> {
        let cols = self.cols;
        self.nodes
            .iter()
            .enumerate()
            .map(move |(i, node)| (Coord::new(i / cols, i % cols), node))
    }
}

impl<'a> IntoIterator for &'a GridTopology {
    type Item = &'a Rc<Node>;
    type IntoIter = std::slice::Iter<'a, Rc<Node>>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

impl GetEntity for GridTopology {
    fn entity(&self) -> &Rc<Entity> {
        &self.entity
    }
}

impl fmt::Display for GridTopology {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.entity)
    }
}
