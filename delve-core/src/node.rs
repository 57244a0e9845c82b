//! Room storage for the dungeon graph.
//!
//! Each node owns its outgoing arcs, its structural targets and the domain of
//! neighbour-set hypotheses consulted during resolution.

use crate::resolve::Domain;

/// A directed arc owned by its parent node.
///
/// The topology is treated as undirected by every query, but capacity
/// accounting only counts a node's own arcs.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Edge {
    parent: usize,
    child: usize,
}

impl Edge {
    pub(crate) const fn new(parent: usize, child: usize) -> Self {
        Self { parent, child }
    }

    /// Returns the id of the node that owns the arc.
    #[must_use]
    #[rustfmt::skip]
    pub const fn parent(&self) -> usize { self.parent }

    /// Returns the id of the node the arc points at.
    #[must_use]
    #[rustfmt::skip]
    pub const fn child(&self) -> usize { self.child }
}

/// A room in the dungeon layout.
#[derive(Clone, Debug)]
pub struct Node {
    id: usize,
    edges: Vec<Edge>,
    domain: Domain,
    max_neighbours: Option<usize>,
    depth: Option<usize>,
    cp_distance: Option<usize>,
}

impl Node {
    pub(crate) fn new(id: usize) -> Self {
        Self {
            id,
            edges: Vec::new(),
            domain: Domain::default(),
            max_neighbours: None,
            depth: None,
            cp_distance: None,
        }
    }

    /// Returns the node's dense identifier.
    #[must_use]
    pub const fn id(&self) -> usize {
        self.id
    }

    /// Returns the arcs owned by this node in insertion order.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns the number of arcs this node owns.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` when this node owns an arc pointing at `child`.
    #[must_use]
    pub fn has_arc_to(&self, child: usize) -> bool {
        self.edges.iter().any(|edge| edge.child == child)
    }

    /// Iterates over the children of this node's own arcs.
    pub fn children(&self) -> impl Iterator<Item = usize> + '_ {
        self.edges.iter().map(Edge::child)
    }

    /// Returns the candidate neighbour-set hypotheses still considered
    /// possible for this node.
    #[must_use]
    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// Target number of own arcs.
    #[must_use]
    pub const fn max_neighbours(&self) -> Option<usize> {
        self.max_neighbours
    }

    /// Target shortest-path distance from the entrance.
    #[must_use]
    pub const fn depth(&self) -> Option<usize> {
        self.depth
    }

    /// Target shortest-path distance from the nearest critical-path node.
    #[must_use]
    pub const fn cp_distance(&self) -> Option<usize> {
        self.cp_distance
    }

    pub(crate) fn push_arc(&mut self, child: usize) {
        self.edges.push(Edge::new(self.id, child));
    }

    pub(crate) fn remove_arc(&mut self, child: usize) -> bool {
        match self.edges.iter().position(|edge| edge.child == child) {
            Some(index) => {
                self.edges.remove(index);
                true
            }
            None => false,
        }
    }

    pub(crate) fn domain_mut(&mut self) -> &mut Domain {
        &mut self.domain
    }

    pub(crate) fn set_max_neighbours(&mut self, value: usize) {
        self.max_neighbours = Some(value);
    }

    pub(crate) fn set_depth(&mut self, value: Option<usize>) {
        self.depth = value;
    }

    pub(crate) fn set_cp_distance(&mut self, value: Option<usize>) {
        self.cp_distance = value;
    }
}
