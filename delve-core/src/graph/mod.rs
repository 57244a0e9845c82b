//! Graph container for the dungeon topology.
//!
//! Owns the rooms, exposes connect/disconnect over owned arcs and derives the
//! graph-wide properties (critical path, completeness, planarity bound) on
//! demand from the current arcs. Nothing is cached: arcs change continually
//! while candidates are validated and domains are resolved.

mod adjacency;
mod display;
mod reachability;

#[cfg(test)]
mod tests;

pub use self::adjacency::{AdjacencyList, AdjacencyMatrix, AdjacencyMode};

use tracing::debug;

use crate::{
    error::{Result, TopologyError},
    node::{Edge, Node},
    path::shortest_path,
};

pub(crate) use self::reachability::reachable_from;

/// Rooms and their connections.
///
/// Node ids are dense and zero-based: id `0` is the entrance and the highest
/// id is the goal.
///
/// # Examples
/// ```
/// use delve_core::DungeonGraph;
///
/// let mut graph = DungeonGraph::with_node_count(3);
/// graph.connect(0, 1).expect("nodes exist");
/// graph.connect(1, 2).expect("nodes exist");
/// assert_eq!(graph.critical_path(), vec![0, 1, 2]);
/// assert!(!graph.is_complete());
/// ```
#[derive(Clone, Debug, Default)]
pub struct DungeonGraph {
    nodes: Vec<Node>,
}

impl DungeonGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a graph holding nodes `0..count`.
    #[must_use]
    pub fn with_node_count(count: usize) -> Self {
        Self {
            nodes: (0..count).map(Node::new).collect(),
        }
    }

    /// Registers the node with identifier `id`.
    ///
    /// Ids must be created densely in ascending order, so `id` has to equal
    /// the current node count.
    ///
    /// # Errors
    /// Returns [`TopologyError::NonDenseNodeId`] when `id` is not the next
    /// dense identifier.
    pub fn create_node(&mut self, id: usize) -> Result<()> {
        let expected = self.nodes.len();
        if id != expected {
            return Err(TopologyError::NonDenseNodeId { expected, got: id });
        }
        self.nodes.push(Node::new(id));
        Ok(())
    }

    /// Number of registered nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Looks a node up by id.
    #[must_use]
    pub fn node(&self, id: usize) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub(crate) fn node_mut(&mut self, id: usize) -> Result<&mut Node> {
        let node_count = self.nodes.len();
        self.nodes
            .get_mut(id)
            .ok_or(TopologyError::UnknownNode { node: id, node_count })
    }

    pub(crate) fn require(&self, id: usize) -> Result<&Node> {
        self.nodes.get(id).ok_or(TopologyError::UnknownNode {
            node: id,
            node_count: self.nodes.len(),
        })
    }

    /// Iterates over nodes in id order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Id of the entrance, or `None` for an empty graph.
    #[must_use]
    pub fn entrance(&self) -> Option<usize> {
        (!self.nodes.is_empty()).then_some(0)
    }

    /// Id of the goal, or `None` for an empty graph.
    #[must_use]
    pub fn goal(&self) -> Option<usize> {
        self.nodes.len().checked_sub(1)
    }

    /// Sets the target own-arc count for `id`.
    ///
    /// # Errors
    /// Returns [`TopologyError::UnknownNode`] when `id` does not exist.
    pub fn set_max_neighbours(&mut self, id: usize, value: usize) -> Result<()> {
        self.node_mut(id)?.set_max_neighbours(value);
        Ok(())
    }

    /// Sets (or clears) the target distance from the entrance for `id`.
    ///
    /// # Errors
    /// Returns [`TopologyError::UnknownNode`] when `id` does not exist.
    pub fn set_depth(&mut self, id: usize, value: Option<usize>) -> Result<()> {
        self.node_mut(id)?.set_depth(value);
        Ok(())
    }

    /// Sets (or clears) the target distance from the critical path for `id`.
    ///
    /// # Errors
    /// Returns [`TopologyError::UnknownNode`] when `id` does not exist.
    pub fn set_cp_distance(&mut self, id: usize, value: Option<usize>) -> Result<()> {
        self.node_mut(id)?.set_cp_distance(value);
        Ok(())
    }

    /// Adds the arc `parent -> child` to `parent`'s own arcs.
    ///
    /// Returns `Ok(true)` when an arc was added. Self-connections and arcs
    /// that already exist are ignored and return `Ok(false)`.
    ///
    /// # Errors
    /// Returns [`TopologyError::UnknownNode`] when either id does not exist.
    pub fn connect(&mut self, parent: usize, child: usize) -> Result<bool> {
        self.require(child)?;
        if parent == child {
            debug!(node = parent, "ignoring self-connection");
            return Ok(false);
        }
        let node = self.node_mut(parent)?;
        if node.has_arc_to(child) {
            return Ok(false);
        }
        node.push_arc(child);
        Ok(true)
    }

    /// Removes the arc `parent -> child` if `parent` owns one.
    ///
    /// # Errors
    /// Returns [`TopologyError::UnknownNode`] when either id does not exist.
    pub fn disconnect(&mut self, parent: usize, child: usize) -> Result<bool> {
        self.require(child)?;
        Ok(self.node_mut(parent)?.remove_arc(child))
    }

    /// Returns `true` when `parent` owns an arc to `child`.
    #[must_use]
    pub fn has_arc(&self, parent: usize, child: usize) -> bool {
        self.node(parent).is_some_and(|node| node.has_arc_to(child))
    }

    /// Total number of owned arcs across all nodes.
    #[must_use]
    pub fn arc_count(&self) -> usize {
        self.nodes.iter().map(Node::degree).sum()
    }

    /// Presence grid over owned arcs.
    #[must_use]
    pub fn adjacency_matrix(&self) -> AdjacencyMatrix {
        AdjacencyMatrix::from_nodes(&self.nodes)
    }

    /// Neighbour lists, either owned-only or mirrored.
    #[must_use]
    pub fn adjacency_list(&self, mode: AdjacencyMode) -> AdjacencyList {
        AdjacencyList::from_nodes(&self.nodes, mode)
    }

    /// Mirrored adjacency as it would look with the candidate arc committed.
    pub(crate) fn view_with(&self, parent: usize, child: usize) -> AdjacencyList {
        AdjacencyList::with_candidate(
            &self.nodes,
            AdjacencyMode::Undirected,
            Some(Edge::new(parent, child)),
        )
    }

    /// Shortest path by hop count from `source` to `target`, inclusive.
    ///
    /// An empty vector means `target` is unreachable; it is not an error.
    ///
    /// # Errors
    /// Returns [`TopologyError::UnknownNode`] when either id does not exist.
    ///
    /// # Examples
    /// ```
    /// use delve_core::DungeonGraph;
    ///
    /// let mut graph = DungeonGraph::with_node_count(3);
    /// graph.connect(2, 1).expect("nodes exist");
    /// assert_eq!(graph.path_to(1, 2).expect("ids valid"), vec![1, 2]);
    /// assert!(graph.path_to(0, 2).expect("ids valid").is_empty());
    /// assert_eq!(graph.path_to(0, 0).expect("ids valid"), vec![0]);
    /// ```
    pub fn path_to(&self, source: usize, target: usize) -> Result<Vec<usize>> {
        self.require(source)?;
        self.require(target)?;
        let list = self.adjacency_list(AdjacencyMode::Undirected);
        Ok(shortest_path(&list, source, target))
    }

    /// Shortest path from the entrance to the goal; empty when they are
    /// disconnected or the graph is empty.
    #[must_use]
    pub fn critical_path(&self) -> Vec<usize> {
        critical_path_in(&self.adjacency_list(AdjacencyMode::Undirected))
    }

    /// Returns `true` when the critical path exists, every node owns at least
    /// one arc and every node is reachable from the entrance.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        let list = self.adjacency_list(AdjacencyMode::Undirected);
        if critical_path_in(&list).is_empty() {
            return false;
        }
        if self.nodes.iter().any(|node| node.degree() == 0) {
            return false;
        }
        reachable_from(&list, 0).into_iter().all(|reached| reached)
    }

    /// Cheap non-planarity filter based on `links <= 3 * nodes - 6`.
    ///
    /// This is a necessary condition only; passing it does not prove the
    /// graph has a planar embedding.
    #[must_use]
    pub fn is_planar(&self) -> bool {
        within_planar_bound(&self.adjacency_list(AdjacencyMode::Undirected))
    }
}

pub(crate) fn critical_path_in(list: &AdjacencyList) -> Vec<usize> {
    match list.len().checked_sub(1) {
        Some(goal) => shortest_path(list, 0, goal),
        None => Vec::new(),
    }
}

/// Euler's bound for simple planar graphs. It only holds for three or more
/// vertices; smaller graphs are always planar.
pub(crate) fn within_planar_bound(list: &AdjacencyList) -> bool {
    let nodes = list.len();
    if nodes < 3 {
        return true;
    }
    list.link_count() <= 3 * nodes - 6
}
