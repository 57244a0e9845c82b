//! Adjacency views derived from the graph's owned arcs.
//!
//! Storage is directed (each node owns its outgoing arcs) while traversal is
//! undirected. The matrix view reflects owned arcs only; the list view can
//! additionally mirror every arc into both endpoints, which is what all
//! pathfinding consumes.

use crate::node::{Edge, Node};

/// Selects how arcs are projected into an [`AdjacencyList`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AdjacencyMode {
    /// Each node lists only the children of its own arcs.
    Directed,
    /// Each arc is mirrored into both endpoints' neighbour lists.
    Undirected,
}

/// Presence grid over ordered node pairs built from owned arcs.
///
/// # Examples
/// ```
/// use delve_core::DungeonGraph;
///
/// let mut graph = DungeonGraph::with_node_count(3);
/// graph.connect(0, 2).expect("nodes exist");
/// let matrix = graph.adjacency_matrix();
/// assert!(matrix.contains(0, 2));
/// assert!(!matrix.contains(2, 0));
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdjacencyMatrix {
    size: usize,
    cells: Vec<bool>,
}

impl AdjacencyMatrix {
    pub(crate) fn from_nodes(nodes: &[Node]) -> Self {
        let size = nodes.len();
        let mut cells = vec![false; size * size];
        for edge in nodes.iter().flat_map(Node::edges) {
            if let Some(cell) = cells.get_mut(edge.parent() * size + edge.child()) {
                *cell = true;
            }
        }
        Self { size, cells }
    }

    /// Number of rows (and columns) in the grid.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` when `parent` owns an arc to `child`. Out-of-range
    /// coordinates read as absent.
    #[must_use]
    pub fn contains(&self, parent: usize, child: usize) -> bool {
        if parent >= self.size || child >= self.size {
            return false;
        }
        self.cells
            .get(parent * self.size + child)
            .copied()
            .unwrap_or(false)
    }

    /// Iterates over the rows of the grid.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks(self.size.max(1)).take(self.size)
    }
}

/// Per-node neighbour lists.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdjacencyList {
    mode: AdjacencyMode,
    neighbours: Vec<Vec<usize>>,
}

impl AdjacencyList {
    pub(crate) fn from_nodes(nodes: &[Node], mode: AdjacencyMode) -> Self {
        Self::with_candidate(nodes, mode, None)
    }

    /// Builds the list as if `candidate` were an additional committed arc.
    ///
    /// This is how validators evaluate a proposed edge without touching the
    /// graph's stored arcs.
    pub(crate) fn with_candidate(
        nodes: &[Node],
        mode: AdjacencyMode,
        candidate: Option<Edge>,
    ) -> Self {
        let mut list = Self {
            mode,
            neighbours: vec![Vec::new(); nodes.len()],
        };
        let candidate = candidate.filter(|edge| edge.parent() != edge.child());
        for edge in nodes.iter().flat_map(Node::edges).chain(candidate.iter()) {
            list.insert(*edge);
        }
        list
    }

    fn insert(&mut self, edge: Edge) {
        match self.mode {
            AdjacencyMode::Directed => self.push_unique(edge.parent(), edge.child()),
            AdjacencyMode::Undirected => {
                self.push_unique(edge.parent(), edge.child());
                self.push_unique(edge.child(), edge.parent());
            }
        }
    }

    fn push_unique(&mut self, from: usize, to: usize) {
        if let Some(row) = self.neighbours.get_mut(from) {
            if !row.contains(&to) {
                row.push(to);
            }
        }
    }

    /// Returns the projection used to build this list.
    #[must_use]
    pub const fn mode(&self) -> AdjacencyMode {
        self.mode
    }

    /// Number of nodes covered by the list.
    #[must_use]
    pub fn len(&self) -> usize {
        self.neighbours.len()
    }

    /// Returns `true` when the list covers no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.neighbours.is_empty()
    }

    /// Neighbours of `node` in discovery order; empty for unknown ids.
    #[must_use]
    pub fn neighbours(&self, node: usize) -> &[usize] {
        self.neighbours.get(node).map_or(&[], Vec::as_slice)
    }

    /// Returns `true` when `to` appears in the neighbour list of `from`.
    #[must_use]
    pub fn is_adjacent(&self, from: usize, to: usize) -> bool {
        self.neighbours(from).contains(&to)
    }

    /// Iterates over `(node, neighbours)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[usize])> {
        self.neighbours
            .iter()
            .enumerate()
            .map(|(node, row)| (node, row.as_slice()))
    }

    /// Counts distinct connections. In undirected mode each link appears in
    /// both endpoint rows and is counted once.
    #[must_use]
    pub fn link_count(&self) -> usize {
        let entries: usize = self.neighbours.iter().map(Vec::len).sum();
        match self.mode {
            AdjacencyMode::Directed => entries,
            AdjacencyMode::Undirected => entries / 2,
        }
    }
}
