//! Breadth-first reachability over the mirrored adjacency.
use std::collections::VecDeque;

use super::adjacency::AdjacencyList;

/// Marks every node reachable from `origin`.
///
/// Returns a vector indexed by node id; `origin` itself is always marked when
/// it exists.
pub(crate) fn reachable_from(adjacency: &AdjacencyList, origin: usize) -> Vec<bool> {
    let mut context = BfsContext::new(adjacency.len());
    if origin >= adjacency.len() {
        return context.visited;
    }
    context.visit(origin);
    while let Some(node) = context.queue.pop_front() {
        for &target in adjacency.neighbours(node) {
            if !context.is_visited(target) {
                context.visit(target);
            }
        }
    }
    context.visited
}

struct BfsContext {
    visited: Vec<bool>,
    queue: VecDeque<usize>,
}

impl BfsContext {
    fn new(capacity: usize) -> Self {
        Self {
            visited: vec![false; capacity],
            queue: VecDeque::new(),
        }
    }

    fn is_visited(&self, node: usize) -> bool {
        self.visited.get(node).copied().unwrap_or(true)
    }

    fn visit(&mut self, node: usize) {
        if let Some(slot) = self.visited.get_mut(node) {
            *slot = true;
            self.queue.push_back(node);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{AdjacencyMode, DungeonGraph};

    #[test]
    fn marks_nodes_reached_through_mirrored_arcs() {
        let mut graph = DungeonGraph::with_node_count(4);
        graph.connect(1, 0).expect("connect");
        graph.connect(1, 2).expect("connect");
        let list = graph.adjacency_list(AdjacencyMode::Undirected);

        let visited = reachable_from(&list, 0);

        assert_eq!(visited, vec![true, true, true, false]);
    }

    #[test]
    fn directed_projection_does_not_walk_backwards() {
        let mut graph = DungeonGraph::with_node_count(3);
        graph.connect(1, 0).expect("connect");
        let list = graph.adjacency_list(AdjacencyMode::Directed);

        let visited = reachable_from(&list, 0);

        assert_eq!(visited, vec![true, false, false]);
    }

    #[test]
    fn unknown_origin_reaches_nothing() {
        let graph = DungeonGraph::with_node_count(2);
        let list = graph.adjacency_list(AdjacencyMode::Undirected);

        assert_eq!(reachable_from(&list, 9), vec![false, false]);
    }
}
