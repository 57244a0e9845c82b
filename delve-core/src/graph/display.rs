//! Diagnostic text dump of the graph.
//!
//! Renders the critical path, the owned-arc matrix and the mirrored neighbour
//! lists. The format is for humans and carries no stability guarantee.

use std::fmt;

use super::{AdjacencyMode, DungeonGraph};

impl fmt::Display for DungeonGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "critical path: {:?}", self.critical_path())?;

        writeln!(f, "adjacency matrix:")?;
        for row in self.adjacency_matrix().rows() {
            let cells: Vec<&str> = row
                .iter()
                .map(|present| if *present { "1" } else { "." })
                .collect();
            writeln!(f, "  {}", cells.join(" "))?;
        }

        writeln!(f, "adjacency list:")?;
        for (node, neighbours) in self.adjacency_list(AdjacencyMode::Undirected).iter() {
            writeln!(f, "  {node}: {neighbours:?}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_all_three_sections() {
        let mut graph = DungeonGraph::with_node_count(3);
        graph.connect(0, 1).expect("connect");
        graph.connect(2, 1).expect("connect");

        let text = graph.to_string();

        assert_eq!(
            text,
            "critical path: [0, 1, 2]\n\
             adjacency matrix:\n  . 1 .\n  . . .\n  . 1 .\n\
             adjacency list:\n  0: [1]\n  1: [0, 2]\n  2: [1]\n"
        );
    }
}
