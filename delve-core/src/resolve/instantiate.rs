//! Realises singleton domains as committed arcs.

use tracing::{trace, warn};

use crate::{
    error::{Result, TopologyError},
    graph::DungeonGraph,
};

pub(super) fn instantiate(graph: &mut DungeonGraph) -> Result<()> {
    if let Some(node) = graph.nodes().find(|node| !node.domain().is_singleton()) {
        return Err(TopologyError::PrematureInstantiation {
            node: node.id(),
            hypotheses: node.domain().len(),
        });
    }

    let plan: Vec<(usize, Vec<usize>)> = graph
        .nodes()
        .map(|node| {
            let neighbours = node.domain().single().map(<[usize]>::to_vec).unwrap_or_default();
            (node.id(), neighbours)
        })
        .collect();
    for (node, neighbours) in plan {
        for neighbour in neighbours {
            commit_link(graph, node, neighbour)?;
        }
    }

    for node in graph.nodes() {
        let target = node
            .max_neighbours()
            .ok_or(TopologyError::MissingMaxNeighbours { node: node.id() })?;
        if node.degree() != target {
            warn!(
                node = node.id(),
                degree = node.degree(),
                target,
                "instantiation cannot realise the degree target"
            );
            return Err(TopologyError::UnsatisfiableSample {
                node: node.id(),
                degree: node.degree(),
                target,
            });
        }
    }
    Ok(())
}

/// Stores whichever of `node -> neighbour` and `neighbour -> node` is missing,
/// provided every endpoint gaining an arc is still under its cap. Returns
/// `false` when nothing was stored.
fn commit_link(graph: &mut DungeonGraph, node: usize, neighbour: usize) -> Result<bool> {
    if node == neighbour {
        return Ok(false);
    }
    let forward = !graph.has_arc(node, neighbour);
    let backward = !graph.has_arc(neighbour, node);
    if !forward && !backward {
        return Ok(false);
    }
    if forward && !graph.valid_neighbours_post_inc(node)? {
        return Ok(false);
    }
    if backward && !graph.valid_neighbours_post_inc(neighbour)? {
        return Ok(false);
    }
    if forward {
        graph.connect(node, neighbour)?;
    }
    if backward {
        graph.connect(neighbour, node)?;
    }
    trace!(node, neighbour, "committed link");
    Ok(true)
}
