//! Unit-weight shortest paths over the mirrored adjacency.
//!
//! Implements Dijkstra with a binary heap keyed by hop count. Entries with
//! equal hop counts are served in discovery order so results are stable for
//! a given arc insertion order; the tie-break is deterministic but makes no
//! attempt to be fair across alternative shortest paths.

use std::{cmp::Reverse, collections::BinaryHeap};

use crate::graph::AdjacencyList;

#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
struct Frontier {
    hops: usize,
    sequence: u64,
    node: usize,
}

/// Returns the node ids from `source` to `target` inclusive, or an empty
/// vector when `target` cannot be reached.
///
/// `shortest_path(list, a, a)` is `[a]` for every node `a` the list covers.
pub(crate) fn shortest_path(adjacency: &AdjacencyList, source: usize, target: usize) -> Vec<usize> {
    let node_count = adjacency.len();
    if source >= node_count || target >= node_count {
        return Vec::new();
    }

    let mut best = vec![usize::MAX; node_count];
    let mut previous: Vec<Option<usize>> = vec![None; node_count];
    let mut frontier = BinaryHeap::new();
    let mut sequence = 0_u64;

    set(&mut best, source, 0);
    frontier.push(Reverse(Frontier {
        hops: 0,
        sequence,
        node: source,
    }));

    while let Some(Reverse(Frontier { hops, node, .. })) = frontier.pop() {
        if node == target {
            break;
        }
        if hops > hops_to(&best, node) {
            continue;
        }
        let next_hops = hops + 1;
        for &neighbour in adjacency.neighbours(node) {
            if next_hops < hops_to(&best, neighbour) {
                set(&mut best, neighbour, next_hops);
                if let Some(slot) = previous.get_mut(neighbour) {
                    *slot = Some(node);
                }
                sequence += 1;
                frontier.push(Reverse(Frontier {
                    hops: next_hops,
                    sequence,
                    node: neighbour,
                }));
            }
        }
    }

    if hops_to(&best, target) == usize::MAX {
        return Vec::new();
    }
    reconstruct(&previous, source, target)
}

/// Hop count between two nodes, or `None` when they are disconnected.
pub(crate) fn hop_distance(adjacency: &AdjacencyList, source: usize, target: usize) -> Option<usize> {
    shortest_path(adjacency, source, target)
        .len()
        .checked_sub(1)
}

fn reconstruct(previous: &[Option<usize>], source: usize, target: usize) -> Vec<usize> {
    let mut path = vec![target];
    let mut cursor = target;
    while cursor != source {
        match previous.get(cursor).copied().flatten() {
            Some(step) => {
                path.push(step);
                cursor = step;
            }
            None => return Vec::new(),
        }
    }
    path.reverse();
    path
}

fn hops_to(best: &[usize], node: usize) -> usize {
    best.get(node).copied().unwrap_or(usize::MAX)
}

fn set(best: &mut [usize], node: usize, hops: usize) {
    if let Some(slot) = best.get_mut(node) {
        *slot = hops;
    }
}
