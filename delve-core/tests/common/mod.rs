//! Shared fixtures for `delve-core` integration tests.
#![allow(dead_code, reason = "not every test binary uses every fixture")]

use delve_core::DungeonGraph;

/// Targets for one room as `(cp_distance, depth, max_neighbours)`.
pub type RoomTargets = (usize, usize, usize);

/// Targets of the six-room reference layout; the critical path is
/// `[0, 1, 5]`.
pub const SIX_ROOMS: [RoomTargets; 6] = [
    (0, 0, 1),
    (0, 1, 4),
    (2, 3, 1),
    (1, 2, 1),
    (1, 2, 1),
    (0, 2, 2),
];

/// `max_neighbours` column of [`SIX_ROOMS`].
///
/// Room 5 ends with two arcs: the critical-path link to room 1 and one
/// branch. Each of rooms 2, 3 and 4 hangs off either room 1 or room 5.
pub const SIX_ROOM_DEGREES: [usize; 6] = [1, 4, 1, 1, 1, 2];

/// Builds a graph with every target assigned, as the external sampler would.
pub fn sampled_graph(rooms: &[RoomTargets]) -> DungeonGraph {
    let mut graph = DungeonGraph::new();
    for (id, &(cp_distance, depth, max_neighbours)) in rooms.iter().enumerate() {
        graph.create_node(id).expect("dense id");
        graph.set_cp_distance(id, Some(cp_distance)).expect("node exists");
        graph.set_depth(id, Some(depth)).expect("node exists");
        graph.set_max_neighbours(id, max_neighbours).expect("node exists");
    }
    graph
}

/// The reference layout with its critical path already laid down.
pub fn six_room_layout() -> DungeonGraph {
    let mut graph = sampled_graph(&SIX_ROOMS);
    graph.connect(0, 1).expect("connect");
    graph.connect(1, 5).expect("connect");
    graph
}

/// Graph with `count` rooms chained `0 -> 1 -> ... -> count - 1`.
pub fn chain(count: usize) -> DungeonGraph {
    let mut graph = DungeonGraph::with_node_count(count);
    for id in 1..count {
        graph.connect(id - 1, id).expect("connect chain");
    }
    graph
}
