use rstest::rstest;

use super::*;

fn chain(count: usize) -> DungeonGraph {
    let mut graph = DungeonGraph::with_node_count(count);
    for id in 1..count {
        graph.connect(id - 1, id).expect("connect chain");
    }
    graph
}

#[test]
fn create_node_requires_dense_ids() {
    let mut graph = DungeonGraph::new();
    graph.create_node(0).expect("first id");
    graph.create_node(1).expect("second id");

    let err = graph.create_node(3).expect_err("gap must be rejected");
    assert_eq!(err, TopologyError::NonDenseNodeId { expected: 2, got: 3 });
    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.entrance(), Some(0));
    assert_eq!(graph.goal(), Some(1));
}

#[test]
fn empty_graph_has_no_entrance_or_goal() {
    let graph = DungeonGraph::new();
    assert_eq!(graph.entrance(), None);
    assert_eq!(graph.goal(), None);
    assert!(graph.critical_path().is_empty());
    assert!(!graph.is_complete());
}

#[test]
fn connect_only_grows_the_parent_degree() {
    let mut graph = DungeonGraph::with_node_count(2);
    assert!(graph.connect(0, 1).expect("connect"));

    assert_eq!(graph.node(0).map(Node::degree), Some(1));
    assert_eq!(graph.node(1).map(Node::degree), Some(0));
    assert!(graph.has_arc(0, 1));
    assert!(!graph.has_arc(1, 0));
}

#[test]
fn connect_ignores_self_loops_and_duplicates() {
    let mut graph = DungeonGraph::with_node_count(2);
    assert!(!graph.connect(1, 1).expect("self-loop is not an error"));
    assert!(graph.connect(1, 0).expect("connect"));
    assert!(!graph.connect(1, 0).expect("duplicate is not an error"));
    assert_eq!(graph.arc_count(), 1);
}

#[rstest]
#[case(5, 0)]
#[case(0, 5)]
fn connect_rejects_unknown_ids(#[case] parent: usize, #[case] child: usize) {
    let mut graph = DungeonGraph::with_node_count(2);
    let err = graph.connect(parent, child).expect_err("unknown id");
    assert_eq!(err.code(), crate::TopologyErrorCode::UnknownNode);
}

#[test]
fn disconnect_removes_only_the_matching_arc() {
    let mut graph = DungeonGraph::with_node_count(3);
    graph.connect(0, 1).expect("connect");
    graph.connect(0, 2).expect("connect");
    graph.connect(1, 0).expect("connect");

    assert!(graph.disconnect(0, 1).expect("disconnect"));
    assert!(!graph.disconnect(0, 1).expect("absent arc is a no-op"));

    assert!(!graph.has_arc(0, 1));
    assert!(graph.has_arc(0, 2));
    assert!(graph.has_arc(1, 0));
}

#[test]
fn matrix_is_directed_and_list_can_mirror() {
    let mut graph = DungeonGraph::with_node_count(3);
    graph.connect(2, 0).expect("connect");

    let matrix = graph.adjacency_matrix();
    assert_eq!(matrix.size(), 3);
    assert!(matrix.contains(2, 0));
    assert!(!matrix.contains(0, 2));

    let directed = graph.adjacency_list(AdjacencyMode::Directed);
    assert_eq!(directed.neighbours(2), &[0]);
    assert!(directed.neighbours(0).is_empty());

    let mirrored = graph.adjacency_list(AdjacencyMode::Undirected);
    assert_eq!(mirrored.neighbours(2), &[0]);
    assert_eq!(mirrored.neighbours(0), &[2]);
    assert_eq!(mirrored.link_count(), 1);
}

#[test]
fn reciprocal_arcs_count_as_one_link() {
    let mut graph = DungeonGraph::with_node_count(2);
    graph.connect(0, 1).expect("connect");
    graph.connect(1, 0).expect("connect");

    let mirrored = graph.adjacency_list(AdjacencyMode::Undirected);
    assert_eq!(mirrored.neighbours(0), &[1]);
    assert_eq!(mirrored.link_count(), 1);
    assert_eq!(graph.arc_count(), 2);
}

#[test]
fn critical_path_follows_arcs_in_either_direction() {
    let mut graph = DungeonGraph::with_node_count(4);
    graph.connect(1, 0).expect("connect");
    graph.connect(2, 1).expect("connect");
    graph.connect(3, 2).expect("connect");
    assert_eq!(graph.critical_path(), vec![0, 1, 2, 3]);

    graph.connect(0, 3).expect("shortcut");
    assert_eq!(graph.critical_path(), vec![0, 3]);
}

#[test]
fn critical_path_is_empty_when_goal_is_cut_off() {
    let mut graph = DungeonGraph::with_node_count(3);
    graph.connect(0, 1).expect("connect");
    assert!(graph.critical_path().is_empty());
}

#[test]
fn single_room_is_its_own_critical_path() {
    let graph = DungeonGraph::with_node_count(1);
    assert_eq!(graph.critical_path(), vec![0]);
    assert!(!graph.is_complete(), "the room owns no arc");
}

#[test]
fn completeness_requires_an_own_arc_on_every_node() {
    let mut graph = chain(3);
    assert!(!graph.is_complete(), "goal owns no arc yet");

    graph.connect(2, 1).expect("connect");
    assert!(graph.is_complete());
}

#[test]
fn completeness_requires_reachability_from_entrance() {
    let mut graph = DungeonGraph::with_node_count(4);
    graph.connect(0, 3).expect("connect");
    graph.connect(3, 0).expect("connect");
    graph.connect(1, 2).expect("connect");
    graph.connect(2, 1).expect("connect");

    assert_eq!(graph.critical_path(), vec![0, 3]);
    assert!(!graph.is_complete());
}

#[rstest]
#[case(2, true)]
#[case(4, true)]
#[case(5, false)]
fn planar_bound_tracks_complete_graphs(#[case] count: usize, #[case] expected: bool) {
    let mut graph = DungeonGraph::with_node_count(count);
    for parent in 0..count {
        for child in (parent + 1)..count {
            graph.connect(parent, child).expect("connect");
        }
    }
    // K4 has 6 links against a bound of 6; K5 has 10 against 9.
    assert_eq!(graph.is_planar(), expected);
}

#[test]
fn path_to_reports_unknown_ids() {
    let graph = chain(3);
    let err = graph.path_to(0, 8).expect_err("unknown target");
    assert_eq!(err, TopologyError::UnknownNode { node: 8, node_count: 3 });
}
