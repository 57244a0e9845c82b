//! End-to-end resolution of sampled room targets.

mod common;

use common::{SIX_ROOM_DEGREES, chain, sampled_graph, six_room_layout};
use delve_core::{
    ConnectOutcome, ConstraintViolation, DomainState, DungeonGraph, Resolver, ResolverParams,
    TopologyError,
};
use rstest::rstest;

fn seeded(seed: u64) -> Resolver {
    Resolver::new(ResolverParams::default().with_rng_seed(seed))
}

fn degrees(graph: &DungeonGraph) -> Vec<usize> {
    graph.nodes().map(|node| node.degree()).collect()
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(42)]
#[case(999)]
#[case(0xDEAD_BEEF)]
fn six_room_layout_resolves_to_its_degree_targets(#[case] seed: u64) {
    let mut graph = six_room_layout();
    assert_eq!(graph.critical_path(), vec![0, 1, 5]);

    seeded(seed).resolve(&mut graph).expect("layout is satisfiable");

    assert_eq!(degrees(&graph), SIX_ROOM_DEGREES);
    assert_eq!(graph.critical_path(), vec![0, 1, 5]);
    assert!(graph.all_instantiated());
    assert!(graph.is_complete());
    assert!(graph.is_planar());
    for branch in 2..=4 {
        assert!(
            graph.has_arc(branch, 1) || graph.has_arc(branch, 5),
            "room {branch} must hang off the critical path"
        );
    }
}

#[test]
fn same_seed_yields_same_layout() {
    let mut first = six_room_layout();
    let mut second = six_room_layout();

    seeded(7).resolve(&mut first).expect("resolve");
    seeded(7).resolve(&mut second).expect("resolve");

    assert_eq!(first.adjacency_matrix(), second.adjacency_matrix());
}

#[test]
fn phases_move_domains_through_their_states() {
    let mut graph = six_room_layout();
    let resolver = seeded(3);
    assert!(graph.nodes().all(|node| node.domain().state() == DomainState::Unreduced));

    resolver.reduce(&mut graph).expect("reduce");
    // Room 0 already owns its only permitted arc.
    assert_eq!(graph.node(0).map(|node| node.domain().state()), Some(DomainState::Singleton));
    assert_eq!(graph.node(1).map(|node| node.domain().state()), Some(DomainState::Open));
    assert!(!graph.all_instantiated());

    let err = resolver.instantiate(&mut graph).expect_err("domains still open");
    assert!(matches!(err, TopologyError::PrematureInstantiation { .. }));
    assert_eq!(graph.arc_count(), 2, "premature instantiation commits nothing");

    resolver.collapse(&mut graph).expect("collapse");
    assert!(graph.all_instantiated());

    resolver.instantiate(&mut graph).expect("instantiate");
    assert_eq!(degrees(&graph), SIX_ROOM_DEGREES);
}

#[test]
fn odd_degree_sum_requires_a_new_sample() {
    let mut graph = sampled_graph(&[(0, 0, 1), (0, 1, 2), (0, 2, 2), (1, 2, 2)]);
    graph.connect(0, 1).expect("connect");

    let err = seeded(5).resolve(&mut graph).expect_err("odd degree sum");

    assert_eq!(err, TopologyError::NoConsistentAssignment);
    assert!(err.requires_resample());
}

#[test]
fn resolution_requires_every_degree_target() {
    let mut graph = chain(3);
    graph.set_max_neighbours(0, 1).expect("node 0");
    graph.set_max_neighbours(2, 1).expect("node 2");

    let err = Resolver::default().resolve(&mut graph).expect_err("node 1 lacks a target");

    assert_eq!(err, TopologyError::MissingMaxNeighbours { node: 1 });
    assert!(!err.requires_resample());
}

#[test]
fn oversized_domains_are_refused_before_enumeration() {
    let resolver = Resolver::new(ResolverParams::new(100, 1_000).expect("valid params"));
    let mut graph = DungeonGraph::with_node_count(20);
    for id in 0..20 {
        graph.set_max_neighbours(id, 3).expect("node exists");
    }

    let err = resolver.reduce(&mut graph).expect_err("C(19, 3) = 969");

    assert_eq!(
        err,
        TopologyError::DomainTooLarge {
            node: 0,
            hypotheses: 969,
            limit: 100,
        }
    );
}

#[rstest]
#[case(0, 1)]
#[case(1, 0)]
fn resolver_parameters_reject_zero_caps(#[case] hypotheses: usize, #[case] steps: usize) {
    let err = ResolverParams::new(hypotheses, steps).expect_err("zero cap");
    assert!(matches!(err, TopologyError::InvalidParameters { .. }));
}

#[test]
fn checked_connects_guard_the_critical_path() {
    let mut graph = six_room_layout();

    let shortcut = graph.connect_checked(0, 5).expect("ids valid");
    assert_eq!(
        shortcut,
        ConnectOutcome::Rejected(ConstraintViolation::NeighbourCapacity {
            node: 0,
            degree: 1,
            limit: 1,
        })
    );

    let shortcut = graph.connect_checked(5, 0).expect("ids valid");
    assert_eq!(
        shortcut,
        ConnectOutcome::Rejected(ConstraintViolation::CriticalPathLength { before: 3, after: 2 })
    );
    assert_eq!(graph.critical_path(), vec![0, 1, 5]);
}
