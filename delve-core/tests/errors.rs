use delve_core::{TopologyError, TopologyErrorCode};
use rstest::rstest;

#[rstest]
#[case(
    TopologyError::UnknownNode { node: 9, node_count: 3 },
    TopologyErrorCode::UnknownNode,
    "TOPOLOGY_UNKNOWN_NODE",
)]
#[case(
    TopologyError::NonDenseNodeId { expected: 2, got: 4 },
    TopologyErrorCode::NonDenseNodeId,
    "TOPOLOGY_NON_DENSE_NODE_ID",
)]
#[case(
    TopologyError::MissingMaxNeighbours { node: 1 },
    TopologyErrorCode::MissingMaxNeighbours,
    "TOPOLOGY_MISSING_MAX_NEIGHBOURS",
)]
#[case(
    TopologyError::DomainTooLarge { node: 0, hypotheses: 969, limit: 100 },
    TopologyErrorCode::DomainTooLarge,
    "TOPOLOGY_DOMAIN_TOO_LARGE",
)]
#[case(
    TopologyError::PrematureInstantiation { node: 1, hypotheses: 4 },
    TopologyErrorCode::PrematureInstantiation,
    "TOPOLOGY_PREMATURE_INSTANTIATION",
)]
#[case(
    TopologyError::UnsatisfiableSample { node: 5, degree: 1, target: 2 },
    TopologyErrorCode::UnsatisfiableSample,
    "TOPOLOGY_UNSATISFIABLE_SAMPLE",
)]
#[case(
    TopologyError::NoConsistentAssignment,
    TopologyErrorCode::NoConsistentAssignment,
    "TOPOLOGY_NO_CONSISTENT_ASSIGNMENT",
)]
#[case(
    TopologyError::SearchBudgetExhausted { steps: 10 },
    TopologyErrorCode::SearchBudgetExhausted,
    "TOPOLOGY_SEARCH_BUDGET_EXHAUSTED",
)]
#[case(
    TopologyError::InvalidParameters { reason: "zero".into() },
    TopologyErrorCode::InvalidParameters,
    "TOPOLOGY_INVALID_PARAMETERS",
)]
fn returns_expected_topology_code(
    #[case] error: TopologyError,
    #[case] expected: TopologyErrorCode,
    #[case] code: &str,
) {
    assert_eq!(error.code(), expected);
    assert_eq!(error.code().as_str(), code);
    assert_eq!(expected.to_string(), code);
}

#[rstest]
#[case(TopologyError::UnsatisfiableSample { node: 0, degree: 0, target: 1 }, true)]
#[case(TopologyError::NoConsistentAssignment, true)]
#[case(TopologyError::SearchBudgetExhausted { steps: 1 }, true)]
#[case(TopologyError::PrematureInstantiation { node: 0, hypotheses: 2 }, false)]
#[case(TopologyError::MissingMaxNeighbours { node: 0 }, false)]
fn flags_failures_that_need_a_new_sample(#[case] error: TopologyError, #[case] expected: bool) {
    assert_eq!(error.requires_resample(), expected);
}

#[test]
fn messages_name_the_offending_node() {
    let error = TopologyError::UnsatisfiableSample {
        node: 5,
        degree: 1,
        target: 2,
    };
    assert_eq!(
        error.to_string(),
        "node 5 ended with 1 edge(s) but targets 2; sample is unsatisfiable"
    );
}
