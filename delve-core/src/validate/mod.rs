//! Structural validators for candidate edges.
//!
//! Every check evaluates the graph as it would look with the candidate arc
//! committed, using an adjacency view built from the stored arcs plus the
//! candidate. The stored arcs are never touched, so the validators borrow the
//! graph immutably and can run while other readers hold it.
//!
//! The boolean helpers on [`DungeonGraph`] answer one question each. The
//! [`CandidateChecker`] runs several constraints at once, either stopping at
//! the first violation or collecting all of them.

mod checks;


use thiserror::Error;

use crate::{
    error::{Result, TopologyError},
    graph::{AdjacencyList, DungeonGraph},
};

use self::checks::{check_cp_distance, check_cp_length, check_depth, check_planar_bound};

/// Enumerates the graph-level constraints a candidate edge is checked against.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum StructuralConstraint {
    /// The critical path keeps its node count.
    CriticalPathLength,
    /// The link count stays within the planar bound.
    PlanarBound,
    /// Both endpoints sit at their target distance from the critical path.
    CriticalPathDistance,
    /// Both endpoints sit at the parent's distance from the entrance.
    Depth,
}

impl StructuralConstraint {
    /// Returns all constraints in evaluation order.
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [
            Self::CriticalPathLength,
            Self::PlanarBound,
            Self::CriticalPathDistance,
            Self::Depth,
        ]
    }
}

/// Reports why a candidate edge was rejected.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ConstraintViolation {
    /// The candidate would change the critical path's node count.
    #[error("critical path would change from {before} to {after} node(s)")]
    CriticalPathLength {
        /// Node count before the candidate.
        before: usize,
        /// Node count with the candidate committed.
        after: usize,
    },
    /// The candidate would break the planar bound.
    #[error("{links} link(s) over {nodes} node(s) exceeds the planar bound")]
    PlanarBound {
        /// Links with the candidate committed.
        links: usize,
        /// Node count of the graph.
        nodes: usize,
    },
    /// An endpoint would sit at the wrong distance from the critical path.
    #[error("node {node} targets critical-path distance {target} but would sit at {actual:?}")]
    CriticalPathDistance {
        /// Endpoint that missed its target.
        node: usize,
        /// Configured target.
        target: usize,
        /// Distance with the candidate committed; `None` when no
        /// critical-path node is reachable.
        actual: Option<usize>,
    },
    /// An endpoint's depth target disagrees with the measured depth.
    #[error("node {node} targets depth {target} but the measured depth is {actual:?}")]
    Depth {
        /// Endpoint that missed its target.
        node: usize,
        /// Configured target.
        target: usize,
        /// Measured depth with the candidate committed.
        actual: Option<usize>,
    },
    /// The parent already owns as many arcs as its target allows.
    #[error("node {node} owns {degree} arc(s) and is capped at {limit}")]
    NeighbourCapacity {
        /// Node at capacity.
        node: usize,
        /// Current own-arc count.
        degree: usize,
        /// Configured `MaxNeighbours`.
        limit: usize,
    },
}

/// Outcome of [`DungeonGraph::connect_checked`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ConnectOutcome {
    /// The arc passed every check and was stored.
    Committed,
    /// The arc was already present or was a self-connection.
    Unchanged,
    /// The arc failed a check and was not stored.
    Rejected(ConstraintViolation),
}

/// Runs structural constraints against one candidate edge.
///
/// Obtained from [`DungeonGraph::candidate`].
#[derive(Debug)]
pub struct CandidateChecker<'graph> {
    graph: &'graph DungeonGraph,
    parent: usize,
    child: usize,
}

impl CandidateChecker<'_> {
    /// Runs every constraint, returning the first violation.
    ///
    /// # Errors
    /// Returns the first [`ConstraintViolation`] encountered.
    pub fn check_all(&self) -> core::result::Result<(), ConstraintViolation> {
        self.check_many(StructuralConstraint::all())
    }

    /// Runs the given constraints in order, returning the first violation.
    ///
    /// # Errors
    /// Returns the first [`ConstraintViolation`] encountered.
    pub fn check_many(
        &self,
        constraints: impl IntoIterator<Item = StructuralConstraint>,
    ) -> core::result::Result<(), ConstraintViolation> {
        self.run_with_mode(constraints, &mut EvaluationMode::FailFast)
    }

    /// Runs a single constraint.
    ///
    /// # Errors
    /// Returns the [`ConstraintViolation`] when the constraint fails.
    pub fn check(&self, constraint: StructuralConstraint) -> core::result::Result<(), ConstraintViolation> {
        self.check_many([constraint])
    }

    /// Runs every constraint and returns all violations.
    #[must_use]
    pub fn collect_all(&self) -> Vec<ConstraintViolation> {
        self.collect_many(StructuralConstraint::all())
    }

    /// Runs the given constraints and returns all violations.
    #[must_use]
    pub fn collect_many(
        &self,
        constraints: impl IntoIterator<Item = StructuralConstraint>,
    ) -> Vec<ConstraintViolation> {
        let mut violations = Vec::new();
        // Collect mode records instead of failing, so the result is always Ok.
        let _ = self.run_with_mode(constraints, &mut EvaluationMode::Collect(&mut violations));
        violations
    }

    fn run_with_mode(
        &self,
        constraints: impl IntoIterator<Item = StructuralConstraint>,
        mode: &mut EvaluationMode<'_>,
    ) -> core::result::Result<(), ConstraintViolation> {
        let mut ctx = CandidateContext {
            graph: self.graph,
            before: None,
            after: self.graph.view_with(self.parent, self.child),
            parent: self.parent,
            child: self.child,
        };
        for constraint in constraints {
            dispatch(&mut ctx, constraint, mode)?;
        }
        Ok(())
    }
}

fn dispatch(
    ctx: &mut CandidateContext<'_>,
    constraint: StructuralConstraint,
    mode: &mut EvaluationMode<'_>,
) -> core::result::Result<(), ConstraintViolation> {
    match constraint {
        StructuralConstraint::CriticalPathLength => check_cp_length(ctx, mode),
        StructuralConstraint::PlanarBound => check_planar_bound(ctx, mode),
        StructuralConstraint::CriticalPathDistance => check_cp_distance(ctx, mode),
        StructuralConstraint::Depth => check_depth(ctx, mode),
    }
}

/// Graph state shared by the individual checks.
pub(super) struct CandidateContext<'a> {
    graph: &'a DungeonGraph,
    before: Option<AdjacencyList>,
    after: AdjacencyList,
    parent: usize,
    child: usize,
}

impl CandidateContext<'_> {
    /// Mirrored adjacency without the candidate, built on first use.
    fn before(&mut self) -> &AdjacencyList {
        let graph = self.graph;
        self.before.get_or_insert_with(|| {
            graph.adjacency_list(crate::graph::AdjacencyMode::Undirected)
        })
    }
}

pub(super) enum EvaluationMode<'a> {
    FailFast,
    Collect(&'a mut Vec<ConstraintViolation>),
}

impl EvaluationMode<'_> {
    fn record(&mut self, violation: ConstraintViolation) -> core::result::Result<(), ConstraintViolation> {
        match self {
            Self::FailFast => Err(violation),
            Self::Collect(sink) => {
                sink.push(violation);
                Ok(())
            }
        }
    }
}

impl DungeonGraph {
    /// Prepares a checker for the candidate arc `parent -> child`.
    ///
    /// # Errors
    /// Returns [`TopologyError::UnknownNode`] when either id does not exist.
    ///
    /// # Examples
    /// ```
    /// use delve_core::{DungeonGraph, StructuralConstraint};
    ///
    /// let mut graph = DungeonGraph::with_node_count(4);
    /// graph.connect(0, 1).expect("connect");
    /// graph.connect(1, 2).expect("connect");
    /// graph.connect(2, 3).expect("connect");
    ///
    /// let checker = graph.candidate(0, 3).expect("ids valid");
    /// assert!(checker.check(StructuralConstraint::CriticalPathLength).is_err());
    /// assert!(checker.check(StructuralConstraint::PlanarBound).is_ok());
    /// ```
    pub fn candidate(&self, parent: usize, child: usize) -> Result<CandidateChecker<'_>> {
        self.require(parent)?;
        self.require(child)?;
        Ok(CandidateChecker {
            graph: self,
            parent,
            child,
        })
    }

    /// Adding the edge must not change the critical path's node count.
    ///
    /// # Errors
    /// Returns [`TopologyError::UnknownNode`] when either id does not exist.
    pub fn valid_cp_length(&self, parent: usize, child: usize) -> Result<bool> {
        self.passes(parent, child, StructuralConstraint::CriticalPathLength)
    }

    /// The planar bound must still hold with the edge added.
    ///
    /// # Errors
    /// Returns [`TopologyError::UnknownNode`] when either id does not exist.
    pub fn valid_planar_graph(&self, parent: usize, child: usize) -> Result<bool> {
        self.passes(parent, child, StructuralConstraint::PlanarBound)
    }

    /// Each endpoint's critical-path distance target must match the hop count
    /// to its closest critical-path node once the edge is added. Endpoints
    /// without a target are unconstrained.
    ///
    /// # Errors
    /// Returns [`TopologyError::UnknownNode`] when either id does not exist.
    pub fn valid_cp_distance(&self, parent: usize, child: usize) -> Result<bool> {
        self.passes(parent, child, StructuralConstraint::CriticalPathDistance)
    }

    /// The parent's depth target must match its distance from the entrance
    /// once the edge is added, and the child's depth target must match that
    /// same parent distance.
    ///
    /// The child is compared against the parent's distance, not its own.
    /// Callers that need the child's own depth checked can validate the
    /// reversed candidate as well.
    ///
    /// # Errors
    /// Returns [`TopologyError::UnknownNode`] when either id does not exist.
    pub fn valid_depth(&self, parent: usize, child: usize) -> Result<bool> {
        self.passes(parent, child, StructuralConstraint::Depth)
    }

    /// Returns `true` while `node` owns fewer arcs than its `MaxNeighbours`.
    ///
    /// Callers that have already stored the arc under test use this to ask
    /// whether the node is still under its cap after the increment; callers
    /// that have not yet stored it get "room for one more".
    ///
    /// # Errors
    /// Returns [`TopologyError::UnknownNode`] for a bad id and
    /// [`TopologyError::MissingMaxNeighbours`] when the node has no target.
    pub fn valid_neighbours_post_inc(&self, node: usize) -> Result<bool> {
        let entry = self.require(node)?;
        let limit = entry
            .max_neighbours()
            .ok_or(TopologyError::MissingMaxNeighbours { node })?;
        Ok(entry.degree() < limit)
    }

    /// Stores `parent -> child` only when the parent has room and every
    /// structural constraint passes.
    ///
    /// # Errors
    /// Returns [`TopologyError::UnknownNode`] for a bad id and
    /// [`TopologyError::MissingMaxNeighbours`] when the parent has no target.
    pub fn connect_checked(&mut self, parent: usize, child: usize) -> Result<ConnectOutcome> {
        let checker = self.candidate(parent, child)?;
        if parent == child || self.has_arc(parent, child) {
            return Ok(ConnectOutcome::Unchanged);
        }
        if !self.valid_neighbours_post_inc(parent)? {
            let entry = self.require(parent)?;
            return Ok(ConnectOutcome::Rejected(ConstraintViolation::NeighbourCapacity {
                node: parent,
                degree: entry.degree(),
                limit: entry.max_neighbours().unwrap_or_default(),
            }));
        }
        if let Err(violation) = checker.check_all() {
            return Ok(ConnectOutcome::Rejected(violation));
        }
        self.connect(parent, child)?;
        Ok(ConnectOutcome::Committed)
    }

    fn passes(&self, parent: usize, child: usize, constraint: StructuralConstraint) -> Result<bool> {
        Ok(self.candidate(parent, child)?.check(constraint).is_ok())
    }
}
