//! Delve core library.
//!
//! Synthesises the abstract topology of a dungeon: rooms are nodes, connections
//! are arcs owned by one endpoint, and every node carries structural targets
//! assigned by an external sampler. The crate validates candidate edges against
//! those targets and resolves a complete edge assignment by reducing each
//! node's neighbour-set domain, collapsing it to one hypothesis and committing
//! the result.

mod error;
mod graph;
mod node;
mod path;
mod resolve;
mod validate;

#[cfg(test)]
mod test_utils;

pub use crate::{
    error::{Result, TopologyError, TopologyErrorCode},
    graph::{AdjacencyList, AdjacencyMatrix, AdjacencyMode, DungeonGraph},
    node::{Edge, Node},
    resolve::{Domain, DomainState, Resolver, ResolverParams},
    validate::{CandidateChecker, ConnectOutcome, ConstraintViolation, StructuralConstraint},
};
