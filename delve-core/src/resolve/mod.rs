//! Constraint-satisfaction resolution over neighbour-set hypotheses.
//!
//! Resolution runs in three phases, each exposed on [`Resolver`]:
//!
//! 1. [`Resolver::reduce`] fills every node's domain with the
//!    `MaxNeighbours`-sized neighbour sets that cover its existing own arcs.
//! 2. [`Resolver::collapse`] searches for one hypothesis per node such that
//!    neighbourship is mutual, and narrows each domain to it.
//! 3. [`Resolver::instantiate`] commits the singleton hypotheses as arcs and
//!    checks every node ends on its degree target.
//!
//! Failures in the last two phases mean the sampled targets cannot be
//! realised; see [`TopologyError::requires_resample`].

mod collapse;
mod domain;
mod instantiate;
mod params;


pub use self::{
    domain::{Domain, DomainState},
    params::ResolverParams,
};

use tracing::{debug, instrument};

use crate::{
    error::{Result, TopologyError},
    graph::DungeonGraph,
};

use self::{collapse::choose_hypotheses, domain::binomial};

/// Drives domain reduction, collapse and instantiation.
///
/// # Examples
/// ```
/// use delve_core::{DungeonGraph, Resolver, ResolverParams};
///
/// let mut graph = DungeonGraph::with_node_count(2);
/// graph.set_max_neighbours(0, 1).expect("node 0");
/// graph.set_max_neighbours(1, 1).expect("node 1");
///
/// let resolver = Resolver::new(ResolverParams::default().with_rng_seed(7));
/// resolver.resolve(&mut graph).expect("sample is satisfiable");
/// assert_eq!(graph.critical_path(), vec![0, 1]);
/// assert!(graph.is_complete());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Resolver {
    params: ResolverParams,
}

impl Resolver {
    /// Creates a resolver with the given limits.
    #[must_use]
    pub fn new(params: ResolverParams) -> Self {
        Self { params }
    }

    /// Returns the limits in use.
    #[must_use]
    pub fn params(&self) -> &ResolverParams {
        &self.params
    }

    /// Populates every node's domain.
    ///
    /// An unreduced node receives every `MaxNeighbours`-sized set of other
    /// node ids, in lexicographic order. In either case only hypotheses that
    /// contain all children of the node's own arcs survive. A domain that was
    /// already reduced is filtered again rather than rebuilt, so it can only
    /// shrink. No domain is touched unless every node succeeds.
    ///
    /// # Errors
    /// Returns [`TopologyError::MissingMaxNeighbours`] when a node has no
    /// target and [`TopologyError::DomainTooLarge`] when enumeration would
    /// exceed `max_hypotheses_per_node`.
    #[instrument(
        name = "resolve.reduce",
        err,
        skip(self, graph),
        fields(nodes = graph.node_count(), limit = self.params.max_hypotheses_per_node()),
    )]
    pub fn reduce(&self, graph: &mut DungeonGraph) -> Result<()> {
        let node_count = graph.node_count();
        let limit = self.params.max_hypotheses_per_node();
        let mut domains = Vec::with_capacity(node_count);
        for node in graph.nodes() {
            let id = node.id();
            let width = node
                .max_neighbours()
                .ok_or(TopologyError::MissingMaxNeighbours { node: id })?;
            let committed: Vec<usize> = node.children().collect();
            let covers = |hypothesis: &[usize]| {
                committed
                    .iter()
                    .all(|child| hypothesis.binary_search(child).is_ok())
            };

            let domain = if node.domain().is_reduced() {
                let mut domain = node.domain().clone();
                domain.retain(covers);
                domain
            } else {
                let hypotheses = binomial(node_count.saturating_sub(1), width);
                if hypotheses > limit as u128 {
                    return Err(TopologyError::DomainTooLarge {
                        node: id,
                        hypotheses,
                        limit,
                    });
                }
                let pool: Vec<usize> = (0..node_count).filter(|&other| other != id).collect();
                Domain::enumerate(&pool, width, covers)
            };
            domains.push(domain);
        }

        let total: usize = domains.iter().map(Domain::len).sum();
        for (id, domain) in domains.into_iter().enumerate() {
            *graph.node_mut(id)?.domain_mut() = domain;
        }
        debug!(hypotheses = total, "domains reduced");
        Ok(())
    }

    /// Narrows every domain to a single hypothesis.
    ///
    /// Hypotheses are tried in an order shuffled by the configured seed, so
    /// the same graph and seed always collapse the same way. Domains are left
    /// untouched on failure.
    ///
    /// # Errors
    /// Returns [`TopologyError::NoConsistentAssignment`] when no mutual
    /// assignment exists (including when a domain was never reduced) and
    /// [`TopologyError::SearchBudgetExhausted`] when the search runs past
    /// `max_search_steps`.
    #[instrument(
        name = "resolve.collapse",
        err,
        skip(self, graph),
        fields(nodes = graph.node_count(), seed = self.params.rng_seed()),
    )]
    pub fn collapse(&self, graph: &mut DungeonGraph) -> Result<()> {
        let chosen = choose_hypotheses(graph, &self.params)?;
        for (id, index) in chosen.into_iter().enumerate() {
            graph.node_mut(id)?.domain_mut().narrow_to(index);
        }
        Ok(())
    }

    /// Commits each node's singleton hypothesis as arcs.
    ///
    /// Every listed neighbour becomes a link: the arcs in both directions,
    /// each stored only if missing. A link is skipped when an endpoint that
    /// would gain an arc is already at its `MaxNeighbours`. Once every node
    /// has been processed each node's own arc count must equal its target.
    ///
    /// # Errors
    /// Returns [`TopologyError::PrematureInstantiation`] when any domain is
    /// not a singleton, and [`TopologyError::UnsatisfiableSample`] when a
    /// node misses its degree target. Arcs committed before the mismatch was
    /// found are kept.
    #[instrument(
        name = "resolve.instantiate",
        err,
        skip(self, graph),
        fields(nodes = graph.node_count()),
    )]
    pub fn instantiate(&self, graph: &mut DungeonGraph) -> Result<()> {
        instantiate::instantiate(graph)
    }

    /// Runs [`reduce`](Self::reduce), [`collapse`](Self::collapse) and
    /// [`instantiate`](Self::instantiate) in order.
    ///
    /// # Errors
    /// Propagates the first failing phase's error.
    pub fn resolve(&self, graph: &mut DungeonGraph) -> Result<()> {
        self.reduce(graph)?;
        self.collapse(graph)?;
        self.instantiate(graph)
    }
}

impl DungeonGraph {
    /// Returns `true` when every node's domain holds exactly one hypothesis.
    #[must_use]
    pub fn all_instantiated(&self) -> bool {
        self.nodes().all(|node| node.domain().is_singleton())
    }
}
