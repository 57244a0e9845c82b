//! Parameter handling for the resolver.

use crate::error::TopologyError;

const DEFAULT_MAX_HYPOTHESES: usize = 65_536;
const DEFAULT_MAX_SEARCH_STEPS: usize = 1_000_000;
const DEFAULT_RNG_SEED: u64 = 0xD1CE_5EED;

/// Limits and seed used by [`Resolver`](super::Resolver).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResolverParams {
    max_hypotheses_per_node: usize,
    max_search_steps: usize,
    rng_seed: u64,
}

impl ResolverParams {
    /// Creates a parameter set with explicit enumeration and search caps.
    ///
    /// # Errors
    /// Returns [`TopologyError::InvalidParameters`] when either cap is zero.
    ///
    /// # Examples
    /// ```
    /// use delve_core::ResolverParams;
    /// let params = ResolverParams::new(1_024, 10_000).expect("parameters must be valid");
    /// assert_eq!(params.max_hypotheses_per_node(), 1_024);
    /// assert!(ResolverParams::new(0, 10).is_err());
    /// ```
    pub fn new(max_hypotheses_per_node: usize, max_search_steps: usize) -> Result<Self, TopologyError> {
        if max_hypotheses_per_node == 0 {
            return Err(TopologyError::InvalidParameters {
                reason: "max_hypotheses_per_node must be greater than zero".into(),
            });
        }
        if max_search_steps == 0 {
            return Err(TopologyError::InvalidParameters {
                reason: "max_search_steps must be greater than zero".into(),
            });
        }
        Ok(Self {
            max_hypotheses_per_node,
            max_search_steps,
            rng_seed: DEFAULT_RNG_SEED,
        })
    }

    /// Seeds the tie-break used when ordering hypotheses during collapse.
    #[must_use]
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = seed;
        self
    }

    /// Returns the largest domain reduction may enumerate for one node.
    #[must_use]
    pub fn max_hypotheses_per_node(&self) -> usize {
        self.max_hypotheses_per_node
    }

    /// Returns the number of hypothesis trials the collapse search may make.
    #[must_use]
    pub fn max_search_steps(&self) -> usize {
        self.max_search_steps
    }

    #[must_use]
    pub fn rng_seed(&self) -> u64 {
        self.rng_seed
    }
}

impl Default for ResolverParams {
    fn default() -> Self {
        Self {
            max_hypotheses_per_node: DEFAULT_MAX_HYPOTHESES,
            max_search_steps: DEFAULT_MAX_SEARCH_STEPS,
            rng_seed: DEFAULT_RNG_SEED,
        }
    }
}
