//! Error types for the dungeon topology core.
//!
//! Defines the error enum surfaced by graph construction, validation and
//! resolution, together with stable machine-readable codes and a result alias.

use std::fmt;

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Error type produced when building, querying or resolving a
/// [`crate::DungeonGraph`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum TopologyError {
    /// A node id fell outside the dense `0..node_count` range.
    #[error("node {node} does not exist (graph has {node_count} nodes)")]
    UnknownNode {
        /// The id that was requested.
        node: usize,
        /// Number of nodes currently registered.
        node_count: usize,
    },
    /// Node ids must be created densely in ascending order.
    #[error("node ids must be dense: expected {expected}, got {got}")]
    NonDenseNodeId {
        /// The next id the graph would accept.
        expected: usize,
        /// The id supplied by the caller.
        got: usize,
    },
    /// A node had no `MaxNeighbours` target when one was required.
    #[error("node {node} has no max-neighbours target")]
    MissingMaxNeighbours {
        /// Node lacking the target.
        node: usize,
    },
    /// Domain enumeration for a node would exceed the configured cap.
    #[error("node {node} would enumerate {hypotheses} hypotheses, exceeding limit {limit}")]
    DomainTooLarge {
        /// Node whose domain overflowed.
        node: usize,
        /// Number of hypotheses the enumeration would produce (saturating).
        hypotheses: u128,
        /// Configured per-node cap.
        limit: usize,
    },
    /// Instantiation was attempted before every domain reached a singleton.
    #[error("node {node} still has {hypotheses} hypotheses; every domain must be a singleton")]
    PrematureInstantiation {
        /// First node found with a non-singleton domain.
        node: usize,
        /// Number of hypotheses that node still holds.
        hypotheses: usize,
    },
    /// The committed edges could not realise a node's degree target.
    #[error("node {node} ended with {degree} edge(s) but targets {target}; sample is unsatisfiable")]
    UnsatisfiableSample {
        /// First node whose final degree mismatched.
        node: usize,
        /// Own out-degree after instantiation.
        degree: usize,
        /// Configured `MaxNeighbours` target.
        target: usize,
    },
    /// The collapse search exhausted every candidate assignment.
    #[error("no consistent neighbour assignment exists for the current domains")]
    NoConsistentAssignment,
    /// The collapse search hit its configured step cap.
    #[error("collapse search aborted after {steps} steps")]
    SearchBudgetExhausted {
        /// Number of steps taken before aborting.
        steps: usize,
    },
    /// Resolver parameters were rejected.
    #[error("invalid resolver parameter: {reason}")]
    InvalidParameters {
        /// Human-friendly explanation of the rejected value.
        reason: String,
    },
}

define_error_codes! {
    /// Stable codes describing [`TopologyError`] variants.
    enum TopologyErrorCode for TopologyError {
        /// A node id fell outside the dense id range.
        UnknownNode => UnknownNode { .. } => "TOPOLOGY_UNKNOWN_NODE",
        /// Node ids must be created densely in ascending order.
        NonDenseNodeId => NonDenseNodeId { .. } => "TOPOLOGY_NON_DENSE_NODE_ID",
        /// A node had no `MaxNeighbours` target when one was required.
        MissingMaxNeighbours => MissingMaxNeighbours { .. } => "TOPOLOGY_MISSING_MAX_NEIGHBOURS",
        /// Domain enumeration would exceed the configured cap.
        DomainTooLarge => DomainTooLarge { .. } => "TOPOLOGY_DOMAIN_TOO_LARGE",
        /// Instantiation ran before every domain was a singleton.
        PrematureInstantiation => PrematureInstantiation { .. } => "TOPOLOGY_PREMATURE_INSTANTIATION",
        /// The committed edges could not realise a degree target.
        UnsatisfiableSample => UnsatisfiableSample { .. } => "TOPOLOGY_UNSATISFIABLE_SAMPLE",
        /// The collapse search exhausted every candidate assignment.
        NoConsistentAssignment => NoConsistentAssignment => "TOPOLOGY_NO_CONSISTENT_ASSIGNMENT",
        /// The collapse search hit its step cap.
        SearchBudgetExhausted => SearchBudgetExhausted { .. } => "TOPOLOGY_SEARCH_BUDGET_EXHAUSTED",
        /// Resolver parameters were rejected.
        InvalidParameters => InvalidParameters { .. } => "TOPOLOGY_INVALID_PARAMETERS",
    }
}

impl TopologyError {
    /// Returns `true` when the failure means the current sample of targets
    /// cannot be realised and the caller should resample.
    #[must_use]
    pub const fn requires_resample(&self) -> bool {
        matches!(
            self,
            Self::UnsatisfiableSample { .. }
                | Self::NoConsistentAssignment
                | Self::SearchBudgetExhausted { .. }
        )
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, TopologyError>;
