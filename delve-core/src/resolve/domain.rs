//! Arena-backed storage for a node's neighbour-set hypotheses.
//!
//! Every hypothesis of a domain has the same width (the node's
//! `MaxNeighbours`), so the members are stored back to back in a single
//! vector: hypothesis `i` occupies `members[i * width..(i + 1) * width]` and is
//! sorted in ascending id order. The hypothesis count is tracked separately so
//! a zero-width domain can still hold its single empty hypothesis.

/// Lifecycle of a node's domain during resolution.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DomainState {
    /// Reduction has not populated the domain yet.
    Unreduced,
    /// More than one hypothesis survives.
    Open,
    /// Exactly one hypothesis survives.
    Singleton,
    /// No hypothesis survives; the node cannot be satisfied.
    Exhausted,
}

/// Candidate neighbour-sets still considered possible for a node.
///
/// # Examples
/// ```
/// use delve_core::{DomainState, DungeonGraph, Resolver};
///
/// let mut graph = DungeonGraph::with_node_count(3);
/// graph.set_max_neighbours(0, 1).expect("node 0");
/// graph.set_max_neighbours(1, 1).expect("node 1");
/// graph.set_max_neighbours(2, 2).expect("node 2");
/// Resolver::default().reduce(&mut graph).expect("reduction fits");
///
/// let domain = graph.node(0).expect("node 0").domain();
/// assert_eq!(domain.state(), DomainState::Open);
/// let hypotheses: Vec<&[usize]> = domain.hypotheses().collect();
/// assert_eq!(hypotheses, vec![&[1][..], &[2][..]]);
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Domain {
    width: usize,
    count: usize,
    members: Vec<usize>,
    reduced: bool,
}

impl Domain {
    /// Enumerates every `width`-sized subset of `pool` in lexicographic order,
    /// keeping those for which `keep` holds.
    pub(crate) fn enumerate(pool: &[usize], width: usize, mut keep: impl FnMut(&[usize]) -> bool) -> Self {
        let mut domain = Self {
            width,
            count: 0,
            members: Vec::new(),
            reduced: true,
        };
        for_each_combination(pool, width, |hypothesis| {
            if keep(hypothesis) {
                domain.members.extend_from_slice(hypothesis);
                domain.count += 1;
            }
        });
        domain
    }

    /// Number of surviving hypotheses.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.count
    }

    /// Returns `true` when no hypothesis survives.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Size of every hypothesis in the domain.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Returns `true` once reduction has populated the domain.
    #[must_use]
    pub const fn is_reduced(&self) -> bool {
        self.reduced
    }

    /// Returns `true` when exactly one hypothesis survives.
    #[must_use]
    pub const fn is_singleton(&self) -> bool {
        self.reduced && self.count == 1
    }

    #[must_use]
    pub const fn state(&self) -> DomainState {
        match (self.reduced, self.count) {
            (false, _) => DomainState::Unreduced,
            (true, 0) => DomainState::Exhausted,
            (true, 1) => DomainState::Singleton,
            (true, _) => DomainState::Open,
        }
    }

    /// Returns hypothesis `index`, sorted by node id.
    #[must_use]
    pub fn hypothesis(&self, index: usize) -> Option<&[usize]> {
        if index >= self.count {
            return None;
        }
        let start = index * self.width;
        self.members.get(start..start + self.width)
    }

    /// Iterates over the surviving hypotheses in storage order.
    pub fn hypotheses(&self) -> impl Iterator<Item = &[usize]> + '_ {
        (0..self.count).filter_map(|index| self.hypothesis(index))
    }

    /// The surviving hypothesis when the domain is a singleton.
    #[must_use]
    pub fn single(&self) -> Option<&[usize]> {
        if self.is_singleton() {
            self.hypothesis(0)
        } else {
            None
        }
    }

    /// Drops every hypothesis for which `keep` returns `false`, preserving the
    /// order of the survivors.
    pub(crate) fn retain(&mut self, mut keep: impl FnMut(&[usize]) -> bool) {
        let width = self.width;
        let mut survivors = Vec::with_capacity(self.members.len());
        let mut count = 0;
        for hypothesis in self.hypotheses() {
            if keep(hypothesis) {
                survivors.extend_from_slice(hypothesis);
                count += 1;
            }
        }
        debug_assert_eq!(survivors.len(), count * width);
        self.members = survivors;
        self.count = count;
    }

    /// Collapses the domain to hypothesis `index`. Returns `false` and leaves
    /// the domain untouched when the index is out of range.
    pub(crate) fn narrow_to(&mut self, index: usize) -> bool {
        let Some(chosen) = self.hypothesis(index).map(<[usize]>::to_vec) else {
            return false;
        };
        self.members = chosen;
        self.count = 1;
        true
    }
}

/// `C(n, k)`, saturating at `u128::MAX`.
pub(crate) fn binomial(n: usize, k: usize) -> u128 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut acc: u128 = 1;
    for step in 0..k {
        // acc == C(n, step) here, so the division is exact.
        acc = match acc.checked_mul((n - step) as u128) {
            Some(product) => product / (step as u128 + 1),
            None => return u128::MAX,
        };
    }
    acc
}

/// Visits each `width`-sized subset of `pool` in lexicographic index order.
fn for_each_combination(pool: &[usize], width: usize, mut visit: impl FnMut(&[usize])) {
    if width > pool.len() {
        return;
    }
    let mut indices: Vec<usize> = (0..width).collect();
    let mut scratch = Vec::with_capacity(width);
    loop {
        scratch.clear();
        scratch.extend(indices.iter().filter_map(|&index| pool.get(index).copied()));
        visit(&scratch);

        let ceiling = pool.len() - width;
        let Some(pivot) = (0..width).rev().find(|&slot| indices[slot] < ceiling + slot) else {
            return;
        };
        indices[pivot] += 1;
        for slot in (pivot + 1)..width {
            indices[slot] = indices[slot - 1] + 1;
        }
    }
}
