//! Backtracking search that drives every domain to a single hypothesis.
//!
//! Nodes are decided in id order. A hypothesis for node `n` agrees with an
//! already-decided node `d` when neighbourship is mutual: `d` appears in the
//! hypothesis exactly when `n` appears in `d`'s chosen hypothesis. After each
//! choice the search looks ahead and backtracks as soon as some undecided node
//! has no hypothesis left that agrees with the decisions made so far.

use rand::{SeedableRng, rngs::SmallRng, seq::SliceRandom};

use crate::{
    error::{Result, TopologyError},
    graph::DungeonGraph,
};

use super::{domain::Domain, params::ResolverParams};

/// Picks one hypothesis index per node. Domains are only read.
pub(super) fn choose_hypotheses(graph: &DungeonGraph, params: &ResolverParams) -> Result<Vec<usize>> {
    let mut search = Search::new(graph, params);
    if !search.lookahead(0) || !search.descend(0)? {
        return Err(TopologyError::NoConsistentAssignment);
    }
    search
        .chosen
        .into_iter()
        .map(|choice| choice.ok_or(TopologyError::NoConsistentAssignment))
        .collect()
}

struct Search<'a> {
    domains: Vec<&'a Domain>,
    orders: Vec<Vec<usize>>,
    chosen: Vec<Option<usize>>,
    steps: usize,
    budget: usize,
}

impl<'a> Search<'a> {
    fn new(graph: &'a DungeonGraph, params: &ResolverParams) -> Self {
        let domains: Vec<&Domain> = graph.nodes().map(|node| node.domain()).collect();
        let mut rng = SmallRng::seed_from_u64(params.rng_seed());
        let orders = domains
            .iter()
            .map(|domain| {
                let mut order: Vec<usize> = (0..domain.len()).collect();
                order.shuffle(&mut rng);
                order
            })
            .collect();
        let chosen = vec![None; domains.len()];
        Self {
            domains,
            orders,
            chosen,
            steps: 0,
            budget: params.max_search_steps(),
        }
    }

    fn descend(&mut self, node: usize) -> Result<bool> {
        if node >= self.domains.len() {
            return Ok(true);
        }
        let order = self.orders.get(node).cloned().unwrap_or_default();
        for index in order {
            self.steps += 1;
            if self.steps > self.budget {
                return Err(TopologyError::SearchBudgetExhausted { steps: self.budget });
            }
            if !self.agrees(node, self.hypothesis(node, index)) {
                continue;
            }
            self.decide(node, Some(index));
            if self.lookahead(node + 1) && self.descend(node + 1)? {
                return Ok(true);
            }
            self.decide(node, None);
        }
        Ok(false)
    }

    /// Every undecided node from `first` on still has an agreeing hypothesis.
    fn lookahead(&self, first: usize) -> bool {
        (first..self.domains.len()).all(|node| {
            let count = self.domains.get(node).map_or(0, |domain| domain.len());
            (0..count).any(|index| self.agrees(node, self.hypothesis(node, index)))
        })
    }

    fn agrees(&self, node: usize, hypothesis: &[usize]) -> bool {
        self.chosen
            .iter()
            .enumerate()
            .filter_map(|(other, choice)| choice.map(|index| (other, index)))
            .all(|(other, index)| {
                let lists_other = hypothesis.binary_search(&other).is_ok();
                let listed_by_other = self.hypothesis(other, index).binary_search(&node).is_ok();
                lists_other == listed_by_other
            })
    }

    fn hypothesis(&self, node: usize, index: usize) -> &'a [usize] {
        self.domains
            .get(node)
            .copied()
            .and_then(|domain| domain.hypothesis(index))
            .unwrap_or_default()
    }

    fn decide(&mut self, node: usize, choice: Option<usize>) {
        if let Some(slot) = self.chosen.get_mut(node) {
            *slot = choice;
        }
    }
}
