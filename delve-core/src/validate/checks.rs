//! Individual constraint checks run by the candidate checker.

use crate::{
    graph::{critical_path_in, within_planar_bound},
    path::hop_distance,
};

use super::{CandidateContext, ConstraintViolation, EvaluationMode};

type CheckResult = core::result::Result<(), ConstraintViolation>;

pub(super) fn check_cp_length(ctx: &mut CandidateContext<'_>, mode: &mut EvaluationMode<'_>) -> CheckResult {
    let before = critical_path_in(ctx.before()).len();
    let after = critical_path_in(&ctx.after).len();
    if before != after {
        mode.record(ConstraintViolation::CriticalPathLength { before, after })?;
    }
    Ok(())
}

pub(super) fn check_planar_bound(ctx: &mut CandidateContext<'_>, mode: &mut EvaluationMode<'_>) -> CheckResult {
    if !within_planar_bound(&ctx.after) {
        mode.record(ConstraintViolation::PlanarBound {
            links: ctx.after.link_count(),
            nodes: ctx.after.len(),
        })?;
    }
    Ok(())
}

pub(super) fn check_cp_distance(ctx: &mut CandidateContext<'_>, mode: &mut EvaluationMode<'_>) -> CheckResult {
    let critical_path = critical_path_in(&ctx.after);
    for node in endpoints(ctx) {
        let Some(target) = ctx.graph.node(node).and_then(|entry| entry.cp_distance()) else {
            continue;
        };
        let actual = closest_critical_distance(ctx, &critical_path, node);
        if actual != Some(target) {
            mode.record(ConstraintViolation::CriticalPathDistance {
                node,
                target,
                actual,
            })?;
        }
    }
    Ok(())
}

/// Compares both endpoints against the parent's distance from the entrance.
pub(super) fn check_depth(ctx: &mut CandidateContext<'_>, mode: &mut EvaluationMode<'_>) -> CheckResult {
    let measured = hop_distance(&ctx.after, ctx.parent, 0);
    for node in endpoints(ctx) {
        let Some(target) = ctx.graph.node(node).and_then(|entry| entry.depth()) else {
            continue;
        };
        if measured != Some(target) {
            mode.record(ConstraintViolation::Depth {
                node,
                target,
                actual: measured,
            })?;
        }
    }
    Ok(())
}

/// Hop count to the nearest critical-path node. Ties keep the node that comes
/// first along the path.
fn closest_critical_distance(ctx: &CandidateContext<'_>, critical_path: &[usize], node: usize) -> Option<usize> {
    let mut best: Option<usize> = None;
    for &on_path in critical_path {
        if let Some(distance) = hop_distance(&ctx.after, node, on_path) {
            if best.is_none_or(|current| distance < current) {
                best = Some(distance);
            }
        }
    }
    best
}

fn endpoints(ctx: &CandidateContext<'_>) -> Vec<usize> {
    if ctx.parent == ctx.child {
        vec![ctx.parent]
    } else {
        vec![ctx.parent, ctx.child]
    }
}
