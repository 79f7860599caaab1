// Score boosting and diversified selection

use crate::attributes::TestType;
use crate::engine::EnrichedCandidate;
use std::collections::{BTreeSet, VecDeque};

/// Apply the preference boost
///
/// Candidates whose categories intersect the preferences gain `boost` once,
/// regardless of how many categories match.
pub fn boost(
    similarity: f32,
    test_types: &[TestType],
    preferred: &BTreeSet<TestType>,
    boost: f32,
) -> f32 {
    if !preferred.is_empty() && test_types.iter().any(|t| preferred.contains(t)) {
        similarity + boost
    } else {
        similarity
    }
}

/// Sort by adjusted score, descending; equal scores keep their order
pub fn sort_by_score(candidates: &mut [EnrichedCandidate]) {
    candidates.sort_by(|a, b| b.adjusted_score.total_cmp(&a.adjusted_score));
}

/// Restrict to candidates at or above `threshold` when there are at least `k`
/// of them; otherwise keep everything so the result can still be filled
pub fn quality_pool(
    candidates: Vec<EnrichedCandidate>,
    k: usize,
    threshold: f32,
) -> Vec<EnrichedCandidate> {
    let high_quality = candidates
        .iter()
        .filter(|c| c.adjusted_score >= threshold)
        .count();

    if high_quality >= k {
        candidates
            .into_iter()
            .filter(|c| c.adjusted_score >= threshold)
            .collect()
    } else {
        candidates
    }
}

/// Interleave candidates across primary test types
///
/// Candidates are grouped by primary test type (groups ordered by first
/// appearance). Each pass ranks the non-empty groups by their current head
/// score and pops one candidate from each group in that order, stopping as
/// soon as `k` are collected. Groups are re-ranked at the start of every pass.
pub fn diversify(pool: Vec<EnrichedCandidate>, k: usize) -> Vec<EnrichedCandidate> {
    let mut groups: Vec<(TestType, VecDeque<EnrichedCandidate>)> = Vec::new();
    for candidate in pool {
        let key = candidate.primary_test_type();
        match groups.iter_mut().find(|(group, _)| *group == key) {
            Some((_, members)) => members.push_back(candidate),
            None => groups.push((key, VecDeque::from([candidate]))),
        }
    }
    for (_, members) in &mut groups {
        members
            .make_contiguous()
            .sort_by(|a, b| b.adjusted_score.total_cmp(&a.adjusted_score));
    }

    let head_score = |members: &VecDeque<EnrichedCandidate>| {
        members
            .front()
            .map(|c| c.adjusted_score)
            .unwrap_or(f32::NEG_INFINITY)
    };

    let mut result = Vec::with_capacity(k);
    'passes: while result.len() < k && !groups.is_empty() {
        let mut order: Vec<usize> = (0..groups.len()).collect();
        order.sort_by(|&a, &b| head_score(&groups[b].1).total_cmp(&head_score(&groups[a].1)));

        for g in order {
            if let Some(candidate) = groups[g].1.pop_front() {
                result.push(candidate);
                if result.len() >= k {
                    break 'passes;
                }
            }
        }

        groups.retain(|(_, members)| !members.is_empty());
    }

    result.truncate(k);
    result
}

/// Full selection stage: sort, quality pool, diversify, cap at `k`
pub fn select(
    mut candidates: Vec<EnrichedCandidate>,
    k: usize,
    threshold: f32,
) -> Vec<EnrichedCandidate> {
    sort_by_score(&mut candidates);
    let pool = quality_pool(candidates, k, threshold);
    diversify(pool, k)
}
