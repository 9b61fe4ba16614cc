//! Adjustments applied to the top of a ranking before consolidation.

use sf_core::CompetitorPenalty;
use sf_network::WeightedNetwork;

use crate::decay::decay;
use crate::{FacilitySet, ScoredCandidate};

/// Move each candidate onto the road network (see [`WeightedNetwork::snap`]),
/// keeping its score.  On an empty network candidates are returned unmoved.
pub fn snap_candidates(network: &WeightedNetwork, sites: &[ScoredCandidate]) -> Vec<ScoredCandidate> {
    sites
        .iter()
        .map(|s| ScoredCandidate::new(network.snap(s.point).unwrap_or(s.point), s.score))
        .collect()
}

/// Re-score selected sites against competitor stations.
///
/// Each competitor within `penalty.max_distance` adds
/// `penalty.weight × zone × proximity` under the usual two-zone decay.
/// The result is re-sorted best first.
pub fn apply_competitor_penalty(
    sites: &[ScoredCandidate],
    competitors: &FacilitySet,
    penalty: &CompetitorPenalty,
) -> Vec<ScoredCandidate> {
    let mut penalized = 0usize;
    let mut out: Vec<ScoredCandidate> = sites
        .iter()
        .map(|s| {
            let delta: f64 = competitors
                .distances_within(s.point, penalty.max_distance)
                .filter_map(|d| decay(d, penalty.max_distance))
                .map(|(zone, proximity)| penalty.weight * zone.factor() * proximity)
                .sum();
            if delta != 0.0 {
                penalized += 1;
            }
            ScoredCandidate::new(s.point, s.score + delta)
        })
        .collect();
    out.sort_by(|a, b| b.score.total_cmp(&a.score));

    log::debug!("competitor penalty changed {penalized} of {} sites", sites.len());
    out
}
