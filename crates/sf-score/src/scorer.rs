//! The per-candidate desirability score.
//!
//! Each call is pure: it reads the network, hub, and facility sets and
//! nothing else, so the same candidate always scores the same and
//! candidates can be scored on any number of threads.

use geo::Point;

use sf_core::ScoringParams;
use sf_network::WeightedNetwork;

use crate::decay::decay;
use crate::sites::{FacilitySet, HubSet};

/// Score split by signal.  `total()` is the candidate's score.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ScoreBreakdown {
    pub road: f64,
    pub hub: f64,
    /// Zero unless the facility penalty is enabled; otherwise `≤ 0` for the
    /// default negative weight.
    pub facility: f64,
}

impl ScoreBreakdown {
    #[inline]
    pub fn total(&self) -> f64 {
        self.road + self.hub + self.facility
    }
}

/// Scores candidate points against one territory's inputs.
///
/// Holds shared references only; build one per run and share it across
/// worker threads.
pub struct CandidateScorer<'a> {
    network: &'a WeightedNetwork,
    hubs: &'a HubSet,
    facilities: Option<&'a FacilitySet>,
    include_facility_penalty: bool,
    params: ScoringParams,
}

impl<'a> CandidateScorer<'a> {
    pub fn new(network: &'a WeightedNetwork, hubs: &'a HubSet, params: ScoringParams) -> Self {
        Self {
            network,
            hubs,
            facilities: None,
            include_facility_penalty: false,
            params,
        }
    }

    /// Attach existing facilities.  They only affect the score when
    /// `include_penalty` is set.
    pub fn with_facilities(mut self, facilities: &'a FacilitySet, include_penalty: bool) -> Self {
        self.facilities = Some(facilities);
        self.include_facility_penalty = include_penalty;
        self
    }

    pub fn network(&self) -> &'a WeightedNetwork {
        self.network
    }

    pub fn params(&self) -> &ScoringParams {
        &self.params
    }

    #[inline]
    pub fn score(&self, candidate: Point<f64>) -> f64 {
        self.breakdown(candidate).total()
    }

    pub fn breakdown(&self, candidate: Point<f64>) -> ScoreBreakdown {
        ScoreBreakdown {
            road: self.road_term(candidate),
            hub: self.hub_term(candidate),
            facility: self.facility_term(candidate),
        }
    }

    fn road_term(&self, candidate: Point<f64>) -> f64 {
        let p = &self.params;
        self.network
            .within(candidate, p.max_road)
            .into_iter()
            .filter_map(|(id, d)| {
                let (zone, proximity) = decay(d, p.max_road)?;
                let traffic = self.network.weight(id);
                Some(zone.factor() * (p.proximity_weight * proximity + p.traffic_weight * traffic))
            })
            .sum()
    }

    fn hub_term(&self, candidate: Point<f64>) -> f64 {
        let p = &self.params;
        self.hubs
            .within(candidate, p.max_distance)
            .filter_map(|(hub, d)| {
                let (zone, proximity) = decay(d, p.max_distance)?;
                Some(p.hub_weight * zone.factor() * (proximity + hub.capacity))
            })
            .sum()
    }

    fn facility_term(&self, candidate: Point<f64>) -> f64 {
        let Some(facilities) = self.facilities.filter(|_| self.include_facility_penalty) else {
            return 0.0;
        };
        let p = &self.params;
        facilities
            .distances_within(candidate, p.max_distance)
            .filter_map(|d| {
                let (zone, proximity) = decay(d, p.max_distance)?;
                Some(p.facility_weight * zone.factor() * proximity)
            })
            .sum()
    }
}

/// One-shot form of [`CandidateScorer::score`].
pub fn score(
    candidate: Point<f64>,
    network: &WeightedNetwork,
    hubs: &HubSet,
    facilities: Option<&FacilitySet>,
    include_facility_penalty: bool,
    params: &ScoringParams,
) -> f64 {
    let scorer = CandidateScorer::new(network, hubs, params.clone());
    match facilities {
        Some(f) => scorer.with_facilities(f, include_facility_penalty).score(candidate),
        None => scorer.score(candidate),
    }
}
