//! Scoring weights and decay radii.
//!
//! Distances are in the units of the planar projection the inputs were
//! reprojected to (metres for Lambert-93).

use serde::{Deserialize, Serialize};

use crate::{SfError, SfResult};

/// Parameters of the per-candidate score.
///
/// Each proximity signal decays over two zones: *near* up to half its radius
/// and *far* up to the radius.  See `sf_score::decay`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringParams {
    /// Radius of the road/traffic signal.
    pub max_road: f64,
    /// Radius of the hub and existing-facility signals.
    pub max_distance: f64,
    pub proximity_weight: f64,
    pub traffic_weight: f64,
    pub hub_weight: f64,
    /// Negative: proximity to an existing facility lowers the score.
    pub facility_weight: f64,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            max_road: 500.0,
            max_distance: 10_000.0,
            proximity_weight: 2.0,
            traffic_weight: 5.0,
            hub_weight: 10.0,
            facility_weight: -2.0,
        }
    }
}

impl ScoringParams {
    pub fn validate(&self) -> SfResult<()> {
        for (name, radius) in [("max_road", self.max_road), ("max_distance", self.max_distance)] {
            if !(radius.is_finite() && radius > 0.0) {
                return Err(SfError::Config(format!("{name} must be positive, got {radius}")));
            }
        }
        let weights = [
            self.proximity_weight,
            self.traffic_weight,
            self.hub_weight,
            self.facility_weight,
        ];
        if weights.iter().any(|w| !w.is_finite()) {
            return Err(SfError::Config("scoring weights must be finite".into()));
        }
        Ok(())
    }
}

/// Second-pass penalty applied to already selected sites for nearby
/// competitor stations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompetitorPenalty {
    pub weight: f64,
    pub max_distance: f64,
}

impl Default for CompetitorPenalty {
    fn default() -> Self {
        Self { weight: -50.0, max_distance: 60_000.0 }
    }
}

impl CompetitorPenalty {
    pub fn validate(&self) -> SfResult<()> {
        if !self.weight.is_finite() {
            return Err(SfError::Config(format!("competitor weight {} is not finite", self.weight)));
        }
        if !(self.max_distance.is_finite() && self.max_distance > 0.0) {
            return Err(SfError::Config(format!(
                "competitor max_distance must be positive, got {}",
                self.max_distance
            )));
        }
        Ok(())
    }
}
