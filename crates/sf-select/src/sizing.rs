//! Demand-based station sizing.
//!
//! Regional demand is spread over the sites in proportion to their scores:
//!
//! ```text
//! estimated_demand = score / score_total × Σ regional_demand
//! ```
//!
//! and the estimate picks the tier through [`TierTable::classify`].  The
//! caller supplies `score_total`, so the normalization basis can be wider
//! than the sites being sized (e.g. all sites of a multi-year scenario).

use std::collections::HashMap;

use geo::Point;

use sf_core::{CapacityTier, SfError, TierTable};

use crate::{MergedSite, SelectError, SelectResult};

/// A consolidated site with its capacity tier.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SizedSite {
    pub point: Point<f64>,
    pub tier: CapacityTier,
    pub score: f64,
    pub estimated_demand: f64,
    pub merge_count: usize,
}

/// Sum of aggregated scores, the usual `score_total` for [`size`].
pub fn score_total(sites: &[MergedSite]) -> f64 {
    sites.iter().map(|s| s.score).sum()
}

/// Assigns capacity tiers from a validated [`TierTable`].
pub struct DemandSizer<'a> {
    tiers: &'a TierTable,
}

impl<'a> DemandSizer<'a> {
    pub fn new(tiers: &'a TierTable) -> Self {
        Self { tiers }
    }

    pub fn size(
        &self,
        sites: &[MergedSite],
        regional_demand: &HashMap<String, f64>,
        score_total: f64,
    ) -> SelectResult<Vec<SizedSite>> {
        if sites.is_empty() {
            return Err(SelectError::EmptyInput { stage: "size" });
        }
        if !score_total.is_finite() || score_total == 0.0 {
            return Err(SfError::Normalization {
                what: "site scores".into(),
                reason: format!("score total {score_total} cannot be used as a share basis"),
            }
            .into());
        }

        let mut demand_total = 0.0;
        for (region, &value) in regional_demand {
            if !(value.is_finite() && value >= 0.0) {
                return Err(SelectError::InvalidDemand { region: region.clone(), value });
            }
            demand_total += value;
        }

        let sized: Vec<SizedSite> = sites
            .iter()
            .map(|site| {
                let estimated_demand = site.score / score_total * demand_total;
                SizedSite {
                    point: site.point,
                    tier: self.tiers.classify(estimated_demand),
                    score: site.score,
                    estimated_demand,
                    merge_count: site.merge_count,
                }
            })
            .collect();

        let undersized = sized.iter().filter(|s| s.tier == CapacityTier::Undersized).count();
        if undersized > 0 {
            log::warn!(
                "{undersized} of {} sites fall below the small-station threshold ({})",
                sized.len(),
                self.tiers.threshold(CapacityTier::Small)
            );
        }
        log::info!("sized {} sites against total demand {demand_total}", sized.len());
        Ok(sized)
    }
}

/// One-shot form of [`DemandSizer::size`].
pub fn size(
    sites: &[MergedSite],
    regional_demand: &HashMap<String, f64>,
    tiers: &TierTable,
    score_total: f64,
) -> SelectResult<Vec<SizedSite>> {
    DemandSizer::new(tiers).size(sites, regional_demand, score_total)
}
