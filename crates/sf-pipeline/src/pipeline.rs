//! The [`Pipeline`] and its stage sequence.

use std::collections::HashMap;

use geo::Point;

use sf_core::{SiteConfig, TierTable};
use sf_network::WeightedNetwork;
use sf_score::{
    CandidateScorer, FacilitySet, HubSet, ScoredCandidate, apply_competitor_penalty, rank,
    snap_candidates,
};
use sf_select::{MergedSite, SizedSite, merge, score_total, size};

use crate::PipelineResult;

/// Everything one run produces.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PipelineOutput {
    /// Every scored candidate, best first.
    pub ranked: Vec<ScoredCandidate>,
    /// Consolidated sites, densest cluster first.
    pub merged: Vec<MergedSite>,
    /// Sized sites, best score first.
    pub sized: Vec<SizedSite>,
}

/// A validated, indexed analysis run.
///
/// Create via [`PipelineBuilder`][crate::PipelineBuilder].  [`run`](Self::run)
/// only reads `self`, so a pipeline can be run repeatedly with the same
/// result.
pub struct Pipeline {
    pub config: SiteConfig,
    pub tiers: TierTable,
    pub network: WeightedNetwork,
    pub hubs: HubSet,
    pub facilities: FacilitySet,
    pub competitors: FacilitySet,
    pub candidates: Option<Vec<Point<f64>>>,
    pub regional_demand: HashMap<String, f64>,
}

impl Pipeline {
    /// Run every stage.  With the `parallel` feature and `num_threads` set,
    /// scoring runs on a dedicated pool of that size.
    pub fn run(&self) -> PipelineResult<PipelineOutput> {
        #[cfg(feature = "parallel")]
        if let Some(n) = self.config.num_threads {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| crate::PipelineError::Config(format!("thread pool: {e}")))?;
            return pool.install(|| self.run_stages());
        }

        self.run_stages()
    }

    fn run_stages(&self) -> PipelineResult<PipelineOutput> {
        let config = &self.config;

        // ── ① Rank ────────────────────────────────────────────────────────
        let scorer = CandidateScorer::new(&self.network, &self.hubs, config.scoring.clone())
            .with_facilities(&self.facilities, config.include_facility_penalty);
        let ranked = rank(&scorer, config.grid_step, self.candidates.as_deref())?;

        // ── ② Top N ───────────────────────────────────────────────────────
        let mut top = ranked[..ranked.len().min(config.top_n)].to_vec();
        log::info!("kept top {} of {} candidates", top.len(), ranked.len());

        // ── ③ Refine ──────────────────────────────────────────────────────
        if config.snap_to_road {
            top = snap_candidates(&self.network, &top);
        }
        if let Some(penalty) = &config.competitor {
            if !self.competitors.is_empty() {
                top = apply_competitor_penalty(&top, &self.competitors, penalty);
            }
        }

        // ── ④ Merge ───────────────────────────────────────────────────────
        let merged = merge(&top, config.distance_min)?;

        // ── ⑤ Size ────────────────────────────────────────────────────────
        let total = score_total(&merged);
        let mut sized = size(&merged, &self.regional_demand, &self.tiers, total)?;
        sized.sort_by(|a, b| b.score.total_cmp(&a.score));

        log::info!("selected {} sites", sized.len());
        Ok(PipelineOutput { ranked, merged, sized })
    }
}
