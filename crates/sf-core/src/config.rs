//! Run configuration, loaded from JSON.
//!
//! ```json
//! {
//!   "grid_step": 20000,
//!   "top_n": 50,
//!   "distance_min": 5000,
//!   "capacity_stations": [1000, 2000, 4000],
//!   "profitability_stations": [0.5, 0.6, 0.7],
//!   "scoring": { "max_road": 500 },
//!   "competitor": { "weight": -50, "max_distance": 60000 }
//! }
//! ```
//!
//! Only the two tier triples are required; everything else has a default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{CompetitorPenalty, ScoringParams, SfError, SfResult, TierTable};

fn default_grid_step() -> f64 {
    100_000.0
}

fn default_top_n() -> usize {
    100
}

fn default_distance_min() -> f64 {
    5_000.0
}

/// Top-level configuration of one analysis run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub scoring: ScoringParams,

    /// Lattice spacing of generated candidates.
    #[serde(default = "default_grid_step")]
    pub grid_step: f64,

    /// Penalize candidates near existing facilities while scoring.
    #[serde(default)]
    pub include_facility_penalty: bool,

    /// How many ranked candidates go on to consolidation.
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Candidates at most this far apart are merged into one site.
    #[serde(default = "default_distance_min")]
    pub distance_min: f64,

    /// Station capacity, (small, medium, large).
    pub capacity_stations: [f64; 3],

    /// Utilisation a station must reach to be profitable, (small, medium, large).
    pub profitability_stations: [f64; 3],

    /// Re-score the top candidates against competitor stations.
    #[serde(default)]
    pub competitor: Option<CompetitorPenalty>,

    /// Move the top candidates onto the nearest road vertex or junction.
    #[serde(default)]
    pub snap_to_road: bool,

    /// Worker thread count passed to Rayon.  `None` uses all logical cores.
    #[serde(default)]
    pub num_threads: Option<usize>,
}

impl SiteConfig {
    /// Configuration with default parameters and the given tier triples.
    pub fn new(capacity_stations: [f64; 3], profitability_stations: [f64; 3]) -> Self {
        Self {
            scoring: ScoringParams::default(),
            grid_step: default_grid_step(),
            include_facility_penalty: false,
            top_n: default_top_n(),
            distance_min: default_distance_min(),
            capacity_stations,
            profitability_stations,
            competitor: None,
            snap_to_road: false,
            num_threads: None,
        }
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(s: &str) -> SfResult<Self> {
        let config: SiteConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a JSON file.
    pub fn load_json(path: &Path) -> SfResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        log::info!("loaded site configuration from {}", path.display());
        Ok(config)
    }

    /// Validated tier table built from the two triples.
    pub fn tier_table(&self) -> SfResult<TierTable> {
        TierTable::new(self.capacity_stations, self.profitability_stations)
    }

    pub fn validate(&self) -> SfResult<()> {
        self.scoring.validate()?;
        if !(self.grid_step.is_finite() && self.grid_step > 0.0) {
            return Err(SfError::Config(format!("grid_step must be positive, got {}", self.grid_step)));
        }
        if !(self.distance_min.is_finite() && self.distance_min >= 0.0) {
            return Err(SfError::Config(format!(
                "distance_min must be non-negative, got {}",
                self.distance_min
            )));
        }
        if self.top_n == 0 {
            return Err(SfError::Config("top_n must be at least 1".into()));
        }
        if self.num_threads == Some(0) {
            return Err(SfError::Config("num_threads must be at least 1".into()));
        }
        if let Some(competitor) = &self.competitor {
            competitor.validate()?;
        }
        self.tier_table()?;
        Ok(())
    }
}
