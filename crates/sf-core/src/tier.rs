//! Station capacity tiers and the threshold table that assigns them.
//!
//! A site's tier is the largest tier whose threshold
//! `profitability[tier] × capacity[tier]` its estimated demand strictly
//! exceeds, checked large → medium → small.  Sites that clear none of the
//! three are [`CapacityTier::Undersized`]: they stay in the output, flagged,
//! instead of disappearing.

use std::fmt;

use crate::{SfError, SfResult};

/// Discrete station size.  Ordered by size, so `Ord` comparisons follow the
/// demand thresholds.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "lowercase"))]
pub enum CapacityTier {
    /// Demand below even the small-station threshold.
    Undersized,
    Small,
    Medium,
    Large,
}

impl CapacityTier {
    /// The three sized tiers, smallest first.  Matches the index order of
    /// [`TierTable`] triples.
    pub const SIZED: [CapacityTier; 3] = [Self::Small, Self::Medium, Self::Large];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Undersized => "undersized",
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

impl fmt::Display for CapacityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Capacity and profitability triples, each ordered (small, medium, large).
#[derive(Clone, Debug, PartialEq)]
pub struct TierTable {
    capacity: [f64; 3],
    profitability: [f64; 3],
}

impl TierTable {
    /// Validate and build a table.
    ///
    /// Every entry must be finite and non-negative, and the thresholds must be
    /// non-decreasing small → medium → large; otherwise tier assignment would
    /// not be monotonic in demand.
    pub fn new(capacity: [f64; 3], profitability: [f64; 3]) -> SfResult<Self> {
        for (name, triple) in [("capacity", &capacity), ("profitability", &profitability)] {
            if let Some(v) = triple.iter().find(|v| !v.is_finite() || **v < 0.0) {
                return Err(SfError::Config(format!(
                    "{name} tier entry {v} must be finite and non-negative"
                )));
            }
        }

        let table = Self { capacity, profitability };
        let [small, medium, large] = CapacityTier::SIZED.map(|t| table.threshold(t));
        if !(small <= medium && medium <= large) {
            return Err(SfError::Config(format!(
                "tier thresholds must be non-decreasing, got small={small} medium={medium} large={large}"
            )));
        }
        Ok(table)
    }

    /// Nominal capacity of `tier`.  Zero for [`CapacityTier::Undersized`].
    pub fn capacity(&self, tier: CapacityTier) -> f64 {
        match Self::slot(tier) {
            Some(i) => self.capacity[i],
            None => 0.0,
        }
    }

    /// Demand a site must strictly exceed to be given `tier`.
    pub fn threshold(&self, tier: CapacityTier) -> f64 {
        match Self::slot(tier) {
            Some(i) => self.profitability[i] * self.capacity[i],
            None => f64::NEG_INFINITY,
        }
    }

    /// Tier for an estimated demand.
    pub fn classify(&self, demand: f64) -> CapacityTier {
        CapacityTier::SIZED
            .into_iter()
            .rev()
            .find(|&t| demand > self.threshold(t))
            .unwrap_or(CapacityTier::Undersized)
    }

    fn slot(tier: CapacityTier) -> Option<usize> {
        match tier {
            CapacityTier::Undersized => None,
            CapacityTier::Small => Some(0),
            CapacityTier::Medium => Some(1),
            CapacityTier::Large => Some(2),
        }
    }
}
