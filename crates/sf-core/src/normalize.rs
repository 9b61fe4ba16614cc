//! Min-max scaling of attribute populations.
//!
//! Traffic intensities and hub surfaces are both scaled over their *full*
//! population before scoring, so every weight the scorer sees lies in
//! `[0, 1]`.  A population whose minimum equals its maximum has no defined
//! scale and is reported as [`SfError::Normalization`] rather than mapped to
//! zero.

use crate::{SfError, SfResult};

/// Fitted bounds of a population.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MinMax {
    pub min: f64,
    pub max: f64,
}

impl MinMax {
    /// Fit bounds over `values`.  `what` names the population in errors.
    pub fn fit(values: &[f64], what: &str) -> SfResult<Self> {
        let fail = |reason: String| SfError::Normalization {
            what: what.to_owned(),
            reason,
        };

        if values.is_empty() {
            return Err(fail("population is empty".into()));
        }

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for (i, &v) in values.iter().enumerate() {
            if !v.is_finite() {
                return Err(fail(format!("value {v} at index {i} is not finite")));
            }
            min = min.min(v);
            max = max.max(v);
        }

        if min == max {
            return Err(fail(format!("all {} values equal {min}", values.len())));
        }
        Ok(Self { min, max })
    }

    /// Scale `v` into the fitted range.  Values outside the fitted population
    /// are clamped so the `[0, 1]` guarantee holds for them too.
    #[inline]
    pub fn scale(&self, v: f64) -> f64 {
        ((v - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }
}

/// Scale every value of `values` to `[0, 1]` by its population min and max.
pub fn min_max_normalize(values: &[f64], what: &str) -> SfResult<Vec<f64>> {
    let bounds = MinMax::fit(values, what)?;
    log::debug!(
        "normalized {} {what} values over [{}, {}]",
        values.len(),
        bounds.min,
        bounds.max
    );
    Ok(values.iter().map(|&v| bounds.scale(v)).collect())
}
