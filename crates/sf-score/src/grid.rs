//! Candidate lattice generation and ranking.

use geo::{Point, Rect};

use crate::{CandidateScorer, ScoreError, ScoreResult};

/// A candidate point and its score.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ScoredCandidate {
    pub point: Point<f64>,
    pub score: f64,
}

impl ScoredCandidate {
    pub fn new(point: Point<f64>, score: f64) -> Self {
        Self { point, score }
    }
}

/// Largest lattice [`lattice`] will allocate.
pub const MAX_LATTICE_POINTS: usize = 20_000_000;

/// Every lattice point of spacing `step` anchored at the lower-left corner of
/// `bounds`, row by row (x varies fastest).
///
/// The lattice always reaches or passes the upper bound on both axes: along
/// an axis of width `w` it has `⌈w / step⌉ + 1` points.
///
/// Fails with [`ScoreError::GridTooLarge`] rather than allocating more than
/// [`MAX_LATTICE_POINTS`] points.
pub fn lattice(bounds: Rect<f64>, step: f64) -> ScoreResult<Vec<Point<f64>>> {
    if !(step.is_finite() && step > 0.0) {
        return Err(ScoreError::InvalidStep(step));
    }
    let (min, max) = (bounds.min(), bounds.max());
    let nx = axis_len(max.x - min.x, step)?;
    let ny = axis_len(max.y - min.y, step)?;
    let total = (nx as f64) * (ny as f64);
    if total > MAX_LATTICE_POINTS as f64 {
        return Err(ScoreError::GridTooLarge { step, points: total, limit: MAX_LATTICE_POINTS });
    }

    let mut points = Vec::with_capacity(nx * ny);
    for j in 0..ny {
        let y = min.y + j as f64 * step;
        for i in 0..nx {
            points.push(Point::new(min.x + i as f64 * step, y));
        }
    }
    Ok(points)
}

fn axis_len(width: f64, step: f64) -> ScoreResult<usize> {
    let cells = (width / step).ceil();
    if !cells.is_finite() {
        return Err(ScoreError::InvalidStep(step));
    }
    if cells >= MAX_LATTICE_POINTS as f64 {
        return Err(ScoreError::GridTooLarge {
            step,
            points: cells + 1.0,
            limit: MAX_LATTICE_POINTS,
        });
    }
    Ok(cells as usize + 1)
}

/// Score candidates and return them all, best first.
///
/// Candidates are `candidates_override` when given, otherwise the
/// [`lattice`] of spacing `step` over the network's bounding box.  Equal
/// scores keep their generation order.  Truncating to a top N is up to the
/// caller.
pub fn rank(
    scorer: &CandidateScorer<'_>,
    step: f64,
    candidates_override: Option<&[Point<f64>]>,
) -> ScoreResult<Vec<ScoredCandidate>> {
    let candidates = match candidates_override {
        Some(points) => points.to_vec(),
        None => {
            let bounds = scorer.network().bounds().ok_or(ScoreError::EmptyExtent)?;
            lattice(bounds, step)?
        }
    };

    log::info!("scoring {} candidates", candidates.len());
    let mut scored = score_all(scorer, candidates);
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));

    if let (Some(best), Some(worst)) = (scored.first(), scored.last()) {
        log::debug!("score range [{:.3}, {:.3}]", worst.score, best.score);
    }
    Ok(scored)
}

fn score_all(scorer: &CandidateScorer<'_>, candidates: Vec<Point<f64>>) -> Vec<ScoredCandidate> {
    #[cfg(not(feature = "parallel"))]
    {
        candidates
            .into_iter()
            .map(|p| ScoredCandidate::new(p, scorer.score(p)))
            .collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        candidates
            .into_par_iter()
            .map(|p| ScoredCandidate::new(p, scorer.score(p)))
            .collect()
    }
}
