//! Greedy merging of nearby top candidates into consolidated sites.
//!
//! # Algorithm
//!
//! 1. For every candidate `i`, collect its *proximity set*: every candidate
//!    (itself included) within `distance_min`.
//! 2. Visit candidates by proximity-set size, largest first; equal sizes are
//!    visited in input order, i.e. better-ranked first.  A candidate already
//!    claimed is skipped.  Otherwise it seeds a new cluster that claims every
//!    still-unclaimed member of its proximity set.
//! 3. Each cluster becomes one [`MergedSite`]:
//!
//! | Members | Representative point               |
//! |---------|------------------------------------|
//! | 1       | the point itself                   |
//! | 2       | midpoint of the two                |
//! | ≥ 3     | centroid of their convex hull      |
//!
//! The site's score is the mean score of its members.  Denser clusters
//! claim first, so a point between two groups joins the larger one and no
//! point is counted twice.
//!
//! Candidates at identical coordinates always share a proximity set, so
//! they are always claimed together.

use geo::{Centroid, ConvexHull, Distance, Euclidean, MultiPoint, Point};
use rstar::RTree;
use rstar::primitives::GeomWithData;

use sf_core::CandidateId;
use sf_score::ScoredCandidate;

use crate::{SelectError, SelectResult};

const RADIUS_SLACK: f64 = 1e-9;

/// A consolidated site.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MergedSite {
    pub point: Point<f64>,
    /// Mean score of the merged candidates.
    pub score: f64,
    pub merge_count: usize,
    /// Positions of the merged candidates in the input slice; the seed
    /// candidate is among them.
    pub members: Vec<CandidateId>,
}

impl MergedSite {
    /// The site as a candidate, e.g. to feed it back through [`merge`].
    pub fn as_candidate(&self) -> ScoredCandidate {
        ScoredCandidate::new(self.point, self.score)
    }
}

/// Merges candidates closer than a minimum separation.
#[derive(Copy, Clone, Debug)]
pub struct SiteConsolidator {
    distance_min: f64,
}

impl SiteConsolidator {
    pub fn new(distance_min: f64) -> SelectResult<Self> {
        if !(distance_min.is_finite() && distance_min >= 0.0) {
            return Err(SelectError::InvalidDistance(distance_min));
        }
        Ok(Self { distance_min })
    }

    pub fn distance_min(&self) -> f64 {
        self.distance_min
    }

    /// Consolidate `top` into sites, densest cluster first.
    pub fn merge(&self, top: &[ScoredCandidate]) -> SelectResult<Vec<MergedSite>> {
        if top.is_empty() {
            return Err(SelectError::EmptyInput { stage: "merge" });
        }

        let proximity = self.proximity_sets(top);

        let mut order: Vec<usize> = (0..top.len()).collect();
        order.sort_by(|&a, &b| proximity[b].len().cmp(&proximity[a].len()));

        let mut claimed = vec![false; top.len()];
        let mut sites = Vec::new();
        for seed in order {
            if claimed[seed] {
                continue;
            }
            let members: Vec<usize> = proximity[seed]
                .iter()
                .copied()
                .filter(|&j| !claimed[j])
                .collect();
            for &j in &members {
                claimed[j] = true;
            }
            sites.push(build_site(top, &members));
        }

        log::info!(
            "merged {} candidates into {} sites (distance_min = {})",
            top.len(),
            sites.len(),
            self.distance_min
        );
        Ok(sites)
    }

    /// Proximity set of every candidate, each sorted ascending.
    fn proximity_sets(&self, top: &[ScoredCandidate]) -> Vec<Vec<usize>> {
        let entries = top
            .iter()
            .enumerate()
            .map(|(i, c)| GeomWithData::new([c.point.x(), c.point.y()], i))
            .collect();
        let tree: RTree<GeomWithData<[f64; 2], usize>> = RTree::bulk_load(entries);
        let query_2 = self.distance_min * self.distance_min * (1.0 + RADIUS_SLACK);

        top.iter()
            .map(|c| {
                let mut set: Vec<usize> = tree
                    .locate_within_distance([c.point.x(), c.point.y()], query_2)
                    .map(|e| e.data)
                    .filter(|&j| Euclidean.distance(&c.point, &top[j].point) <= self.distance_min)
                    .collect();
                set.sort_unstable();
                set
            })
            .collect()
    }
}

/// One-shot form of [`SiteConsolidator::merge`].
pub fn merge(top: &[ScoredCandidate], distance_min: f64) -> SelectResult<Vec<MergedSite>> {
    SiteConsolidator::new(distance_min)?.merge(top)
}

fn build_site(top: &[ScoredCandidate], members: &[usize]) -> MergedSite {
    let points: Vec<Point<f64>> = members.iter().map(|&j| top[j].point).collect();
    let score = members.iter().map(|&j| top[j].score).sum::<f64>() / members.len() as f64;

    MergedSite {
        point: representative(&points),
        score,
        merge_count: members.len(),
        members: members.iter().map(|&j| CandidateId(j as u32)).collect(),
    }
}

fn representative(points: &[Point<f64>]) -> Point<f64> {
    match points {
        [p] => *p,
        [a, b] => Point::new((a.x() + b.x()) / 2.0, (a.y() + b.y()) / 2.0),
        _ => MultiPoint::from(points.to_vec())
            .convex_hull()
            .centroid()
            .unwrap_or_else(|| mean_point(points)),
    }
}

fn mean_point(points: &[Point<f64>]) -> Point<f64> {
    let n = points.len() as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x(), sy + p.y()));
    Point::new(sx / n, sy / n)
}
