//! Point-located scoring inputs: logistics hubs and existing facilities.
//!
//! Both sets are bulk-loaded into an R-tree so a scoring call visits only the
//! points inside `max_distance`.  Hits are returned in input order, which
//! keeps floating-point sums identical to a full scan.

use geo::{Centroid, Distance, Euclidean, Geometry, Point};
use rstar::RTree;
use rstar::primitives::GeomWithData;

use sf_core::min_max_normalize;

use crate::{ScoreError, ScoreResult};

/// Same role as the network's radius slack: let rounding in the squared
/// index distance err towards inclusion; the exact distance decides.
const RADIUS_SLACK: f64 = 1e-9;

type IndexedPoint = GeomWithData<[f64; 2], u32>;

/// R-tree over a slice of points, returning input positions.
struct PointIndex {
    tree: RTree<IndexedPoint>,
}

impl PointIndex {
    fn new<'a>(points: impl Iterator<Item = &'a Point<f64>>) -> Self {
        let entries = points
            .enumerate()
            .map(|(i, p)| GeomWithData::new([p.x(), p.y()], i as u32))
            .collect();
        Self { tree: RTree::bulk_load(entries) }
    }

    /// Positions of every point within `radius` of `p`, ascending.
    fn within(&self, p: Point<f64>, radius: f64) -> Vec<usize> {
        let mut hits: Vec<usize> = self
            .tree
            .locate_within_distance([p.x(), p.y()], radius * radius * (1.0 + RADIUS_SLACK))
            .map(|e| e.data as usize)
            .collect();
        hits.sort_unstable();
        hits
    }
}

// ── Hubs ──────────────────────────────────────────────────────────────────────

/// A logistics or production centre.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Hub {
    pub location: Point<f64>,
    /// Surface of the hub area, min-max normalized over all hubs.
    pub capacity: f64,
}

impl Hub {
    pub fn new(location: Point<f64>, capacity: f64) -> Self {
        Self { location, capacity }
    }

    /// Hubs from `(area, surface)` records: each hub sits at its area's
    /// centroid, and surfaces are min-max normalized into capacities.
    ///
    /// Fails with a normalization error when every surface is equal
    /// (including the single-hub case).
    pub fn from_areas(areas: &[(Geometry<f64>, f64)]) -> ScoreResult<Vec<Hub>> {
        let surfaces: Vec<f64> = areas.iter().map(|(_, s)| *s).collect();
        let capacities = min_max_normalize(&surfaces, "hub surface")?;

        areas
            .iter()
            .zip(capacities)
            .enumerate()
            .map(|(index, ((area, _), capacity))| {
                area.centroid()
                    .map(|location| Hub { location, capacity })
                    .ok_or(ScoreError::InvalidHubArea { index })
            })
            .collect()
    }
}

/// Indexed, read-only hub collection.
pub struct HubSet {
    hubs: Vec<Hub>,
    index: PointIndex,
}

impl HubSet {
    pub fn new(hubs: Vec<Hub>) -> Self {
        if let Some(h) = hubs.iter().find(|h| !(0.0..=1.0).contains(&h.capacity)) {
            log::warn!("hub at {:?} has capacity {} outside [0, 1]", h.location, h.capacity);
        }
        let index = PointIndex::new(hubs.iter().map(|h| &h.location));
        Self { hubs, index }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.hubs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hubs.is_empty()
    }

    pub fn hubs(&self) -> &[Hub] {
        &self.hubs
    }

    /// Hubs within `radius` of `p` with their exact distances, input order.
    pub fn within(&self, p: Point<f64>, radius: f64) -> impl Iterator<Item = (&Hub, f64)> + '_ {
        self.index.within(p, radius).into_iter().filter_map(move |i| {
            let hub = &self.hubs[i];
            let d = Euclidean.distance(&p, &hub.location);
            (d <= radius).then_some((hub, d))
        })
    }
}

// ── Existing facilities ───────────────────────────────────────────────────────

/// Indexed, read-only set of existing stations (own network or competitors).
pub struct FacilitySet {
    locations: Vec<Point<f64>>,
    index: PointIndex,
}

impl FacilitySet {
    pub fn new(locations: Vec<Point<f64>>) -> Self {
        let index = PointIndex::new(locations.iter());
        Self { locations, index }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn locations(&self) -> &[Point<f64>] {
        &self.locations
    }

    /// Exact distances to every facility within `radius` of `p`, input order.
    pub fn distances_within(&self, p: Point<f64>, radius: f64) -> impl Iterator<Item = f64> + '_ {
        self.index.within(p, radius).into_iter().filter_map(move |i| {
            let d = Euclidean.distance(&p, &self.locations[i]);
            (d <= radius).then_some(d)
        })
    }
}
