//! Weighted network representation and builder.
//!
//! # Data layout
//!
//! Parts are stored in input order and addressed by `SegmentId`.  Every
//! straight edge (consecutive coordinate pair) of every part is bulk-loaded
//! into an R-tree tagged with its owning `SegmentId`, so a radius query
//! touches only the parts that can possibly be in range:
//!
//! ```text
//! locate_within_distance(p, r²)  →  edges  →  distinct SegmentIds  →  exact distance
//! ```
//!
//! The final distance is always recomputed against the full part geometry,
//! so indexed queries return exactly what a scan over every part would.

use geo::{Geometry, Line, LineString, Point, Rect, coord};
use rstar::{AABB, PointDistance, RTree, RTreeObject};

use sf_core::SegmentId;

use crate::dissolve::dissolve;
use crate::{NetworkError, NetworkResult, Segment};

/// Relative slack on the squared search radius.  The R-tree's edge distance
/// and the exact curve distance round differently; the slack keeps boundary
/// parts in the candidate set and the exact check decides.
const RADIUS_SLACK: f64 = 1e-9;

// ── R-tree edge entry ─────────────────────────────────────────────────────────

/// One straight edge of a network part.
#[derive(Clone)]
pub(crate) struct EdgeEntry {
    from: [f64; 2],
    to: [f64; 2],
    id: SegmentId,
}

impl EdgeEntry {
    pub(crate) fn new(edge: Line<f64>, id: SegmentId) -> Self {
        Self { from: [edge.start.x, edge.start.y], to: [edge.end.x, edge.end.y], id }
    }

    pub(crate) fn line(&self) -> Line<f64> {
        Line::new(
            coord! { x: self.from[0], y: self.from[1] },
            coord! { x: self.to[0], y: self.to[1] },
        )
    }
}

impl RTreeObject for EdgeEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.from, self.to)
    }
}

impl PointDistance for EdgeEntry {
    /// Squared distance from `point` to the closest point of the edge.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let d = [self.to[0] - self.from[0], self.to[1] - self.from[1]];
        let len_2 = d[0] * d[0] + d[1] * d[1];
        let t = if len_2 == 0.0 {
            0.0
        } else {
            (((point[0] - self.from[0]) * d[0] + (point[1] - self.from[1]) * d[1]) / len_2)
                .clamp(0.0, 1.0)
        };
        let dx = point[0] - (self.from[0] + t * d[0]);
        let dy = point[1] - (self.from[1] + t * d[1]);
        dx * dx + dy * dy
    }
}

// ── WeightedNetwork ───────────────────────────────────────────────────────────

/// All road parts of a territory, each carrying its traffic weight, plus a
/// spatial index for nearest and radius queries.
///
/// Immutable once built; share it by reference across scoring threads.
/// Construct with [`WeightedNetworkBuilder`] or [`WeightedNetwork::build`].
pub struct WeightedNetwork {
    segments: Vec<Segment>,
    bounds: Option<Rect<f64>>,
    spatial_idx: RTree<EdgeEntry>,
}

impl WeightedNetwork {
    /// A network with no parts.  Every query against it comes back empty.
    pub fn empty() -> Self {
        WeightedNetworkBuilder::new().build()
    }

    /// Build a network from `(geometry, weight)` records in one call.
    ///
    /// See [`WeightedNetworkBuilder::add`] for the accepted geometry types.
    pub fn build<I>(records: I) -> NetworkResult<Self>
    where
        I: IntoIterator<Item = (Geometry<f64>, f64)>,
    {
        let mut b = WeightedNetworkBuilder::new();
        for (geometry, weight) in records {
            b.add(geometry, weight)?;
        }
        Ok(b.build())
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn segment(&self, id: SegmentId) -> &Segment {
        &self.segments[id.index()]
    }

    /// Weight of the part `id` (mean of sub-curve weights for multi-curves).
    pub fn weight(&self, id: SegmentId) -> f64 {
        self.segments[id.index()].weight()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SegmentId, &Segment)> + '_ {
        self.segments
            .iter()
            .enumerate()
            .map(|(i, s)| (SegmentId(i as u32), s))
    }

    /// Axis-aligned bounding box of every coordinate.  `None` when empty.
    pub fn bounds(&self) -> Option<Rect<f64>> {
        self.bounds
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// The part closest to `p` and its distance.  `None` only when empty.
    pub fn nearest(&self, p: Point<f64>) -> Option<(SegmentId, f64)> {
        self.spatial_idx
            .nearest_neighbor(&[p.x(), p.y()])
            .map(|e| (e.id, self.segments[e.id.index()].distance_to(&p)))
    }

    /// Every part within `radius` of `p` (inclusive), with its distance,
    /// sorted by `SegmentId`.
    pub fn within(&self, p: Point<f64>, radius: f64) -> Vec<(SegmentId, f64)> {
        let query_2 = radius * radius * (1.0 + RADIUS_SLACK);
        let mut ids: Vec<SegmentId> = self
            .spatial_idx
            .locate_within_distance([p.x(), p.y()], query_2)
            .map(|e| e.id)
            .collect();
        ids.sort_unstable();
        ids.dedup();

        ids.into_iter()
            .filter_map(|id| {
                let d = self.segments[id.index()].distance_to(&p);
                (d <= radius).then_some((id, d))
            })
            .collect()
    }
}

// ── WeightedNetworkBuilder ────────────────────────────────────────────────────

/// Construct a [`WeightedNetwork`] incrementally, then call
/// [`build`](Self::build).
///
/// # Example
///
/// ```
/// use geo::{Geometry, LineString, MultiLineString};
/// use sf_network::WeightedNetworkBuilder;
///
/// let mut b = WeightedNetworkBuilder::new();
/// b.add(Geometry::LineString(LineString::from(vec![(0.0, 0.0), (10.0, 0.0)])), 0.4).unwrap();
/// b.add(
///     Geometry::MultiLineString(MultiLineString::new(vec![
///         LineString::from(vec![(0.0, 5.0), (10.0, 5.0)]),
///         LineString::from(vec![(0.0, 9.0), (10.0, 9.0)]),
///     ])),
///     0.8,
/// )
/// .unwrap();
/// let net = b.build();
/// assert_eq!(net.len(), 3); // the multi-curve is expanded
/// ```
pub struct WeightedNetworkBuilder {
    segments: Vec<Segment>,
    records: usize,
}

impl WeightedNetworkBuilder {
    pub fn new() -> Self {
        Self { segments: Vec::new(), records: 0 }
    }

    pub fn with_capacity(segments: usize) -> Self {
        Self { segments: Vec::with_capacity(segments), records: 0 }
    }

    /// Add one road record.
    ///
    /// A `Line` or `LineString` becomes one part.  A `MultiLineString` is expanded into
    /// one part per sub-curve, all sharing `weight`.  Any other geometry type
    /// is rejected with [`NetworkError::InvalidGeometry`].
    ///
    /// `weight` is expected to be min-max normalized already; values outside
    /// `[0, 1]` are accepted with a warning.
    pub fn add(&mut self, geometry: Geometry<f64>, weight: f64) -> NetworkResult<()> {
        let index = self.next_record();
        check_weight(index, weight);

        match geometry {
            Geometry::Line(edge) => {
                let line = LineString::from(vec![edge.start, edge.end]);
                check_line(index, &line)?;
                self.segments.push(Segment::Single { line, weight });
            }
            Geometry::LineString(line) => {
                check_line(index, &line)?;
                self.segments.push(Segment::Single { line, weight });
            }
            Geometry::MultiLineString(multi) => {
                if multi.0.is_empty() {
                    return Err(invalid(index, "MultiLineString has no sub-curves"));
                }
                for line in &multi.0 {
                    check_line(index, line)?;
                }
                self.segments.extend(
                    multi.0.into_iter().map(|line| Segment::Single { line, weight }),
                );
            }
            other => {
                return Err(invalid(
                    index,
                    format!("expected LineString or MultiLineString, got {}", geometry_kind(&other)),
                ));
            }
        }
        Ok(())
    }

    /// Add a multi-curve whose sub-curves are already individually weighted.
    ///
    /// Kept as a single part; its weight is the mean of the sub-curve weights.
    pub fn add_weighted_multi(&mut self, parts: Vec<(LineString<f64>, f64)>) -> NetworkResult<()> {
        let index = self.next_record();
        if parts.is_empty() {
            return Err(invalid(index, "weighted multi-curve has no sub-curves"));
        }
        for (line, weight) in &parts {
            check_line(index, line)?;
            check_weight(index, *weight);
        }
        let (lines, weights) = parts.into_iter().unzip();
        self.segments.push(Segment::Multi { lines, weights });
        Ok(())
    }

    /// Parts added so far (after multi-curve expansion).
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Consume the builder and produce a [`WeightedNetwork`].
    ///
    /// Parts are first dissolved into their union (see [`crate::dissolve`]),
    /// so a stretch of road recorded twice is only indexed and scored once.
    ///
    /// Time complexity: O(E log E) for the R-tree bulk load, E = total edges.
    pub fn build(self) -> WeightedNetwork {
        let segments = dissolve(self.segments);

        let mut entries = Vec::new();
        for (i, seg) in segments.iter().enumerate() {
            let id = SegmentId(i as u32);
            for line in seg.lines() {
                entries.extend(line.lines().map(|edge| EdgeEntry::new(edge, id)));
            }
        }

        let bounds = segments
            .iter()
            .filter_map(Segment::bounding_rect)
            .reduce(|a, b| {
                Rect::new(
                    coord! { x: a.min().x.min(b.min().x), y: a.min().y.min(b.min().y) },
                    coord! { x: a.max().x.max(b.max().x), y: a.max().y.max(b.max().y) },
                )
            });

        log::debug!(
            "built weighted network: {} parts, {} edges from {} records",
            segments.len(),
            entries.len(),
            self.records
        );

        WeightedNetwork {
            segments,
            bounds,
            spatial_idx: RTree::bulk_load(entries),
        }
    }

    fn next_record(&mut self) -> usize {
        let index = self.records;
        self.records += 1;
        index
    }
}

impl Default for WeightedNetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ── Validation helpers ────────────────────────────────────────────────────────

fn invalid(index: usize, reason: impl Into<String>) -> NetworkError {
    NetworkError::InvalidGeometry { index, reason: reason.into() }
}

fn check_line(index: usize, line: &LineString<f64>) -> NetworkResult<()> {
    if line.0.len() < 2 {
        return Err(invalid(
            index,
            format!("curve needs at least 2 coordinates, got {}", line.0.len()),
        ));
    }
    if line.coords().any(|c| !(c.x.is_finite() && c.y.is_finite())) {
        return Err(invalid(index, "curve has non-finite coordinates"));
    }
    Ok(())
}

fn check_weight(index: usize, weight: f64) {
    if !(0.0..=1.0).contains(&weight) {
        log::warn!("road record {index}: weight {weight} outside [0, 1]; was it normalized?");
    }
}

fn geometry_kind(g: &Geometry<f64>) -> &'static str {
    match g {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}
