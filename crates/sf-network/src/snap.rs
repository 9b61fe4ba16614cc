//! Move a site onto the road network.
//!
//! Grid candidates sit wherever the lattice put them, usually beside a road
//! rather than on it.  Snapping moves a site to a vertex of the nearest road,
//! preferring a junction when one is close:
//!
//! 1. Find the curve nearest to the site, at distance `d`.
//! 2. Scan the other curves.  Where one crosses the current curve at exactly
//!    one point within the search bound (initially `3 × d`) of the reference
//!    point, switch to that curve, move the reference point to the crossing,
//!    and set the bound to `2 ×` the crossing's distance.
//! 3. Return the vertex of the final curve closest to the reference point.

use geo::algorithm::line_intersection::{LineIntersection, line_intersection};
use geo::{BoundingRect, Coord, Distance, Euclidean, Intersects, LineString, Point};

use crate::WeightedNetwork;

impl WeightedNetwork {
    /// Snap `p` to a road vertex or nearby junction.  `None` only when the
    /// network is empty.
    pub fn snap(&self, p: Point<f64>) -> Option<Point<f64>> {
        let (seg, _) = self.nearest(p)?;

        let mut lines: Vec<&LineString<f64>> = Vec::new();
        let mut nearest = 0;
        let mut min_distance = f64::INFINITY;
        for (id, segment) in self.iter() {
            for line in segment.lines() {
                if id == seg {
                    let d = Euclidean.distance(&p, line);
                    if d < min_distance {
                        min_distance = d;
                        nearest = lines.len();
                    }
                }
                lines.push(line);
            }
        }

        let mut reference = p;
        let mut bound = min_distance * 3.0;
        for (i, line) in lines.iter().enumerate() {
            if i == nearest {
                continue;
            }
            let Some(crossing) = single_crossing(lines[nearest], line) else {
                continue;
            };
            let d = Euclidean.distance(&crossing, &reference);
            if d <= bound {
                nearest = i;
                reference = crossing;
                bound = d * 2.0;
            }
        }

        closest_vertex(lines[nearest], reference)
    }
}

/// The single point where `a` and `b` cross, if they meet at exactly one
/// point.  Overlapping (collinear) curves and multiple crossings yield `None`.
fn single_crossing(a: &LineString<f64>, b: &LineString<f64>) -> Option<Point<f64>> {
    let (ra, rb) = (a.bounding_rect()?, b.bounding_rect()?);
    if !ra.intersects(&rb) {
        return None;
    }

    let mut found: Option<Coord<f64>> = None;
    for ea in a.lines() {
        for eb in b.lines() {
            match line_intersection(ea, eb) {
                None => {}
                Some(LineIntersection::SinglePoint { intersection, .. }) => match found {
                    None => found = Some(intersection),
                    // Shared vertex reported by two adjacent edges.
                    Some(c) if c == intersection => {}
                    Some(_) => return None,
                },
                Some(LineIntersection::Collinear { .. }) => return None,
            }
        }
    }
    found.map(Point::from)
}

fn closest_vertex(line: &LineString<f64>, p: Point<f64>) -> Option<Point<f64>> {
    line.points()
        .map(|v| (Euclidean.distance(&v, &p), v))
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, v)| v)
}
