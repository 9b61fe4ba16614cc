//! Synthetic territory: a 60 × 40 km corridor in projected metres.
//!
//! Two motorways cross near the centre, a ring road links the towns, and a
//! handful of secondary roads branch off.  Traffic counts are raw
//! `(tmja, ratio_pl)` pairs, turned into weights the same way real count
//! data would be.

use anyhow::Result;
use geo::{Geometry, LineString, MultiLineString, Point, Rect, coord};

use sf_core::{heavy_vehicle_traffic, min_max_normalize};
use sf_network::{WeightedNetwork, WeightedNetworkBuilder};

/// `(polyline, tmja, ratio_pl)`.  Some ratios are mis-scaled (> 40).
type RoadRecord = (Vec<(f64, f64)>, f64, f64);

fn records() -> Vec<RoadRecord> {
    vec![
        // East-west motorway.
        (vec![(0.0, 20_000.0), (30_000.0, 21_000.0), (60_000.0, 20_000.0)], 42_000.0, 18.0),
        // North-south motorway, ratio recorded without the decimal point.
        (vec![(31_000.0, 0.0), (30_000.0, 21_000.0), (29_000.0, 40_000.0)], 35_000.0, 220.0),
        // Secondary roads.
        (vec![(5_000.0, 5_000.0), (15_000.0, 12_000.0), (30_000.0, 21_000.0)], 9_000.0, 8.0),
        (vec![(45_000.0, 35_000.0), (52_000.0, 28_000.0), (60_000.0, 20_000.0)], 7_500.0, 12.0),
        (vec![(10_000.0, 38_000.0), (18_000.0, 30_000.0)], 3_000.0, 5.0),
        (vec![(40_000.0, 2_000.0), (48_000.0, 9_000.0)], 4_200.0, 95.0),
    ]
}

/// Ring road around the eastern town, stored as one multi-part record.
fn ring() -> MultiLineString<f64> {
    MultiLineString::new(vec![
        LineString::from(vec![(44_000.0, 14_000.0), (50_000.0, 14_000.0), (50_000.0, 20_000.0)]),
        LineString::from(vec![(50_000.0, 20_000.0), (44_000.0, 20_000.0), (44_000.0, 14_000.0)]),
    ])
}

const RING_TMJA: f64 = 12_000.0;
const RING_RATIO: f64 = 10.0;

pub fn build_network() -> Result<WeightedNetwork> {
    let records = records();

    let mut traffic: Vec<f64> =
        records.iter().map(|(_, tmja, ratio)| heavy_vehicle_traffic(*tmja, *ratio)).collect();
    traffic.push(heavy_vehicle_traffic(RING_TMJA, RING_RATIO));
    let weights = min_max_normalize(&traffic, "heavy-vehicle traffic")?;

    let mut b = WeightedNetworkBuilder::with_capacity(records.len() + 2);
    for ((coords, _, _), &w) in records.into_iter().zip(&weights) {
        b.add(Geometry::LineString(LineString::from(coords)), w)?;
    }
    if let Some(&w) = weights.last() {
        b.add(Geometry::MultiLineString(ring()), w)?;
    }
    Ok(b.build())
}

/// Logistics areas `(footprint, surface m²)`.
pub fn hub_areas() -> Vec<(Geometry<f64>, f64)> {
    let area = |x: f64, y: f64, w: f64, h: f64| {
        Geometry::Polygon(
            Rect::new(coord! { x: x, y: y }, coord! { x: x + w, y: y + h }).to_polygon(),
        )
    };
    vec![
        (area(28_000.0, 18_000.0, 1_500.0, 1_000.0), 180_000.0),
        (area(47_000.0, 16_000.0, 800.0, 600.0), 60_000.0),
        (area(12_000.0, 10_000.0, 500.0, 400.0), 25_000.0),
    ]
}

/// Existing stations operated by us.
pub fn facilities() -> Vec<Point<f64>> {
    vec![Point::new(5_000.0, 20_000.0)]
}

/// Competitor stations.
pub fn competitors() -> Vec<Point<f64>> {
    vec![Point::new(55_000.0, 21_000.0), Point::new(31_500.0, 4_000.0)]
}
