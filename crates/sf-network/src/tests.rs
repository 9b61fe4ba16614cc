//! Unit tests for sf-network.
//!
//! All tests use hand-built geometry in a planar metre grid.

#[cfg(test)]
mod helpers {
    use geo::{Geometry, LineString};

    pub fn line(coords: &[(f64, f64)]) -> LineString<f64> {
        LineString::from(coords.to_vec())
    }

    pub fn road(coords: &[(f64, f64)]) -> Geometry<f64> {
        Geometry::LineString(line(coords))
    }
}

// ── Builder & network structure ───────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use geo::{Geometry, Line, MultiLineString, Point, coord};

    use super::helpers::{line, road};
    use crate::{NetworkError, Segment, WeightedNetwork, WeightedNetworkBuilder};
    use sf_core::{SegmentId, min_max_normalize};

    #[test]
    fn empty_build() {
        let net = WeightedNetwork::empty();
        assert!(net.is_empty());
        assert_eq!(net.len(), 0);
        assert!(net.bounds().is_none());
        assert!(net.nearest(Point::new(0.0, 0.0)).is_none());
        assert!(net.within(Point::new(0.0, 0.0), 1e9).is_empty());
    }

    #[test]
    fn single_curve_keeps_weight() {
        let net = WeightedNetwork::build([(road(&[(0.0, 0.0), (100.0, 0.0)]), 0.3)]).unwrap();
        assert_eq!(net.len(), 1);
        assert_eq!(net.weight(SegmentId(0)), 0.3);
    }

    #[test]
    fn multi_curve_is_expanded_sharing_weight() {
        let multi = Geometry::MultiLineString(MultiLineString::new(vec![
            line(&[(0.0, 0.0), (10.0, 0.0)]),
            line(&[(0.0, 5.0), (10.0, 5.0)]),
            line(&[(0.0, 9.0), (10.0, 9.0)]),
        ]));
        let net = WeightedNetwork::build([(multi, 0.7)]).unwrap();
        assert_eq!(net.len(), 3);
        for (_, seg) in net.iter() {
            assert!(matches!(seg, Segment::Single { weight, .. } if *weight == 0.7));
        }
    }

    #[test]
    fn weighted_multi_uses_mean_weight() {
        let mut b = WeightedNetworkBuilder::new();
        b.add_weighted_multi(vec![
            (line(&[(0.0, 0.0), (10.0, 0.0)]), 0.2),
            (line(&[(0.0, 5.0), (10.0, 5.0)]), 0.6),
        ])
        .unwrap();
        let net = b.build();
        assert_eq!(net.len(), 1);
        assert!((net.weight(SegmentId(0)) - 0.4).abs() < 1e-12);
        // Distance is to the closer sub-curve.
        let d = net.segment(SegmentId(0)).distance_to(&Point::new(5.0, 7.0));
        assert!((d - 2.0).abs() < 1e-12);
    }

    #[test]
    fn straight_line_geometry_accepted() {
        let edge = Geometry::Line(Line::new(coord! { x: 0.0, y: 0.0 }, coord! { x: 3.0, y: 4.0 }));
        let net = WeightedNetwork::build([(edge, 0.5)]).unwrap();
        assert_eq!(net.len(), 1);
    }

    #[test]
    fn point_geometry_rejected_with_record_index() {
        let records = vec![
            (road(&[(0.0, 0.0), (1.0, 0.0)]), 0.1),
            (Geometry::Point(Point::new(3.0, 3.0)), 0.2),
        ];
        let err = WeightedNetwork::build(records).err().unwrap();
        match err {
            NetworkError::InvalidGeometry { index, reason } => {
                assert_eq!(index, 1);
                assert!(reason.contains("Point"), "{reason}");
            }
        }
    }

    #[test]
    fn degenerate_curves_rejected() {
        let mut b = WeightedNetworkBuilder::new();
        assert!(b.add(road(&[(0.0, 0.0)]), 0.1).is_err());
        assert!(b.add(road(&[(0.0, 0.0), (f64::NAN, 1.0)]), 0.1).is_err());
        assert!(
            b.add(Geometry::MultiLineString(MultiLineString::new(vec![])), 0.1)
                .is_err()
        );
        assert!(b.add_weighted_multi(vec![]).is_err());
        assert_eq!(b.segment_count(), 0);
    }

    #[test]
    fn bounds_cover_all_coordinates() {
        let net = WeightedNetwork::build([
            (road(&[(-5.0, 2.0), (10.0, 3.0)]), 0.1),
            (road(&[(4.0, -7.0), (6.0, 20.0)]), 0.9),
        ])
        .unwrap();
        let r = net.bounds().unwrap();
        assert_eq!((r.min().x, r.min().y), (-5.0, -7.0));
        assert_eq!((r.max().x, r.max().y), (10.0, 20.0));
    }

    #[test]
    fn normalized_weights_stay_in_unit_interval() {
        let raw = [120.0, 3_400.0, 980.0, 15.0, 2_200.0];
        let weights = min_max_normalize(&raw, "traffic").unwrap();
        let net = WeightedNetwork::build(weights.iter().enumerate().map(|(i, &w)| {
            let y = i as f64 * 100.0;
            (road(&[(0.0, y), (50.0, y)]), w)
        }))
        .unwrap();
        for (id, _) in net.iter() {
            let w = net.weight(id);
            assert!((0.0..=1.0).contains(&w), "weight {w}");
        }
    }
}

// ── Dissolving overlapping records ────────────────────────────────────────────

#[cfg(test)]
mod dissolve {
    use geo::{Coord, Point};

    use super::helpers::{line, road};
    use crate::{Segment, WeightedNetwork};
    use sf_core::SegmentId;

    fn coords(seg: &Segment) -> Vec<Vec<Coord<f64>>> {
        seg.lines().iter().map(|l| l.0.clone()).collect()
    }

    #[test]
    fn duplicate_record_is_dropped() {
        let net = WeightedNetwork::build([
            (road(&[(-1_000.0, 0.0), (1_000.0, 0.0)]), 0.8),
            (road(&[(-1_000.0, 0.0), (1_000.0, 0.0)]), 0.8),
        ])
        .unwrap();
        assert_eq!(net.len(), 1);
        assert_eq!(net.within(Point::new(0.0, 0.0), 500.0).len(), 1);
    }

    #[test]
    fn reversed_duplicate_is_dropped() {
        let net = WeightedNetwork::build([
            (road(&[(0.0, 0.0), (100.0, 0.0), (100.0, 100.0)]), 0.5),
            (road(&[(100.0, 100.0), (100.0, 0.0), (0.0, 0.0)]), 0.9),
        ])
        .unwrap();
        assert_eq!(net.len(), 1);
        assert_eq!(net.weight(SegmentId(0)), 0.5);
    }

    #[test]
    fn overlap_goes_to_the_first_record() {
        let net = WeightedNetwork::build([
            (road(&[(-1_000.0, 0.0), (500.0, 0.0)]), 0.8),
            (road(&[(-500.0, 0.0), (1_000.0, 0.0)]), 0.3),
        ])
        .unwrap();
        assert_eq!(net.len(), 2);
        assert_eq!(
            net.segment(SegmentId(1)),
            &Segment::Single { line: line(&[(500.0, 0.0), (1_000.0, 0.0)]), weight: 0.3 }
        );
        // The trimmed part ends exactly where the first one does.
        let hits = net.within(Point::new(0.0, 0.0), 500.0);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[1], (SegmentId(1), 500.0));
    }

    #[test]
    fn covered_middle_splits_into_pieces_sharing_weight() {
        let net = WeightedNetwork::build([
            (road(&[(-100.0, 0.0), (100.0, 0.0)]), 0.2),
            (road(&[(-300.0, 0.0), (0.0, 0.0), (300.0, 0.0)]), 0.6),
        ])
        .unwrap();
        assert_eq!(net.len(), 2);
        let seg = net.segment(SegmentId(1));
        assert!(matches!(seg, Segment::Multi { weights, .. } if weights == &vec![0.6, 0.6]));
        assert_eq!(
            coords(seg),
            vec![
                vec![Coord { x: -300.0, y: 0.0 }, Coord { x: -100.0, y: 0.0 }],
                vec![Coord { x: 100.0, y: 0.0 }, Coord { x: 300.0, y: 0.0 }],
            ]
        );
        assert_eq!(net.weight(SegmentId(1)), 0.6);
    }

    #[test]
    fn uncovered_vertices_stay_joined() {
        let net = WeightedNetwork::build([
            (road(&[(0.0, 0.0), (10.0, 0.0)]), 0.2),
            (road(&[(0.0, 0.0), (20.0, 0.0), (20.0, 20.0), (40.0, 20.0)]), 0.6),
        ])
        .unwrap();
        assert_eq!(
            coords(net.segment(SegmentId(1))),
            vec![vec![
                Coord { x: 10.0, y: 0.0 },
                Coord { x: 20.0, y: 0.0 },
                Coord { x: 20.0, y: 20.0 },
                Coord { x: 40.0, y: 20.0 },
            ]]
        );
    }

    #[test]
    fn crossing_roads_are_left_whole() {
        let net = WeightedNetwork::build([
            (road(&[(-100.0, 0.0), (100.0, 0.0)]), 0.2),
            (road(&[(0.0, -100.0), (0.0, 100.0)]), 0.6),
            (road(&[(100.0, 0.0), (200.0, 0.0)]), 0.4),
        ])
        .unwrap();
        assert_eq!(net.len(), 3);
        assert_eq!(coords(net.segment(SegmentId(1))).len(), 1);
        assert_eq!(coords(net.segment(SegmentId(2))).len(), 1);
    }

    #[test]
    fn overlap_inside_a_multi_record_is_trimmed() {
        let mut b = crate::WeightedNetworkBuilder::new();
        b.add(road(&[(0.0, 0.0), (100.0, 0.0)]), 0.1).unwrap();
        b.add_weighted_multi(vec![
            (line(&[(0.0, 0.0), (100.0, 0.0)]), 0.9),
            (line(&[(0.0, 50.0), (100.0, 50.0)]), 0.5),
        ])
        .unwrap();
        let net = b.build();
        assert_eq!(net.len(), 2);
        assert_eq!(coords(net.segment(SegmentId(1))).len(), 1);
        assert_eq!(net.weight(SegmentId(1)), 0.5);
    }
}

// ── Spatial queries ───────────────────────────────────────────────────────────

#[cfg(test)]
mod queries {
    use geo::Point;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use super::helpers::road;
    use crate::WeightedNetwork;
    use sf_core::SegmentId;

    #[test]
    fn within_filters_by_exact_distance() {
        let net = WeightedNetwork::build([(road(&[(0.0, 0.0), (1_000.0, 0.0)]), 0.8)]).unwrap();
        let hits = net.within(Point::new(500.0, 499.5), 500.0);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].0, SegmentId(0));
        assert!((hits[0].1 - 499.5).abs() < 1e-9);
        assert!(net.within(Point::new(500.0, 500.5), 500.0).is_empty());
    }

    #[test]
    fn nearest_returns_closest_part() {
        let net = WeightedNetwork::build([
            (road(&[(0.0, 0.0), (100.0, 0.0)]), 0.1),
            (road(&[(0.0, 50.0), (100.0, 50.0)]), 0.9),
        ])
        .unwrap();
        let (id, d) = net.nearest(Point::new(30.0, 40.0)).unwrap();
        assert_eq!(id, SegmentId(1));
        assert!((d - 10.0).abs() < 1e-12);
        assert_eq!(net.weight(id), 0.9);
    }

    #[test]
    fn within_matches_full_scan() {
        let mut rng = SmallRng::seed_from_u64(7);
        let records: Vec<_> = (0..200)
            .map(|_| {
                let x = rng.gen_range(0.0..10_000.0);
                let y = rng.gen_range(0.0..10_000.0);
                let coords = [
                    (x, y),
                    (x + rng.gen_range(-800.0..800.0), y + rng.gen_range(-800.0..800.0)),
                    (x + rng.gen_range(-800.0..800.0), y + rng.gen_range(-800.0..800.0)),
                ];
                (road(&coords), rng.gen_range(0.0..1.0))
            })
            .collect();
        let net = WeightedNetwork::build(records).unwrap();

        for _ in 0..100 {
            let p = Point::new(rng.gen_range(0.0..10_000.0), rng.gen_range(0.0..10_000.0));
            let indexed = net.within(p, 500.0);
            let scanned: Vec<_> = net
                .iter()
                .map(|(id, seg)| (id, seg.distance_to(&p)))
                .filter(|&(_, d)| d <= 500.0)
                .collect();
            assert_eq!(indexed, scanned);
        }
    }
}

// ── Road snapping ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod snap {
    use geo::Point;

    use super::helpers::road;
    use crate::WeightedNetwork;

    #[test]
    fn empty_network_has_nothing_to_snap_to() {
        assert!(WeightedNetwork::empty().snap(Point::new(1.0, 1.0)).is_none());
    }

    #[test]
    fn snaps_to_closest_vertex_of_nearest_road() {
        let net = WeightedNetwork::build([
            (road(&[(0.0, 0.0), (100.0, 0.0), (200.0, 0.0)]), 0.5),
            (road(&[(0.0, 1_000.0), (200.0, 1_000.0)]), 0.5),
        ])
        .unwrap();
        assert_eq!(net.snap(Point::new(90.0, 30.0)), Some(Point::new(100.0, 0.0)));
    }

    #[test]
    fn nearby_junction_switches_road() {
        // Horizontal road with vertices only at its ends; vertical road
        // crossing it at the origin with a vertex just below the crossing.
        let net = WeightedNetwork::build([
            (road(&[(-1_000.0, 0.0), (1_000.0, 0.0)]), 0.5),
            (road(&[(0.0, -1_000.0), (0.0, -5.0), (0.0, 1_000.0)]), 0.5),
        ])
        .unwrap();
        // Nearest road is the horizontal one (20 m); the crossing is ~36 m
        // away, inside the 3 × 20 m bound, so the vertical road wins.
        assert_eq!(net.snap(Point::new(30.0, 20.0)), Some(Point::new(0.0, -5.0)));
    }

    #[test]
    fn distant_junction_is_ignored() {
        let net = WeightedNetwork::build([
            (road(&[(-1_000.0, 0.0), (1_000.0, 0.0)]), 0.5),
            (road(&[(0.0, -1_000.0), (0.0, -5.0), (0.0, 1_000.0)]), 0.5),
        ])
        .unwrap();
        // 10 m from the horizontal road, crossing ~800 m away.
        assert_eq!(net.snap(Point::new(800.0, 10.0)), Some(Point::new(1_000.0, 0.0)));
    }
}
