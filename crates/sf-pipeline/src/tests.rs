//! Unit tests for sf-pipeline.

#[cfg(test)]
mod helpers {
    use std::collections::HashMap;

    use geo::{Geometry, LineString, Point};

    use sf_core::SiteConfig;
    use sf_network::WeightedNetwork;
    use sf_score::Hub;

    use crate::PipelineBuilder;

    pub fn road(coords: &[(f64, f64)]) -> Geometry<f64> {
        Geometry::LineString(LineString::from(coords.to_vec()))
    }

    /// One 10 km road along the x axis with a full-capacity hub at its middle.
    pub fn network() -> WeightedNetwork {
        WeightedNetwork::build([(road(&[(0.0, 0.0), (10_000.0, 0.0)]), 1.0)]).unwrap()
    }

    /// Thresholds: small 500, medium 1000, large 2000.
    pub fn config() -> SiteConfig {
        let mut config = SiteConfig::new([1_000.0, 2_000.0, 4_000.0], [0.5, 0.5, 0.5]);
        config.grid_step = 1_000.0;
        config.top_n = 5;
        config.distance_min = 1_500.0;
        config
    }

    pub fn demand(total: f64) -> HashMap<String, f64> {
        HashMap::from([("north".to_string(), total * 0.25), ("south".to_string(), total * 0.75)])
    }

    pub fn builder(config: SiteConfig) -> PipelineBuilder {
        PipelineBuilder::new(config)
            .network(network())
            .hubs(vec![Hub::new(Point::new(5_000.0, 0.0), 1.0)])
            .regional_demand(demand(3_000.0))
    }
}

// ── Builder validation ────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use geo::{Geometry, Point};

    use sf_core::SfError;
    use sf_network::NetworkError;
    use sf_score::ScoreError;

    use super::helpers::{config, demand, network, road};
    use crate::{PipelineBuilder, PipelineError};

    #[test]
    fn network_is_required() {
        let err = PipelineBuilder::new(config())
            .regional_demand(demand(1.0))
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, PipelineError::Config(_)));
    }

    #[test]
    fn regional_demand_is_required() {
        let err = PipelineBuilder::new(config()).network(network()).build().err().unwrap();
        assert!(matches!(err, PipelineError::Config(_)));
    }

    #[test]
    fn invalid_config_rejected() {
        let mut bad = config();
        bad.top_n = 0;
        let err = PipelineBuilder::new(bad)
            .network(network())
            .regional_demand(demand(1.0))
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, PipelineError::Core(SfError::Config(_))));
    }

    #[test]
    fn bad_road_record_surfaces_as_network_error() {
        let err = PipelineBuilder::new(config())
            .roads(vec![
                (road(&[(0.0, 0.0), (1.0, 0.0)]), 0.5),
                (Geometry::Point(Point::new(3.0, 3.0)), 0.5),
            ])
            .regional_demand(demand(1.0))
            .build()
            .err()
            .unwrap();
        assert!(matches!(
            err,
            PipelineError::Network(NetworkError::InvalidGeometry { index: 1, .. })
        ));
    }

    #[test]
    fn single_hub_area_cannot_be_normalized() {
        let area = road(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 0.0)]);
        let err = PipelineBuilder::new(config())
            .network(network())
            .hub_areas(vec![(area, 100.0)])
            .regional_demand(demand(1.0))
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, PipelineError::Score(ScoreError::Core(_))));
    }

    #[test]
    fn road_records_build_the_network() {
        let pipeline = PipelineBuilder::new(config())
            .roads(vec![(road(&[(0.0, 0.0), (5_000.0, 0.0)]), 0.5)])
            .regional_demand(demand(1.0))
            .build()
            .unwrap();
        assert_eq!(pipeline.network.len(), 1);
    }
}

// ── Full runs ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run {
    use geo::Point;

    use sf_core::{CapacityTier, CompetitorPenalty};

    use super::helpers::{builder, config};

    #[test]
    fn ranks_merges_and_sizes() {
        let output = builder(config()).build().unwrap().run().unwrap();

        // 11 × 1 lattice along the road.
        assert_eq!(output.ranked.len(), 11);
        assert_eq!(output.ranked[0].point, Point::new(5_000.0, 0.0));
        assert!((output.ranked[0].score - 27.0).abs() < 1e-9);

        // Top 5 are x = 3000..=7000; the middle three merge.
        assert_eq!(output.merged.len(), 3);
        assert_eq!(output.merged[0].merge_count, 3);
        let merged: usize = output.merged.iter().map(|s| s.merge_count).sum();
        assert_eq!(merged, 5);

        let total: f64 = output.sized.iter().map(|s| s.estimated_demand).sum();
        assert!((total - 3_000.0).abs() < 1e-6);
        assert_eq!(output.sized[0].tier, CapacityTier::Medium);
        assert!(output.sized.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn runs_are_repeatable() {
        let pipeline = builder(config()).build().unwrap();
        let a = pipeline.run().unwrap();
        let b = pipeline.run().unwrap();
        assert_eq!(a.ranked, b.ranked);
        assert_eq!(a.merged, b.merged);
        assert_eq!(a.sized, b.sized);
    }

    #[test]
    fn supplied_candidates_replace_the_lattice() {
        let output = builder(config())
            .candidates(vec![Point::new(5_000.0, 0.0), Point::new(5_000.0, 20_000.0)])
            .build()
            .unwrap()
            .run()
            .unwrap();
        assert_eq!(output.ranked.len(), 2);
        assert_eq!(output.ranked[1].score, 0.0);
    }

    #[test]
    fn snapping_moves_sites_onto_the_road() {
        let mut cfg = config();
        cfg.snap_to_road = true;
        let output = builder(cfg)
            .candidates(vec![Point::new(2_500.0, 300.0)])
            .build()
            .unwrap()
            .run()
            .unwrap();
        assert_eq!(output.sized[0].point, Point::new(0.0, 0.0));
    }

    #[test]
    fn competitors_lower_scores() {
        let plain = builder(config()).build().unwrap().run().unwrap();

        let mut cfg = config();
        cfg.competitor = Some(CompetitorPenalty::default());
        let penalized = builder(cfg)
            .competitors(vec![Point::new(50_000.0, 0.0)])
            .build()
            .unwrap()
            .run()
            .unwrap();

        let sum = |sites: &[sf_select::MergedSite]| sites.iter().map(|s| s.score).sum::<f64>();
        assert!(sum(&penalized.merged) < sum(&plain.merged));
        // The ranking itself is untouched.
        assert_eq!(plain.ranked, penalized.ranked);
    }

    #[test]
    fn penalty_without_competitors_is_a_no_op() {
        let plain = builder(config()).build().unwrap().run().unwrap();
        let mut cfg = config();
        cfg.competitor = Some(CompetitorPenalty::default());
        let output = builder(cfg).build().unwrap().run().unwrap();
        assert_eq!(plain.sized, output.sized);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn output_serializes_to_json() {
        let output = builder(config()).build().unwrap().run().unwrap();
        let json = serde_json::to_string(&output).unwrap();
        assert!(json.contains("\"tier\":\"medium\""));
        assert!(json.contains("\"merge_count\":3"));
    }
}
