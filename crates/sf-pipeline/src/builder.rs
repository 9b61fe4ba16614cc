//! Fluent builder for constructing a [`Pipeline`].

use std::collections::HashMap;

use geo::{Geometry, Point};

use sf_core::SiteConfig;
use sf_network::WeightedNetwork;
use sf_score::{FacilitySet, Hub, HubSet};

use crate::{Pipeline, PipelineError, PipelineResult};

/// Where the road network comes from.
enum RoadSource {
    Built(WeightedNetwork),
    Records(Vec<(Geometry<f64>, f64)>),
}

/// Fluent builder for [`Pipeline`].
///
/// # Required inputs
///
/// - [`SiteConfig`], validated in [`build`](Self::build)
/// - a road network, via `.network(n)` or `.roads(records)`
/// - regional demand, via `.regional_demand(map)`
///
/// # Optional inputs (have defaults)
///
/// | Method               | Default                                   |
/// |----------------------|-------------------------------------------|
/// | `.hubs(v)`           | No hubs                                   |
/// | `.hub_areas(v)`      | No hubs                                   |
/// | `.facilities(v)`     | No facilities                             |
/// | `.competitors(v)`    | No competitors (penalty becomes a no-op)  |
/// | `.candidates(v)`     | Lattice over the network's bounding box   |
pub struct PipelineBuilder {
    config: SiteConfig,
    roads: Option<RoadSource>,
    hubs: Vec<Hub>,
    hub_areas: Vec<(Geometry<f64>, f64)>,
    facilities: Vec<Point<f64>>,
    competitors: Vec<Point<f64>>,
    candidates: Option<Vec<Point<f64>>>,
    regional_demand: Option<HashMap<String, f64>>,
}

impl PipelineBuilder {
    pub fn new(config: SiteConfig) -> Self {
        Self {
            config,
            roads: None,
            hubs: Vec::new(),
            hub_areas: Vec::new(),
            facilities: Vec::new(),
            competitors: Vec::new(),
            candidates: None,
            regional_demand: None,
        }
    }

    /// Supply a pre-built road network.
    pub fn network(mut self, network: WeightedNetwork) -> Self {
        self.roads = Some(RoadSource::Built(network));
        self
    }

    /// Supply raw `(geometry, weight)` road records, built into a network
    /// in [`build`](Self::build).
    pub fn roads(mut self, records: Vec<(Geometry<f64>, f64)>) -> Self {
        self.roads = Some(RoadSource::Records(records));
        self
    }

    /// Hubs with known locations and normalized capacities.
    pub fn hubs(mut self, hubs: Vec<Hub>) -> Self {
        self.hubs.extend(hubs);
        self
    }

    /// Hub areas with raw capacities; see [`Hub::from_areas`].  Combined
    /// with any `.hubs(..)`.
    pub fn hub_areas(mut self, areas: Vec<(Geometry<f64>, f64)>) -> Self {
        self.hub_areas = areas;
        self
    }

    /// Existing facilities.  They only affect scores when
    /// `include_facility_penalty` is set in the config.
    pub fn facilities(mut self, locations: Vec<Point<f64>>) -> Self {
        self.facilities = locations;
        self
    }

    /// Competitor stations, used when the config carries a `competitor`
    /// penalty.
    pub fn competitors(mut self, locations: Vec<Point<f64>>) -> Self {
        self.competitors = locations;
        self
    }

    /// Score these points instead of the generated lattice.
    pub fn candidates(mut self, points: Vec<Point<f64>>) -> Self {
        self.candidates = Some(points);
        self
    }

    /// Demand per region.  Only the total is used.
    pub fn regional_demand(mut self, demand: HashMap<String, f64>) -> Self {
        self.regional_demand = Some(demand);
        self
    }

    /// Validate inputs, index everything, and return a ready-to-run
    /// [`Pipeline`].
    pub fn build(self) -> PipelineResult<Pipeline> {
        self.config.validate()?;
        let tiers = self.config.tier_table()?;

        let network = match self.roads {
            Some(RoadSource::Built(network)) => network,
            Some(RoadSource::Records(records)) => WeightedNetwork::build(records)?,
            None => return Err(PipelineError::Config("no road network supplied".into())),
        };
        let regional_demand = self
            .regional_demand
            .ok_or_else(|| PipelineError::Config("no regional demand supplied".into()))?;

        let mut hubs = self.hubs;
        if !self.hub_areas.is_empty() {
            hubs.extend(Hub::from_areas(&self.hub_areas)?);
        }

        if self.config.competitor.is_some() && self.competitors.is_empty() {
            log::warn!("competitor penalty configured but no competitor stations supplied");
        }
        if self.config.include_facility_penalty && self.facilities.is_empty() {
            log::warn!("facility penalty enabled but no facilities supplied");
        }

        log::debug!(
            "pipeline inputs: {} road parts, {} hubs, {} facilities, {} competitors",
            network.len(),
            hubs.len(),
            self.facilities.len(),
            self.competitors.len()
        );

        Ok(Pipeline {
            config: self.config,
            tiers,
            network,
            hubs: HubSet::new(hubs),
            facilities: FacilitySet::new(self.facilities),
            competitors: FacilitySet::new(self.competitors),
            candidates: self.candidates,
            regional_demand,
        })
    }
}
