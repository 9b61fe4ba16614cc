//! xsmall: smallest example for the rust_sf site-selection engine.
//!
//! Ranks a 1 km lattice over a synthetic 60 × 40 km territory, merges the
//! best candidates, and sizes the resulting stations against regional
//! demand.  Pass a JSON config path as the first argument to override the
//! embedded configuration; set `RUST_LOG=info` to follow the stages.

mod network;

use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;

use anyhow::Result;

use sf_core::SiteConfig;
use sf_pipeline::PipelineBuilder;

use network::{build_network, competitors, facilities, hub_areas};

// ── Configuration ─────────────────────────────────────────────────────────────

const CONFIG_JSON: &str = r#"{
    "grid_step": 1000,
    "top_n": 40,
    "distance_min": 5000,
    "include_facility_penalty": true,
    "snap_to_road": true,
    "capacity_stations": [1000, 2000, 4000],
    "profitability_stations": [0.5, 0.6, 0.7],
    "competitor": { "weight": -50, "max_distance": 60000 }
}"#;

/// Daily hydrogen demand per region, kg.
fn regional_demand() -> HashMap<String, f64> {
    HashMap::from([
        ("west".to_string(), 6_500.0),
        ("centre".to_string(), 14_000.0),
        ("east".to_string(), 9_500.0),
    ])
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => SiteConfig::load_json(Path::new(&path))?,
        None => SiteConfig::from_json_str(CONFIG_JSON)?,
    };

    println!("=== xsmall — rust_sf site selection ===");
    println!(
        "Grid step: {} m  |  Top N: {}  |  Merge distance: {} m",
        config.grid_step, config.top_n, config.distance_min
    );
    println!();

    // 1. Inputs.
    let network = build_network()?;
    println!("Road network: {} parts", network.len());

    // 2. Build and run.
    let pipeline = PipelineBuilder::new(config)
        .network(network)
        .hub_areas(hub_areas())
        .facilities(facilities())
        .competitors(competitors())
        .regional_demand(regional_demand())
        .build()?;

    let t0 = Instant::now();
    let output = pipeline.run()?;
    let elapsed = t0.elapsed();

    println!(
        "Scored {} candidates, merged into {} sites in {:.3} s",
        output.ranked.len(),
        output.merged.len(),
        elapsed.as_secs_f64()
    );
    println!();

    // 3. Sized sites table.
    println!(
        "{:<12} {:<12} {:<10} {:<10} {:<12} {:<6}",
        "x", "y", "score", "demand", "tier", "merged"
    );
    println!("{}", "-".repeat(66));
    for site in &output.sized {
        println!(
            "{:<12.0} {:<12.0} {:<10.3} {:<10.1} {:<12} {:<6}",
            site.point.x(),
            site.point.y(),
            site.score,
            site.estimated_demand,
            site.tier,
            site.merge_count
        );
    }

    // 4. Full output as JSON.
    std::fs::create_dir_all("output/xsmall")?;
    let out = Path::new("output/xsmall/sites.json");
    std::fs::write(out, serde_json::to_string_pretty(&output.sized)?)?;
    log::info!("wrote {}", out.display());
    println!();
    println!("Sites written to {}", out.display());

    Ok(())
}
