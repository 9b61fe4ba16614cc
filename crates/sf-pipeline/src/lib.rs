//! `sf-pipeline`: one analysis run from road network to sized sites.
//!
//! # Stages
//!
//! ```text
//! ① Rank    score the lattice (or supplied candidates), best first
//!           (parallel with the `parallel` feature).
//! ② Top N   keep the best `top_n`.
//! ③ Refine  optionally snap to the road network, then optionally
//!           re-score against competitor stations.
//! ④ Merge   consolidate candidates within `distance_min`.
//! ⑤ Size    share regional demand by score and assign capacity tiers.
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | Enables `sf-score/parallel`; `num_threads` sizes the pool. |
//! | `serde`    | `Serialize` on `PipelineOutput` and everything it holds.  |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use sf_core::SiteConfig;
//! use sf_pipeline::PipelineBuilder;
//!
//! let config = SiteConfig::load_json(path)?;
//! let output = PipelineBuilder::new(config)
//!     .network(network)
//!     .hubs(hubs)
//!     .regional_demand(demand)
//!     .build()?
//!     .run()?;
//! ```

pub mod builder;
pub mod error;
pub mod pipeline;

#[cfg(test)]
mod tests;

pub use builder::PipelineBuilder;
pub use error::{PipelineError, PipelineResult};
pub use pipeline::{Pipeline, PipelineOutput};
