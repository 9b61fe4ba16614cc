//! `sf-core`: foundational types for the `rust_sf` site-selection engine.
//!
//! This crate is a dependency of every other `sf-*` crate.  It has no `sf-*`
//! dependencies and no geometry dependency: everything here is plain numbers,
//! identifiers, and configuration.
//!
//! # What lives here
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`ids`]       | `SegmentId`, `CandidateId`                                |
//! | [`normalize`] | `MinMax`, `min_max_normalize`                             |
//! | [`traffic`]   | `heavy_vehicle_traffic`                                   |
//! | [`tier`]      | `CapacityTier`, `TierTable`                               |
//! | [`params`]    | `ScoringParams`, `CompetitorPenalty`                      |
//! | [`config`]    | `SiteConfig` (JSON)                                       |
//! | [`error`]     | `SfError`, `SfResult`                                     |

pub mod config;
pub mod error;
pub mod ids;
pub mod normalize;
pub mod params;
pub mod tier;
pub mod traffic;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::SiteConfig;
pub use error::{SfError, SfResult};
pub use ids::{CandidateId, SegmentId};
pub use normalize::{MinMax, min_max_normalize};
pub use params::{CompetitorPenalty, ScoringParams};
pub use tier::{CapacityTier, TierTable};
pub use traffic::heavy_vehicle_traffic;
