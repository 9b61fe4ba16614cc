//! `sf-score`: per-candidate scoring and grid ranking.
//!
//! # Score
//!
//! ```text
//! score(c) =  Σ road parts within max_road      (proximity_weight·prox + traffic_weight·w) · zone
//!          +  Σ hubs within max_distance         hub_weight · (prox + capacity) · zone
//!          +  Σ facilities within max_distance   facility_weight · prox · zone    (optional)
//!
//! prox = (radius − d) / radius      zone = 1 (near, d ≤ radius/2) | ½ (far, d < radius)
//! ```
//!
//! # Crate layout
//!
//! | Module     | Contents                                                     |
//! |------------|--------------------------------------------------------------|
//! | [`decay`]  | `Zone`, two-zone distance decay                              |
//! | [`sites`]  | `Hub`, `HubSet`, `FacilitySet` (R-tree indexed points)       |
//! | [`scorer`] | `CandidateScorer`, `ScoreBreakdown`, `score`                 |
//! | [`grid`]   | `ScoredCandidate`, `lattice`, `rank`                         |
//! | [`refine`] | `snap_candidates`, `apply_competitor_penalty`                |
//! | [`error`]  | `ScoreError`, `ScoreResult<T>`                               |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Scores candidates on Rayon's thread pool.              |
//! | `serde`    | `Serialize` on `Hub`, `ScoreBreakdown`, `ScoredCandidate`. |

pub mod decay;
pub mod error;
pub mod grid;
pub mod refine;
pub mod scorer;
pub mod sites;


pub use decay::{Zone, decay};
pub use error::{ScoreError, ScoreResult};
pub use grid::{MAX_LATTICE_POINTS, ScoredCandidate, lattice, rank};
pub use refine::{apply_competitor_penalty, snap_candidates};
pub use scorer::{CandidateScorer, ScoreBreakdown, score};
pub use sites::{FacilitySet, Hub, HubSet};
