//! `sf-select`: turn a ranking into a short list of sized sites.
//!
//! ```text
//! ScoredCandidate[] ──merge(distance_min)──▶ MergedSite[] ──size(demand, tiers)──▶ SizedSite[]
//! ```
//!
//! Both stages are sequential: consolidation's claim order makes each
//! cluster depend on the ones formed before it.
//!
//! | Module          | Contents                                           |
//! |-----------------|----------------------------------------------------|
//! | [`consolidate`] | `SiteConsolidator`, `MergedSite`, `merge`          |
//! | [`sizing`]      | `DemandSizer`, `SizedSite`, `size`, `score_total`  |
//! | [`error`]       | `SelectError`, `SelectResult<T>`                   |

pub mod consolidate;
pub mod error;
pub mod sizing;


pub use consolidate::{MergedSite, SiteConsolidator, merge};
pub use error::{SelectError, SelectResult};
pub use sizing::{DemandSizer, SizedSite, score_total, size};
