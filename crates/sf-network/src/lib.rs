//! `sf-network`: weighted road network, spatial indexing, and snapping.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`segment`]  | `Segment` (single or multi curve × weights)                  |
//! | [`dissolve`] | union of overlapping parts, first record wins the overlap    |
//! | [`network`]  | `WeightedNetwork` (parts + R-tree), `WeightedNetworkBuilder` |
//! | [`snap`]     | `WeightedNetwork::snap`, move a site onto the road           |
//! | [`error`]    | `NetworkError`, `NetworkResult<T>`                           |
//!
//! Coordinates are planar (already projected); all distances are Euclidean.

pub mod dissolve;
pub mod error;
pub mod network;
pub mod segment;
pub mod snap;

#[cfg(test)]
mod tests;

pub use error::{NetworkError, NetworkResult};
pub use network::{WeightedNetwork, WeightedNetworkBuilder};
pub use segment::Segment;
