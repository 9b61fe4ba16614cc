//! Two-zone distance decay shared by every proximity signal.
//!
//! | Zone   | Distance              | Factor |
//! |--------|-----------------------|--------|
//! | near   | `d ≤ radius / 2`      | 1      |
//! | far    | `radius / 2 < d < radius` | ½  |
//! | none   | `d ≥ radius`          | 0      |
//!
//! The outer bound is exclusive: a signal exactly at its radius contributes
//! nothing, including any weight or capacity bonus attached to it.

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Zone {
    Near,
    Far,
}

impl Zone {
    /// Which zone `distance` falls in, if any.
    #[inline]
    pub fn of(distance: f64, radius: f64) -> Option<Zone> {
        if distance <= radius / 2.0 {
            Some(Zone::Near)
        } else if distance < radius {
            Some(Zone::Far)
        } else {
            None
        }
    }

    /// Multiplier applied to every term of a signal in this zone.
    #[inline]
    pub fn factor(self) -> f64 {
        match self {
            Zone::Near => 1.0,
            Zone::Far => 0.5,
        }
    }
}

/// Zone and linear proximity `(radius − d) / radius` for a signal at
/// `distance`.  `None` outside the radius.
///
/// The proximity returned is *not* yet multiplied by the zone factor.
#[inline]
pub fn decay(distance: f64, radius: f64) -> Option<(Zone, f64)> {
    Zone::of(distance, radius).map(|z| (z, (radius - distance) / radius))
}
