//! Constituent parts of a weighted network.
//!
//! A part is either a single curve carrying one weight, or a multi-curve
//! whose sub-curves each carry their own weight.  The only behavioral
//! difference is how the weight is read: a multi-curve reports the mean of
//! its sub-curve weights.

use geo::{Distance, Euclidean, LineString, Point, Rect, coord};

#[derive(Clone, Debug, PartialEq)]
pub enum Segment {
    Single {
        line: LineString<f64>,
        weight: f64,
    },
    /// Non-empty; `weights[i]` belongs to `lines[i]`.
    Multi {
        lines: Vec<LineString<f64>>,
        weights: Vec<f64>,
    },
}

impl Segment {
    /// Traffic weight of this part.  Multi-curves use the mean of their
    /// sub-curve weights.
    pub fn weight(&self) -> f64 {
        match self {
            Segment::Single { weight, .. } => *weight,
            Segment::Multi { weights, .. } => {
                weights.iter().sum::<f64>() / weights.len() as f64
            }
        }
    }

    /// The curves making up this part.
    pub fn lines(&self) -> &[LineString<f64>] {
        match self {
            Segment::Single { line, .. } => std::slice::from_ref(line),
            Segment::Multi { lines, .. } => lines,
        }
    }

    /// Euclidean distance from `p` to the closest curve of this part.
    pub fn distance_to(&self, p: &Point<f64>) -> f64 {
        self.lines()
            .iter()
            .map(|line| Euclidean.distance(p, line))
            .fold(f64::INFINITY, f64::min)
    }

    /// Axis-aligned bounds of every coordinate in this part.
    pub fn bounding_rect(&self) -> Option<Rect<f64>> {
        let mut coords = self.lines().iter().flat_map(|l| l.coords());
        let first = coords.next()?;
        let (mut min, mut max) = (*first, *first);
        for c in coords {
            min = coord! { x: min.x.min(c.x), y: min.y.min(c.y) };
            max = coord! { x: max.x.max(c.x), y: max.y.max(c.y) };
        }
        Some(Rect::new(min, max))
    }
}
