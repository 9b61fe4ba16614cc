//! Dissolve overlapping road parts into their union.
//!
//! Road tables routinely carry the same stretch twice: a section counted in
//! both directions, or two count points whose sections overlap.  Parts are
//! visited in input order and every stretch of an edge that lies on an edge
//! already accepted (collinear overlap of positive length) is cut away, so
//! each stretch of road belongs to exactly one part: the first one that
//! covered it, carrying that part's weight.
//!
//! ```text
//! A: (-1000,0)──────────────(500,0)            weight 0.8
//! B:         (-500,0)──────────────(1000,0)    weight 0.3
//!
//! A: (-1000,0)──────────────(500,0)            weight 0.8
//! B:                        (500,0)──(1000,0)  weight 0.3
//! ```
//!
//! Only exact collinear overlaps are dissolved.  Parts that merely cross
//! are left whole: a crossing is a single point and has no length to count
//! twice.

use geo::algorithm::line_intersection::{LineIntersection, line_intersection};
use geo::{Coord, Line, LineString};
use rstar::{AABB, RTree};

use sf_core::SegmentId;

use crate::Segment;
use crate::network::EdgeEntry;

/// Edge parameter spans shorter than this are treated as fully covered.
const MIN_SPAN: f64 = 1e-12;

/// Cut every part down to the stretches not already covered by an earlier
/// part.  Parts left with nothing are dropped.
pub(crate) fn dissolve(segments: Vec<Segment>) -> Vec<Segment> {
    let input = segments.len();
    let mut accepted: RTree<EdgeEntry> = RTree::new();
    let mut out: Vec<Segment> = Vec::with_capacity(input);
    let mut trimmed = 0usize;

    for segment in segments {
        let kept = match segment {
            Segment::Single { line, weight } => {
                let mut pieces = uncovered(&line, &accepted);
                match pieces.len() {
                    0 => None,
                    1 => {
                        let piece = pieces.remove(0);
                        if piece != line {
                            trimmed += 1;
                        }
                        Some(Segment::Single { line: piece, weight })
                    }
                    n => {
                        trimmed += 1;
                        Some(Segment::Multi { lines: pieces, weights: vec![weight; n] })
                    }
                }
            }
            Segment::Multi { lines, weights } => {
                let mut kept_lines = Vec::new();
                let mut kept_weights = Vec::new();
                for (line, weight) in lines.iter().zip(&weights) {
                    for piece in uncovered(line, &accepted) {
                        kept_lines.push(piece);
                        kept_weights.push(*weight);
                    }
                }
                if kept_lines != lines {
                    trimmed += 1;
                }
                (!kept_lines.is_empty())
                    .then_some(Segment::Multi { lines: kept_lines, weights: kept_weights })
            }
        };

        let Some(segment) = kept else { continue };
        let id = SegmentId(out.len() as u32);
        for line in segment.lines() {
            for edge in line.lines() {
                accepted.insert(EdgeEntry::new(edge, id));
            }
        }
        out.push(segment);
    }

    if out.len() < input || trimmed > 0 {
        log::debug!(
            "dissolved overlapping roads: {} parts dropped, {trimmed} trimmed",
            input - out.len()
        );
    }
    out
}

/// The stretches of `line` not lying on any accepted edge, as curves.
fn uncovered(line: &LineString<f64>, accepted: &RTree<EdgeEntry>) -> Vec<LineString<f64>> {
    let mut pieces = Vec::new();
    let mut current: Vec<Coord<f64>> = Vec::new();
    let mut has_length = false;

    for edge in line.lines() {
        if edge.start == edge.end {
            continue;
        }
        has_length = true;
        let envelope = AABB::from_corners([edge.start.x, edge.start.y], [edge.end.x, edge.end.y]);
        let covered: Vec<(Stop, Stop)> = accepted
            .locate_in_envelope_intersecting(&envelope)
            .filter_map(|e| overlap(edge, e.line()))
            .collect();

        let free = complement(edge, covered);
        if free.is_empty() {
            flush(&mut current, &mut pieces);
        }
        for (from, to) in free {
            if from.t > 0.0 {
                flush(&mut current, &mut pieces);
            }
            if current.is_empty() {
                current.push(from.at);
            }
            current.push(to.at);
            if to.t < 1.0 {
                flush(&mut current, &mut pieces);
            }
        }
    }
    flush(&mut current, &mut pieces);

    // A zero-length curve still marks a location; keep it as it is.
    if !has_length {
        return vec![line.clone()];
    }
    pieces
}

/// A position along an edge: its parameter in `[0, 1]` and its exact
/// coordinate.  Cut points reuse the coordinates of the overlapping edge's
/// endpoints so pieces end exactly where the covering part starts.
#[derive(Copy, Clone)]
struct Stop {
    t: f64,
    at: Coord<f64>,
}

/// Span of `edge` that `other` lies on, if they overlap with positive length.
fn overlap(edge: Line<f64>, other: Line<f64>) -> Option<(Stop, Stop)> {
    let Some(LineIntersection::Collinear { intersection }) = line_intersection(edge, other) else {
        return None;
    };
    let a = stop(edge, intersection.start);
    let b = stop(edge, intersection.end);
    let (lo, hi) = if a.t <= b.t { (a, b) } else { (b, a) };
    (hi.t - lo.t > MIN_SPAN).then_some((lo, hi))
}

/// Uncovered spans of `edge`, ascending.
fn complement(edge: Line<f64>, mut covered: Vec<(Stop, Stop)>) -> Vec<(Stop, Stop)> {
    covered.sort_by(|a, b| a.0.t.total_cmp(&b.0.t));
    let mut free = Vec::new();
    let mut cursor = Stop { t: 0.0, at: edge.start };
    for (lo, hi) in covered {
        if lo.t - cursor.t > MIN_SPAN {
            free.push((cursor, lo));
        }
        if hi.t > cursor.t {
            cursor = hi;
        }
    }
    if 1.0 - cursor.t > MIN_SPAN {
        free.push((cursor, Stop { t: 1.0, at: edge.end }));
    }
    free
}

fn stop(edge: Line<f64>, c: Coord<f64>) -> Stop {
    let d = edge.delta();
    let t = ((c.x - edge.start.x) * d.x + (c.y - edge.start.y) * d.y) / (d.x * d.x + d.y * d.y);
    if t <= 0.0 {
        Stop { t: 0.0, at: edge.start }
    } else if t >= 1.0 {
        Stop { t: 1.0, at: edge.end }
    } else {
        Stop { t, at: c }
    }
}

fn flush(current: &mut Vec<Coord<f64>>, pieces: &mut Vec<LineString<f64>>) {
    if current.len() >= 2 {
        pieces.push(LineString::new(std::mem::take(current)));
    } else {
        current.clear();
    }
}
