use crate::math::distance_2d::point_to_point_dist;
use crate::math::Point2;

use super::arrangement::Arrangement;
use super::NODE_EPS;

/// Hard cap on vertices per traced face; bounds the walk on malformed input.
const FACE_VERTEX_GUARD: usize = 2000;

/// Traces one face starting from the half-edge `start`, marking every
/// traversed edge as used.
///
/// At each step the walk jumps to the outgoing edge immediately
/// counter-clockwise-before the reverse of the current edge at the
/// destination node — the clockwise-turn rule, which traverses bounded faces
/// counter-clockwise and the unbounded face clockwise.
///
/// Returns `None` when the walk dead-ends or exceeds the vertex guard; the
/// caller discards such faces rather than failing the whole computation.
pub(super) fn trace_face(
    arr: &Arrangement,
    used: &mut [bool],
    start: usize,
) -> Option<Vec<Point2>> {
    let mut poly = Vec::new();
    let mut edge = start;

    loop {
        used[edge] = true;
        poly.push(arr.nodes[arr.edges[edge].from]);

        edge = next_edge(arr, edge)?;
        if edge == start {
            break;
        }
        if poly.len() > FACE_VERTEX_GUARD {
            return None;
        }
    }

    Some(poly)
}

/// The clockwise-turn rule at the destination node of `edge`.
fn next_edge(arr: &Arrangement, edge: usize) -> Option<usize> {
    let from = arr.edges[edge].from;
    let to = arr.edges[edge].to;

    let out = &arr.outgoing[to];
    if out.is_empty() {
        return None;
    }
    let back = out.iter().position(|&e| arr.edges[e].to == from)?;
    Some(out[(back + out.len() - 1) % out.len()])
}

/// Collapses consecutive near-duplicate vertices and the closing duplicate.
pub(super) fn dedupe_face(poly: &[Point2]) -> Vec<Point2> {
    let mut out: Vec<Point2> = Vec::new();
    for &p in poly {
        if out
            .last()
            .map_or(true, |q| point_to_point_dist(q, &p) > NODE_EPS)
        {
            out.push(p);
        }
    }
    if out.len() >= 2 && point_to_point_dist(&out[0], &out[out.len() - 1]) <= NODE_EPS {
        out.pop();
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::super::arrangement::build_arrangement;
    use super::*;
    use crate::math::polygon_2d::signed_area_2d;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn square_segs(w: f64, h: f64) -> Vec<(Point2, Point2)> {
        vec![
            (p(0.0, 0.0), p(w, 0.0)),
            (p(w, 0.0), p(w, h)),
            (p(w, h), p(0.0, h)),
            (p(0.0, h), p(0.0, 0.0)),
        ]
    }

    #[test]
    fn square_traces_ccw_interior_and_cw_exterior() {
        let arr = build_arrangement(&square_segs(100.0, 100.0));
        let mut used = vec![false; arr.edges.len()];

        let mut areas = Vec::new();
        for start in 0..arr.edges.len() {
            if used[start] {
                continue;
            }
            let face = trace_face(&arr, &mut used, start).unwrap();
            areas.push(signed_area_2d(&dedupe_face(&face)));
        }
        assert!(used.iter().all(|&u| u));
        assert_eq!(areas.len(), 2);
        areas.sort_by(f64::total_cmp);
        assert!((areas[0] + 10_000.0).abs() < 1e-6, "outer CW: {areas:?}");
        assert!((areas[1] - 10_000.0).abs() < 1e-6, "inner CCW: {areas:?}");
    }

    #[test]
    fn dangling_stub_face_is_degenerate() {
        // A single isolated segment: the walk shuttles back and forth and
        // closes with only two distinct vertices.
        let arr = build_arrangement(&[(p(0.0, 0.0), p(100.0, 0.0))]);
        let mut used = vec![false; arr.edges.len()];
        let face = trace_face(&arr, &mut used, 0).unwrap();
        assert!(dedupe_face(&face).len() < 3);
    }

    #[test]
    fn dedupe_drops_closing_duplicate() {
        let poly = vec![p(0.0, 0.0), p(100.0, 0.0), p(100.0, 100.0), p(0.5, 0.5)];
        let deduped = dedupe_face(&poly);
        assert_eq!(deduped.len(), 3);
    }
}
