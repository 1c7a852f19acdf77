use crate::math::distance_2d::{point_to_point_dist, project_point_to_segment};
use crate::math::Point2;
use crate::plan::PlanStore;

use super::arrangement::node_key;
use super::NODE_EPS;

/// Collects every wall's construction axis as an undirected segment.
///
/// Capital walls contribute their own axis; partitions contribute the
/// construction pair so the visual trim at joints does not open gaps in the
/// topology.
pub(super) fn collect_axes(store: &PlanStore) -> Vec<(Point2, Point2)> {
    store
        .walls()
        .map(|(_, w)| {
            if w.is_capital() {
                (w.a, w.b)
            } else {
                (w.construction_a(), w.construction_b())
            }
        })
        .collect()
}

/// Cuts segments at junction points.
///
/// Any endpoint of one segment that projects onto the interior of another
/// (within the node tolerance) becomes a split point for the latter; each
/// segment is then cut into the minimal set of non-overlapping sub-segments
/// at its sorted split points.
pub(super) fn split_segments(segs: &[(Point2, Point2)]) -> Vec<(Point2, Point2)> {
    let mut out = Vec::new();

    for (i, &(a, b)) in segs.iter().enumerate() {
        let mut points: Vec<Point2> = vec![a, b];

        for (j, &(c, d)) in segs.iter().enumerate() {
            if i == j {
                continue;
            }
            for p in [c, d] {
                let pr = project_point_to_segment(&p, &a, &b);
                if pr.t > 1e-4 && pr.t < 1.0 - 1e-4 && pr.distance <= NODE_EPS {
                    points.push(pr.point);
                }
            }
        }

        // Deduplicate by quantized node key, then order along the segment.
        let mut unique: Vec<Point2> = Vec::new();
        for p in points {
            if !unique.iter().any(|q| node_key(q) == node_key(&p)) {
                unique.push(p);
            }
        }
        let mut ordered: Vec<(f64, Point2)> = unique
            .into_iter()
            .map(|p| (project_point_to_segment(&p, &a, &b).t, p))
            .collect();
        ordered.sort_by(|x, y| x.0.total_cmp(&y.0));

        for pair in ordered.windows(2) {
            let (pa, pb) = (pair[0].1, pair[1].1);
            if point_to_point_dist(&pa, &pb) > NODE_EPS {
                out.push((pa, pb));
            }
        }
    }

    out
}
