use std::collections::HashMap;

use crate::math::Point2;

use super::NODE_EPS;

/// Quantized node key: vertices within the node tolerance of each other
/// collapse onto the same junction.
#[allow(clippy::cast_possible_truncation)]
pub(super) fn node_key(p: &Point2) -> (i64, i64) {
    (
        (p.x / NODE_EPS).round() as i64,
        (p.y / NODE_EPS).round() as i64,
    )
}

/// A directed traversal token along one sub-segment.
#[derive(Debug)]
pub(super) struct HalfEdge {
    pub from: usize,
    pub to: usize,
    /// Polar angle of the direction `from → to`.
    pub angle: f64,
}

/// Planar line arrangement: nodes, directed half-edges, and per-node
/// outgoing edge lists sorted counter-clockwise by angle.
#[derive(Debug, Default)]
pub(super) struct Arrangement {
    pub nodes: Vec<Point2>,
    pub edges: Vec<HalfEdge>,
    pub outgoing: Vec<Vec<usize>>,
}

/// Builds the arrangement from non-overlapping sub-segments.
pub(super) fn build_arrangement(segs: &[(Point2, Point2)]) -> Arrangement {
    let mut arr = Arrangement::default();
    let mut index: HashMap<(i64, i64), usize> = HashMap::new();

    for &(a, b) in segs {
        let na = ensure_node(&mut arr, &mut index, a);
        let nb = ensure_node(&mut arr, &mut index, b);
        if na == nb {
            continue;
        }

        let pa = arr.nodes[na];
        let pb = arr.nodes[nb];
        let forward = (pb.y - pa.y).atan2(pb.x - pa.x);
        let backward = (pa.y - pb.y).atan2(pa.x - pb.x);

        let e_ab = arr.edges.len();
        arr.edges.push(HalfEdge {
            from: na,
            to: nb,
            angle: forward,
        });
        arr.outgoing[na].push(e_ab);

        let e_ba = arr.edges.len();
        arr.edges.push(HalfEdge {
            from: nb,
            to: na,
            angle: backward,
        });
        arr.outgoing[nb].push(e_ba);
    }

    let Arrangement {
        edges, outgoing, ..
    } = &mut arr;
    for list in outgoing.iter_mut() {
        list.sort_by(|&e1, &e2| edges[e1].angle.total_cmp(&edges[e2].angle));
    }

    arr
}

fn ensure_node(
    arr: &mut Arrangement,
    index: &mut HashMap<(i64, i64), usize>,
    p: Point2,
) -> usize {
    let key = node_key(&p);
    if let Some(&idx) = index.get(&key) {
        return idx;
    }
    let idx = arr.nodes.len();
    arr.nodes.push(p);
    arr.outgoing.push(Vec::new());
    index.insert(key, idx);
    idx
}
