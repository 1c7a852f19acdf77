use std::collections::HashMap;
use std::fmt::Write as _;

use super::PlanStore;
use crate::math::Point2;

/// Iteration guard for the adjacency walk over capital walls.
const WALK_GUARD: usize = 10_000;

/// Coordinate quantum used to merge coincident capital endpoints.
const NODE_QUANTUM: f64 = 1e-6;

/// The building envelope derived from the capital wall set.
#[derive(Debug, Clone)]
pub enum Envelope {
    /// The capital walls form one clean closed loop.
    Loop(Vec<Point2>),
    /// Fallback: axis-aligned bounding box of the capital walls, used when
    /// they do not chain into a single loop (open chain, branching, ...).
    Bounds(Vec<Point2>),
}

impl Envelope {
    /// The polygon to test containment against.
    #[must_use]
    pub fn polygon(&self) -> &[Point2] {
        match self {
            Self::Loop(poly) | Self::Bounds(poly) => poly,
        }
    }

    /// Whether this envelope is a real contour rather than a bbox fallback.
    #[must_use]
    pub fn is_loop(&self) -> bool {
        matches!(self, Self::Loop(_))
    }
}

/// Content-addressed memo for the capital envelope.
///
/// The envelope is recomputed only when the serialized key of capital wall
/// endpoints differs from the last-seen key; everything else treats this as
/// an implementation detail of repeated queries, not a concurrency concern.
#[derive(Debug, Default)]
pub struct EnvelopeCache {
    key: Option<String>,
    envelope: Option<Envelope>,
}

impl EnvelopeCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current envelope, rebuilding it if the capital wall set
    /// changed. `None` when fewer than 3 capital walls exist.
    pub fn envelope(&mut self, store: &PlanStore) -> Option<&Envelope> {
        let key = capital_key(store);
        if self.key.as_deref() != Some(key.as_str()) {
            self.envelope = build_envelope(store);
            tracing::debug!(
                key = %key,
                fallback = self.envelope.as_ref().is_some_and(|e| !e.is_loop()),
                "rebuilt capital envelope"
            );
            self.key = Some(key);
        }
        self.envelope.as_ref()
    }
}

/// Serialized key of the capital wall endpoints.
fn capital_key(store: &PlanStore) -> String {
    let mut key = String::new();
    for (_, wall) in store.capitals() {
        let _ = write!(
            key,
            "{},{}-{},{}|",
            wall.a.x, wall.a.y, wall.b.x, wall.b.y
        );
    }
    key
}

fn build_envelope(store: &PlanStore) -> Option<Envelope> {
    let caps: Vec<(Point2, Point2)> = store.capitals().map(|(_, w)| (w.a, w.b)).collect();
    if caps.len() < 3 {
        return None;
    }

    if let Some(looped) = walk_loop(&caps) {
        return Some(Envelope::Loop(looped));
    }
    Some(Envelope::Bounds(bounds_polygon(&caps)))
}

#[allow(clippy::cast_possible_truncation)]
fn node_key(p: &Point2) -> (i64, i64) {
    (
        (p.x / NODE_QUANTUM).round() as i64,
        (p.y / NODE_QUANTUM).round() as i64,
    )
}

/// Chains capital segments into a closed loop by walking endpoint adjacency.
///
/// Returns `None` if the walk dead-ends or fails to close within the guard.
fn walk_loop(caps: &[(Point2, Point2)]) -> Option<Vec<Point2>> {
    let mut adjacency: HashMap<(i64, i64), Vec<Point2>> = HashMap::new();
    for (a, b) in caps {
        adjacency.entry(node_key(a)).or_default().push(*b);
        adjacency.entry(node_key(b)).or_default().push(*a);
    }

    let first = caps[0].0;
    let first_key = node_key(&first);
    let mut looped = vec![first];
    let mut curr = first;
    let mut prev: Option<Point2> = None;

    for _ in 0..WALK_GUARD {
        let neighbors = adjacency.get(&node_key(&curr))?;
        let next = *neighbors
            .iter()
            .find(|q| prev.map_or(true, |p| node_key(q) != node_key(&p)))?;

        prev = Some(curr);
        curr = next;

        if node_key(&curr) == first_key {
            return (looped.len() >= 3).then_some(looped);
        }
        looped.push(curr);
    }

    None
}

fn bounds_polygon(caps: &[(Point2, Point2)]) -> Vec<Point2> {
    let mut min = Point2::new(f64::INFINITY, f64::INFINITY);
    let mut max = Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
    for (a, b) in caps {
        for p in [a, b] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
    }
    vec![
        Point2::new(min.x, min.y),
        Point2::new(max.x, min.y),
        Point2::new(max.x, max.y),
        Point2::new(min.x, max.y),
    ]
}
