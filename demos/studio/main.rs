//! Studio walkthrough — builds a studio apartment plan, normalizes the
//! partitions against the capital envelope, validates a candidate wall, and
//! derives rooms with areas and label anchors.
//!
//! ```text
//! cargo run --example studio
//! ```
//!
//! Override log verbosity with `RUST_LOG` (e.g. `RUST_LOG=atrium=debug`).

use atrium::math::Point2;
use atrium::operations::measure::{envelope_area_m2, total_partition_length_m, wall_length_m};
use atrium::operations::{
    ComputeRooms, NormalizeWall, SegmentAllowed, SegmentClearOfCapitals, SnapQuery,
};
use atrium::plan::units::{CAPITAL_THICKNESS, PARTITION_THICKNESS};
use atrium::plan::{
    EnvelopeCache, OpeningData, OpeningKind, PlanStore, ViewScale, WallData, WallId,
};
use atrium::Result;

fn p(x: f64, y: f64) -> Point2 {
    Point2::new(x, y)
}

/// A 12 m × 7.6 m studio: capital shell, a bedroom corner, and a bathroom.
fn load_studio(store: &mut PlanStore) -> (WallId, Vec<WallId>) {
    let (x0, y0, x1, y1) = (0.0, 0.0, 1200.0, 760.0);

    store.add_wall(WallData::capital(p(x0, y0), p(x1, y0)));
    store.add_wall(WallData::capital(p(x1, y0), p(x1, y1)));
    let entry_host = store.add_wall(WallData::capital(p(x1, y1), p(x0, y1)));
    store.add_wall(WallData::capital(p(x0, y1), p(x0, y0)));

    let partitions = vec![
        // Bedroom corner.
        store.add_wall(WallData::partition(p(760.0, y0), p(760.0, 360.0))),
        store.add_wall(WallData::partition(p(760.0, 360.0), p(x1, 360.0))),
        // Bathroom.
        store.add_wall(WallData::partition(p(520.0, 520.0), p(820.0, 520.0))),
        store.add_wall(WallData::partition(p(520.0, 520.0), p(520.0, y1))),
        store.add_wall(WallData::partition(p(820.0, 520.0), p(820.0, y1))),
    ];

    (entry_host, partitions)
}

fn main() -> Result<()> {
    // Default: WARN for everything, DEBUG for atrium.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("atrium=debug".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let view = ViewScale::new(1.0);
    let mut store = PlanStore::new();
    let mut cache = EnvelopeCache::new();

    let (entry_host, partitions) = load_studio(&mut store);

    store.add_opening(
        OpeningData::new(entry_host, OpeningKind::Entry, 0.2, 90.0, CAPITAL_THICKNESS).locked(),
    )?;
    store.add_opening(OpeningData::new(
        partitions[2],
        OpeningKind::Interior,
        0.5,
        75.0,
        PARTITION_THICKNESS,
    ))?;

    for &id in &partitions {
        NormalizeWall::new(id).execute(&mut store, view)?;
    }

    println!("envelope area: {:.2} m²", envelope_area_m2(&store, &mut cache));
    println!(
        "partitions: {:.2} m total",
        total_partition_length_m(&store)
    );
    for &id in &partitions {
        let wall = store.wall(id)?;
        println!(
            "  wall {:.2} m  visual ({:.0}, {:.0}) → ({:.0}, {:.0})",
            wall_length_m(wall),
            wall.a.x,
            wall.a.y,
            wall.b.x,
            wall.b.y
        );
    }

    // Resolve a pointer position the way the draw tool would.
    let snapped = SnapQuery::new(p(603.0, 417.0)).execute(&store, view);
    println!(
        "snap (603, 417) → ({:.0}, {:.0}) via {:?}",
        snapped.point.x, snapped.point.y, snapped.kind
    );

    // A wall through the bathroom interior is rejected; a clean span is not.
    let crossing = SegmentAllowed::new(p(400.0, 640.0), p(900.0, 640.0))
        .execute(&store, &mut cache, view);
    let span = SegmentAllowed::new(p(260.0, 0.0), p(260.0, 760.0))
        .execute(&store, &mut cache, view)
        && SegmentClearOfCapitals::new(p(260.0, 0.0), p(260.0, 760.0)).execute(&store);
    println!("bathroom crossing allowed: {crossing}, clean span allowed: {span}");

    for room in ComputeRooms::new().execute(&store, &mut cache) {
        println!(
            "room: {:.2} m², label ({:.0}, {:.0}), {} corners",
            room.area_m2,
            room.label.x,
            room.label.y,
            room.polygon.len()
        );
    }

    Ok(())
}
