pub mod constraints;
pub mod measure;
pub mod normalize;
pub mod pick;
pub mod rooms;
pub mod snap;

pub use constraints::{min_dist_to_capitals, SegmentAllowed, SegmentClearOfCapitals};
pub use normalize::NormalizeWall;
pub use pick::{PickWall, PickWallHandle, WallHandle};
pub use rooms::{ComputeRooms, Room};
pub use snap::{SnapKind, SnapOptions, SnapQuery, SnapResult};
