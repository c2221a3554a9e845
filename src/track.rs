use serde_derive::{Deserialize, Serialize};

use crate::bbox::{BBox, Ltwh};
use crate::geometry::Point;
use crate::object::TrackedObject;

/// Immutable view of a tracked object at the time of the snapshot
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Track {
    pub track_id: u32,
    pub bbox: BBox<Ltwh>,
    pub midpoint: Point,

    // midpoint at creation
    pub origin: Point,

    // in px, from origin to midpoint
    pub drift: f32,

    // consecutive failed updates
    pub misses: u32,
}

impl<T> From<&TrackedObject<T>> for Track {
    fn from(obj: &TrackedObject<T>) -> Track {
        Track {
            track_id: obj.id(),
            bbox: obj.bounds(),
            midpoint: obj.midpoint(),
            origin: obj.original_midpoint(),
            drift: obj.drift(),
            misses: obj.misses(),
        }
    }
}
