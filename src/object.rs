use log::{debug, trace};

use crate::bbox::{BBox, Ltwh};
use crate::geometry::{Point, Rectangle};
use crate::Tracking;

/// One region followed across frames by its own tracker instance.
#[derive(Debug)]
pub struct TrackedObject<T> {
    id: u32,
    area: Rectangle,
    tracker: T,
    original_mid: Point,
    misses: u32,
    updates: u32,
}

impl<T> TrackedObject<T> {
    pub(crate) fn new(id: u32, area: Rectangle, tracker: T) -> Self {
        Self {
            id,
            area,
            tracker,
            original_mid: area.midpoint(),
            misses: 0,
            updates: 0,
        }
    }

    /// Relocates the region on `frame`.
    ///
    /// On failure the area keeps its last known value and `false` is returned;
    /// whether to drop the object is up to the caller.
    pub fn update<F: ?Sized>(&mut self, frame: &F) -> bool
    where
        T: Tracking<F>,
    {
        self.updates = self.updates.saturating_add(1);

        let moved = self
            .tracker
            .update(frame)
            .map(|bbox| Rectangle::try_from(bbox).map_err(|err| (bbox, err)));

        match moved {
            Some(Ok(area)) => {
                self.area = area;
                self.misses = 0;
                trace!("object {}: moved to {:?}", self.id, area.xywh().as_slice());

                true
            }
            Some(Err((bbox, err))) => {
                self.misses = self.misses.saturating_add(1);
                debug!("object {}: tracker reported {:?}: {}", self.id, bbox.as_slice(), err);

                false
            }
            None => {
                self.misses = self.misses.saturating_add(1);
                trace!("object {}: lost ({} in a row)", self.id, self.misses);

                false
            }
        }
    }

    #[inline(always)]
    pub fn id(&self) -> u32 {
        self.id
    }

    #[inline(always)]
    pub fn area(&self) -> &Rectangle {
        &self.area
    }

    #[inline]
    pub fn bounds(&self) -> BBox<Ltwh> {
        self.area.xywh()
    }

    #[inline]
    pub fn start_point(&self) -> Point {
        self.area.point1()
    }

    #[inline]
    pub fn end_point(&self) -> Point {
        self.area.point2()
    }

    #[inline]
    pub fn midpoint(&self) -> Point {
        self.area.midpoint()
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.area.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.area.height()
    }

    /// Midpoint of the area the object was created with
    #[inline]
    pub fn original_midpoint(&self) -> Point {
        self.original_mid
    }

    /// Distance in pixels between the original and the current midpoint
    #[inline]
    pub fn drift(&self) -> f32 {
        self.original_mid.distance(&self.midpoint())
    }

    /// Consecutive failed updates
    #[inline]
    pub fn misses(&self) -> u32 {
        self.misses
    }

    #[inline]
    pub fn updates(&self) -> u32 {
        self.updates
    }

    #[inline]
    pub fn tracker(&self) -> &T {
        &self.tracker
    }
}
