use crate::bbox::{BBox, Ltrb, Ltwh};
use crate::error::{Error, Result};
use nalgebra as na;
use serde_derive::{Deserialize, Serialize};

/// Integer pixel coordinate
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline(always)]
    pub fn x(&self) -> i32 {
        self.x
    }

    #[inline(always)]
    pub fn y(&self) -> i32 {
        self.y
    }

    /// Euclidean distance in pixels
    #[inline]
    pub fn distance(&self, other: &Point) -> f32 {
        na::distance(&self.to_na(), &other.to_na())
    }

    #[inline]
    pub fn to_na(&self) -> na::Point2<f32> {
        na::Point2::new(self.x as f32, self.y as f32)
    }
}

impl From<Point> for na::Point2<f32> {
    #[inline]
    fn from(p: Point) -> Self {
        p.to_na()
    }
}

impl From<(i32, i32)> for Point {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Axis-aligned rectangle stored as two corners.
///
/// Width and height are always derived from the corners, so
/// `point2 == point1 + (width, height)` holds for every value of this type.
/// Corners are not reordered: `point2` preceding `point1` yields a negative
/// width or height. Construction fails when the corners or the size do not
/// fit in `i32`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(try_from = "Corners", into = "Corners")]
pub struct Rectangle {
    point1: Point,
    point2: Point,
}

#[derive(Serialize, Deserialize)]
struct Corners {
    point1: Point,
    point2: Point,
}

impl TryFrom<Corners> for Rectangle {
    type Error = Error;

    fn try_from(c: Corners) -> Result<Self> {
        Rectangle::from_corners(c.point1, c.point2)
    }
}

impl From<Rectangle> for Corners {
    fn from(r: Rectangle) -> Self {
        Corners {
            point1: r.point1,
            point2: r.point2,
        }
    }
}

impl Rectangle {
    pub fn from_corners(point1: Point, point2: Point) -> Result<Self> {
        point2
            .x
            .checked_sub(point1.x)
            .zip(point2.y.checked_sub(point1.y))
            .ok_or(Error::CoordinateOverflow([point1.x, point1.y, point2.x, point2.y]))?;

        Ok(Self { point1, point2 })
    }

    pub fn from_origin_and_size(origin: Point, width: i32, height: i32) -> Result<Self> {
        let (x2, y2) = origin
            .x
            .checked_add(width)
            .zip(origin.y.checked_add(height))
            .ok_or(Error::CoordinateOverflow([origin.x, origin.y, width, height]))?;

        Ok(Self {
            point1: origin,
            point2: Point::new(x2, y2),
        })
    }

    #[inline(always)]
    pub fn point1(&self) -> Point {
        self.point1
    }

    #[inline(always)]
    pub fn point2(&self) -> Point {
        self.point2
    }

    #[inline(always)]
    pub fn width(&self) -> i32 {
        self.point2.x - self.point1.x
    }

    #[inline(always)]
    pub fn height(&self) -> i32 {
        self.point2.y - self.point1.y
    }

    /// Corner average, truncated toward zero
    #[inline]
    pub fn midpoint(&self) -> Point {
        let mid = |a: i32, b: i32| ((a as i64 + b as i64) / 2) as i32;

        Point::new(
            mid(self.point1.x, self.point2.x),
            mid(self.point1.y, self.point2.y),
        )
    }

    #[inline]
    pub fn xywh(&self) -> BBox<Ltwh> {
        BBox::ltwh(self.point1.x, self.point1.y, self.width(), self.height())
    }

    #[inline]
    pub fn ltrb(&self) -> BBox<Ltrb> {
        BBox::ltrb(self.point1.x, self.point1.y, self.point2.x, self.point2.y)
    }

    /// Overlap of two rectangles in `(x, y, w, h)` form.
    ///
    /// Boundary inclusive: rectangles sharing only an edge or a corner produce
    /// a zero-width or zero-height overlap rather than `None`.
    pub fn intersection(&self, other: &Rectangle) -> Option<Rectangle> {
        let [x, y, r, b] = overlap(widen(&self.xywh()), widen(&other.xywh()))?;

        // the overlap lies within both rectangles, so it fits in i32
        Some(Rectangle {
            point1: Point::new(x as i32, y as i32),
            point2: Point::new(r as i32, b as i32),
        })
    }

    #[inline]
    pub fn intersects(&self, other: &Rectangle) -> bool {
        self.intersection(other).is_some()
    }

    /// Overlap test against a raw `(x, y, w, h)` box, whose far corner may
    /// lie outside the `i32` range.
    #[inline]
    pub fn intersects_xywh(&self, x: i32, y: i32, w: i32, h: i32) -> bool {
        let other = [x as i64, y as i64, w as i64, h as i64];
        overlap(widen(&self.xywh()), other).is_some()
    }
}

#[inline]
fn widen(bbox: &BBox<Ltwh>) -> [i64; 4] {
    bbox.as_slice().map(i64::from)
}

/// Inclusive overlap of two `(x, y, w, h)` boxes as `[left, top, right, bottom]`
fn overlap(a: [i64; 4], b: [i64; 4]) -> Option<[i64; 4]> {
    let x = a[0].max(b[0]);
    let y = a[1].max(b[1]);
    let r = (a[0] + a[2]).min(b[0] + b[2]);
    let bottom = (a[1] + a[3]).min(b[1] + b[3]);

    if r - x < 0 || bottom - y < 0 {
        return None;
    }

    Some([x, y, r, bottom])
}

impl TryFrom<BBox<Ltwh>> for Rectangle {
    type Error = Error;

    #[inline]
    fn try_from(bbox: BBox<Ltwh>) -> Result<Self> {
        Rectangle::from_origin_and_size(
            Point::new(bbox.left(), bbox.top()),
            bbox.width(),
            bbox.height(),
        )
    }
}

impl TryFrom<BBox<Ltrb>> for Rectangle {
    type Error = Error;

    #[inline]
    fn try_from(bbox: BBox<Ltrb>) -> Result<Self> {
        Rectangle::from_corners(
            Point::new(bbox.left(), bbox.top()),
            Point::new(bbox.right(), bbox.bottom()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xywh(x: i32, y: i32, w: i32, h: i32) -> Rectangle {
        Rectangle::from_origin_and_size(Point::new(x, y), w, h).unwrap()
    }

    #[test]
    fn test_point_equality() {
        let p1 = Point::new(100, 100);
        let p2 = Point::new(100, 100);
        let p3 = Point::new(150, 150);

        assert_eq!(p1, p2);
        assert_ne!(p2, p3);
        assert_eq!(p1.x(), 100);
        assert_eq!(p1.y(), 100);
    }

    #[test]
    fn test_rectangle_from_corners() {
        let p1 = Point::new(100, 100);
        let p2 = Point::new(200, 250);
        let r = Rectangle::from_corners(p1, p2).unwrap();

        assert_eq!(r.point1(), p1);
        assert_eq!(r.point2(), p2);
        assert_eq!(r.width(), 100);
        assert_eq!(r.height(), 150);
        assert_eq!(r.midpoint(), Point::new(150, 175));
        assert_eq!(r.xywh().into_tuple(), (100, 100, 100, 150));
    }

    #[test]
    fn test_rectangle_from_origin_and_size() {
        let r = xywh(100, 100, 100, 100);

        assert_eq!(r.point1(), Point::new(100, 100));
        assert_eq!(r.point2(), Point::new(200, 200));
        assert_eq!(r.midpoint(), Point::new(150, 150));
        assert_eq!(r.xywh().into_tuple(), (100, 100, 100, 100));
    }

    #[test]
    fn test_reversed_corners_give_negative_size() {
        let r = Rectangle::from_corners(Point::new(50, 50), Point::new(10, 20)).unwrap();

        assert_eq!(r.width(), -40);
        assert_eq!(r.height(), -30);
        assert_eq!(r.ltrb().as_ltwh(), r.xywh());
    }

    #[test]
    fn test_midpoint_truncates() {
        let r = Rectangle::from_corners(Point::new(0, 0), Point::new(100, 100)).unwrap();
        assert_eq!(r.midpoint(), Point::new(50, 50));

        let r = Rectangle::from_corners(Point::new(0, 0), Point::new(5, 7)).unwrap();
        assert_eq!(r.midpoint(), Point::new(2, 3));

        let r = Rectangle::from_corners(Point::new(-5, -5), Point::new(0, 0)).unwrap();
        assert_eq!(r.midpoint(), Point::new(-2, -2));
    }

    #[test]
    fn test_intersection_inclusive_boundary() {
        let tracked = xywh(100, 100, 200, 200);

        assert_eq!(tracked.intersection(&tracked), Some(tracked));
        assert!(tracked.intersects(&xywh(50, 50, 200, 200)));
        assert!(tracked.intersects(&xywh(150, 150, 200, 200)));

        let corner = tracked.intersection(&xywh(300, 300, 200, 200));
        assert_eq!(corner, Some(xywh(300, 300, 0, 0)));

        assert!(!tracked.intersects(&xywh(301, 301, 200, 200)));
        assert!(!tracked.intersects(&xywh(301, 100, 10, 10)));
    }

    #[test]
    fn test_intersection_symmetric() {
        let a = xywh(0, 0, 10, 10);
        let candidates = [
            xywh(5, 5, 10, 10),
            xywh(10, 0, 5, 5),
            xywh(11, 0, 5, 5),
            xywh(-20, -20, 50, 50),
        ];

        for b in &candidates {
            assert_eq!(a.intersection(b), b.intersection(&a));
        }
    }

    #[test]
    fn test_distance() {
        let a = Point::new(0, 0);
        let b = Point::new(3, 4);
        assert!((a.distance(&b) - 5.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_bbox_roundtrip() {
        let r = xywh(3, 4, 10, 20);
        assert_eq!(Rectangle::try_from(r.xywh()).unwrap(), r);
        assert_eq!(Rectangle::try_from(r.ltrb()).unwrap(), r);
    }

    #[test]
    fn test_out_of_range_construction_rejected() {
        let res = Rectangle::from_origin_and_size(Point::new(i32::MAX - 5, 0), 10, 10);
        assert!(matches!(res, Err(Error::CoordinateOverflow(_))));

        let res = Rectangle::from_origin_and_size(Point::new(0, i32::MIN), 0, -1);
        assert!(res.is_err());

        let res = Rectangle::from_corners(Point::new(i32::MIN, 0), Point::new(i32::MAX, 0));
        assert!(matches!(res, Err(Error::CoordinateOverflow(_))));

        let res = Rectangle::try_from(BBox::ltwh(i32::MAX, 0, 1, 1));
        assert!(res.is_err());

        let r = Rectangle::from_origin_and_size(Point::new(i32::MAX - 10, 0), 10, 10).unwrap();
        assert_eq!(r.point2(), Point::new(i32::MAX, 10));
    }

    #[test]
    fn test_extreme_coordinates_do_not_overflow() {
        let r = Rectangle::from_corners(Point::new(i32::MAX - 1, 0), Point::new(i32::MAX, 0)).unwrap();
        assert_eq!(r.midpoint(), Point::new(i32::MAX - 1, 0));

        let r = Rectangle::from_corners(Point::new(i32::MIN, i32::MIN), Point::new(-1, -1)).unwrap();
        assert_eq!(r.midpoint(), Point::new(i32::MIN / 2, i32::MIN / 2));

        let near_max = xywh(i32::MAX - 20, 0, 20, 20);
        assert!(near_max.intersects_xywh(i32::MAX - 5, 0, 10, 10));
        assert!(!near_max.intersects_xywh(i32::MAX - 5, 21, 10, 10));
        assert_eq!(
            near_max.intersection(&xywh(i32::MAX - 5, 5, 5, 100)),
            Some(xywh(i32::MAX - 5, 5, 5, 15))
        );

        let near_min = xywh(i32::MIN, i32::MIN, 10, 10);
        assert!(!near_min.intersects(&near_max));
        assert!(near_min.intersects_xywh(i32::MIN, i32::MIN, 1, 1));
    }

    #[test]
    fn test_serde_rejects_out_of_range_corners() {
        let r = xywh(1, 2, 3, 4);
        let json = serde_json::to_string(&r).unwrap();
        assert_eq!(serde_json::from_str::<Rectangle>(&json).unwrap(), r);

        let bad = format!(
            r#"{{"point1":{{"x":{},"y":0}},"point2":{{"x":{},"y":0}}}}"#,
            i32::MIN,
            i32::MAX
        );
        assert!(serde_json::from_str::<Rectangle>(&bad).is_err());
    }
}
