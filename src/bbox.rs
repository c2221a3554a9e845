use serde::{Deserialize, Serialize};
use serde_derive::{Deserialize, Serialize};
use std::marker::PhantomData;

pub trait BBoxFormat: std::fmt::Debug {}

/// Left-top-width-height format, contains left top corner and width-height
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct Ltwh;
impl BBoxFormat for Ltwh {}

/// Left-top-right-bottom format, contains left top and right bottom corners
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct Ltrb;
impl BBoxFormat for Ltrb {}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BBox<F: BBoxFormat + Serialize + Deserialize<'static> + PartialEq>(
    [i32; 4],
    PhantomData<F>,
);

impl<F: BBoxFormat + Serialize + Deserialize<'static> + PartialEq> From<BBox<F>> for [i32; 4] {
    fn from(bbox: BBox<F>) -> Self {
        bbox.0
    }
}

impl<F: BBoxFormat + Serialize + Deserialize<'static> + PartialEq> BBox<F> {
    #[inline]
    pub fn as_slice(&self) -> &[i32; 4] {
        &self.0
    }

    #[inline]
    pub fn into_tuple(self) -> (i32, i32, i32, i32) {
        (self.0[0], self.0[1], self.0[2], self.0[3])
    }
}

impl BBox<Ltwh> {
    #[inline]
    pub fn ltwh(x: i32, y: i32, w: i32, h: i32) -> Self {
        BBox([x, y, w, h], Default::default())
    }

    #[inline(always)]
    pub fn left(&self) -> i32 {
        self.0[0]
    }

    #[inline(always)]
    pub fn top(&self) -> i32 {
        self.0[1]
    }

    #[inline(always)]
    pub fn width(&self) -> i32 {
        self.0[2]
    }

    #[inline(always)]
    pub fn height(&self) -> i32 {
        self.0[3]
    }

    #[inline]
    pub fn as_ltrb(&self) -> BBox<Ltrb> {
        self.into()
    }
}

impl BBox<Ltrb> {
    #[inline]
    pub fn ltrb(l: i32, t: i32, r: i32, b: i32) -> Self {
        BBox([l, t, r, b], Default::default())
    }

    #[inline]
    pub fn as_ltwh(&self) -> BBox<Ltwh> {
        self.into()
    }

    #[inline(always)]
    pub fn left(&self) -> i32 {
        self.0[0]
    }

    #[inline(always)]
    pub fn top(&self) -> i32 {
        self.0[1]
    }

    #[inline(always)]
    pub fn right(&self) -> i32 {
        self.0[2]
    }

    #[inline(always)]
    pub fn bottom(&self) -> i32 {
        self.0[3]
    }
}

// Corners past the i32 range are clamped to it
impl<'a> From<&'a BBox<Ltwh>> for BBox<Ltrb> {
    #[inline]
    fn from(v: &'a BBox<Ltwh>) -> Self {
        Self(
            [v.0[0], v.0[1], v.0[0].saturating_add(v.0[2]), v.0[1].saturating_add(v.0[3])],
            Default::default(),
        )
    }
}

// Sizes past the i32 range are clamped to it
impl<'a> From<&'a BBox<Ltrb>> for BBox<Ltwh> {
    #[inline]
    fn from(v: &'a BBox<Ltrb>) -> Self {
        Self(
            [v.0[0], v.0[1], v.0[2].saturating_sub(v.0[0]), v.0[3].saturating_sub(v.0[1])],
            Default::default(),
        )
    }
}

impl From<(i32, i32, i32, i32)> for BBox<Ltwh> {
    #[inline]
    fn from((x, y, w, h): (i32, i32, i32, i32)) -> Self {
        BBox::ltwh(x, y, w, h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ltwh_ltrb_conversion() {
        let bbox = BBox::ltwh(100, 50, 200, 20);
        let ltrb = bbox.as_ltrb();

        assert_eq!(ltrb.as_slice(), &[100, 50, 300, 70]);
        assert_eq!(ltrb.as_ltwh(), bbox);
    }

    #[test]
    fn test_conversion_clamps_extremes() {
        let ltrb = BBox::ltwh(i32::MAX - 1, 0, 10, 10).as_ltrb();
        assert_eq!(ltrb.as_slice(), &[i32::MAX - 1, 0, i32::MAX, 10]);

        let ltwh = BBox::ltrb(i32::MIN, 0, i32::MAX, 1).as_ltwh();
        assert_eq!(ltwh.width(), i32::MAX);
    }

    #[test]
    fn test_into_tuple() {
        let bbox: BBox<Ltwh> = (1, 2, 3, 4).into();
        assert_eq!(bbox.into_tuple(), (1, 2, 3, 4));
        assert_eq!(<[i32; 4]>::from(bbox), [1, 2, 3, 4]);
    }
}
