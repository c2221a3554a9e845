use ndarray::{s, Array2, ArrayView2};

use crate::bbox::{BBox, Ltwh};

/// Single-channel 8-bit frame, indexed `[row, column]`
#[derive(Debug, Clone)]
pub struct Frame {
    pub pixels: Array2<u8>,
    pub timestamp: f32, // in seconds
}

impl Frame {
    #[inline]
    pub fn new(pixels: Array2<u8>, timestamp: f32) -> Self {
        Self { pixels, timestamp }
    }

    /// (width, height)
    #[inline]
    pub fn dims(&self) -> (usize, usize) {
        let (rows, cols) = self.pixels.dim();
        (cols, rows)
    }

    /// Whether the box is non-empty and lies fully inside the frame
    pub fn contains(&self, bbox: &BBox<Ltwh>) -> bool {
        let (fw, fh) = self.dims();

        bbox.width() > 0
            && bbox.height() > 0
            && bbox.left() >= 0
            && bbox.top() >= 0
            && bbox.left() as i64 + bbox.width() as i64 <= fw as i64
            && bbox.top() as i64 + bbox.height() as i64 <= fh as i64
    }

    /// Pixels under the box, `None` unless [`Frame::contains`] holds
    pub fn patch(&self, bbox: &BBox<Ltwh>) -> Option<ArrayView2<'_, u8>> {
        if !self.contains(bbox) {
            return None;
        }

        let (l, t) = (bbox.left() as usize, bbox.top() as usize);
        let (w, h) = (bbox.width() as usize, bbox.height() as usize);

        Some(self.pixels.slice(s![t..t + h, l..l + w]))
    }
}
