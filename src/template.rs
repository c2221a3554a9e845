use log::{debug, trace};
use ndarray::{Array2, ArrayView2, Zip};
use serde_derive::{Deserialize, Serialize};

use crate::bbox::{BBox, Ltwh};
use crate::error::Error;
use crate::frame::Frame;
use crate::{Tracking, TrackingBackend};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TemplateTrackerConfig {
    /// Max displacement per frame, in px along each axis
    pub search_radius: u32,
    pub max_mean_sq_error: f32,
    pub adapt_template: bool,
}

impl TemplateTrackerConfig {
    pub fn new(search_radius: u32, max_mean_sq_error: f32) -> Self {
        Self {
            search_radius,
            max_mean_sq_error,
            adapt_template: true,
        }
    }
}

impl Default for TemplateTrackerConfig {
    fn default() -> Self {
        Self::new(16, 400.0)
    }
}

/// Sum-of-squared-differences template matcher over grayscale frames.
#[derive(Debug, Clone, Default)]
pub struct TemplateBackend {
    config: TemplateTrackerConfig,
}

impl TemplateBackend {
    pub fn new(config: TemplateTrackerConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &TemplateTrackerConfig {
        &self.config
    }
}

impl TrackingBackend<Frame> for TemplateBackend {
    type Tracker = TemplateTracker;

    fn initialize(&self, frame: &Frame, bbox: &BBox<Ltwh>) -> Result<TemplateTracker, Error> {
        let (width, height) = frame.dims();
        let patch = frame.patch(bbox).ok_or(Error::InvalidArea {
            area: *bbox,
            width,
            height,
        })?;

        Ok(TemplateTracker {
            config: self.config.clone(),
            template: patch.to_owned(),
            bbox: *bbox,
        })
    }
}

#[derive(Debug, Clone)]
pub struct TemplateTracker {
    config: TemplateTrackerConfig,
    template: Array2<u8>,
    bbox: BBox<Ltwh>,
}

impl TemplateTracker {
    #[inline]
    pub fn bbox(&self) -> &BBox<Ltwh> {
        &self.bbox
    }

    fn mean_sq_error(&self, patch: ArrayView2<'_, u8>) -> f32 {
        let mut sum = 0u64;
        Zip::from(&self.template).and(patch).for_each(|&a, &b| {
            let d = a as i64 - b as i64;
            sum += (d * d) as u64;
        });

        sum as f32 / self.template.len() as f32
    }
}

impl Tracking<Frame> for TemplateTracker {
    fn update(&mut self, frame: &Frame) -> Option<BBox<Ltwh>> {
        let (fw, fh) = frame.dims();
        let (w, h) = (self.bbox.width(), self.bbox.height());

        if w as usize > fw || h as usize > fh {
            debug!("frame {}x{} is smaller than the template", fw, fh);
            return None;
        }

        // window bounds stay within [0, frame - template], so they fit in i32
        let r = self.config.search_radius as i64;
        let window = |pos: i32, size: i32, frame: usize| {
            let lo = (pos as i64 - r).max(0);
            let hi = (pos as i64 + r).min(frame as i64 - size as i64);
            (lo as i32, hi as i32)
        };
        let (x0, x1) = window(self.bbox.left(), w, fw);
        let (y0, y1) = window(self.bbox.top(), h, fh);

        let mut best: Option<(f32, BBox<Ltwh>)> = None;

        for y in y0..=y1 {
            for x in x0..=x1 {
                let candidate = BBox::ltwh(x, y, w, h);
                let patch = match frame.patch(&candidate) {
                    Some(patch) => patch,
                    None => continue,
                };

                let err = self.mean_sq_error(patch);
                if best.map_or(true, |(e, _)| err < e) {
                    best = Some((err, candidate));
                }
            }
        }

        let (err, bbox) = best?;
        trace!("best match {:?} with error {:.1}", bbox.as_slice(), err);

        if err > self.config.max_mean_sq_error {
            return None;
        }

        if self.config.adapt_template {
            self.template = frame.patch(&bbox)?.to_owned();
        }

        self.bbox = bbox;

        Some(bbox)
    }
}
