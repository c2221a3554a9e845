use log::debug;
use opencv::{
    core::{Mat, Ptr, Rect},
    prelude::*,
    tracking::{TrackerKCF, TrackerKCF_Params},
};

use crate::bbox::{BBox, Ltwh};
use crate::error::Error;
use crate::{Tracking, TrackingBackend};

/// OpenCV kernelized correlation filter, one instance per region
#[derive(Debug, Clone, Copy, Default)]
pub struct KcfBackend;

impl KcfBackend {
    pub fn new() -> Self {
        Self
    }
}

impl TrackingBackend<Mat> for KcfBackend {
    type Tracker = KcfTracker;

    fn initialize(&self, frame: &Mat, bbox: &BBox<Ltwh>) -> Result<KcfTracker, Error> {
        let params = TrackerKCF_Params::default()?;
        let mut inner = TrackerKCF::create(params)?;
        inner.init(frame, to_rect(bbox))?;

        Ok(KcfTracker { inner })
    }
}

pub struct KcfTracker {
    inner: Ptr<TrackerKCF>,
}

impl Tracking<Mat> for KcfTracker {
    fn update(&mut self, frame: &Mat) -> Option<BBox<Ltwh>> {
        let mut rect = Rect::default();

        match self.inner.update(frame, &mut rect) {
            Ok(true) => Some(BBox::ltwh(rect.x, rect.y, rect.width, rect.height)),
            Ok(false) => None,
            Err(err) => {
                debug!("KCF update failed: {}", err);
                None
            }
        }
    }
}

#[inline]
fn to_rect(bbox: &BBox<Ltwh>) -> Rect {
    Rect::new(bbox.left(), bbox.top(), bbox.width(), bbox.height())
}
