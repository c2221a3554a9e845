pub mod bbox;
pub mod error;
pub mod frame;
pub mod geometry;
#[cfg(feature = "opencv")]
pub mod kcf;
pub mod object;
pub mod registry;
pub mod template;

mod id_alloc;
mod track;

pub use frame::Frame;
pub use geometry::{Point, Rectangle};
pub use object::TrackedObject;
pub use registry::{Registry, RegistryConfig};
pub use track::Track;

use bbox::{BBox, Ltwh};
use error::Error;

/// A tracker instance bound to one region.
///
/// `None` means the region was lost on this frame; no box is reported then.
pub trait Tracking<F: ?Sized> {
    fn update(&mut self, frame: &F) -> Option<BBox<Ltwh>>;
}

impl<F: ?Sized, T: Tracking<F> + ?Sized> Tracking<F> for Box<T> {
    #[inline]
    fn update(&mut self, frame: &F) -> Option<BBox<Ltwh>> {
        (**self).update(frame)
    }
}

/// Creates tracker instances for new regions.
pub trait TrackingBackend<F: ?Sized> {
    type Tracker: Tracking<F>;

    fn initialize(&self, frame: &F, bbox: &BBox<Ltwh>) -> Result<Self::Tracker, Error>;
}
