use thiserror::Error;

use crate::bbox::{BBox, Ltwh};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("object id {0} is already tracked")]
    DuplicateId(u32),

    #[error("area {area:?} is not trackable within a {width}x{height} frame")]
    InvalidArea {
        area: BBox<Ltwh>,
        width: usize,
        height: usize,
    },

    #[error("object ids are exhausted")]
    IdsExhausted,

    #[error("rectangle {0:?} does not fit the i32 coordinate range")]
    CoordinateOverflow([i32; 4]),

    #[error("tracker initialization failed: {0}")]
    TrackerInit(String),

    #[cfg(feature = "opencv")]
    #[error("OpenCV Error: {0}")]
    OpenCv(#[from] opencv::Error),
}
