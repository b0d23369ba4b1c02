use image::ImageFormat;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The `image` crate was built without a codec the pipeline needs.
    #[error("{0:?} {1} is not supported by this build, enable the matching `image` feature")]
    CapabilityMissing(ImageFormat, &'static str),
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),
    #[error("Icon size {0}px is outside of 1..=256")]
    InvalidIconSize(u32),
    #[error(transparent)]
    Image(#[from] image::ImageError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    /// Process exit status used by `generate-ico` for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::InputNotFound(..) => 1,
            Error::CapabilityMissing(..) => 3,
            Error::InvalidIconSize(..) | Error::Image(..) | Error::Io(..) => 2,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
