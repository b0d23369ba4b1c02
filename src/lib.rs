//! A crate for turning a single image into a multi-size Windows ICO file.
//! The source is resized to every configured size with a Lanczos filter.
//!
//! ## Examples
//! ### Basic
//! Writes the 16px, 32px, 48px, 64px, 128px and 256px versions of
//! `app-icon.png` into `app_icon.ico`, creating missing directories.
//!
//! ```no_run
//! # use app_icon::IcoBuilder;
//! let report = IcoBuilder::new("assets/app-icon.png")
//!     .build_file("windows/runner/resources/app_icon.ico")?;
//! println!("{report}");
//! # Ok::<(), app_icon::Error>(())
//! ```
//!
//! ### Custom Icon Sizes
//! ```no_run
//! # use app_icon::IcoBuilder;
//! IcoBuilder::new("assets/app-icon.png")
//!     .sizes(&[16, 32])
//!     .build_file("app-icon.ico")?;
//! # Ok::<(), app_icon::Error>(())
//! ```

use image::codecs::ico::{IcoEncoder, IcoFrame};
use image::codecs::png::PngEncoder;
use image::imageops::{resize, FilterType};
use image::{DynamicImage, ExtendedColorType, ImageEncoder, ImageFormat, ImageReader};
use std::borrow::Cow;
use std::fmt;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

mod error;

pub use error::{Error, Result};

/// Source image used by `generate-ico`, relative to the working directory.
pub const DEFAULT_INPUT_PATH: &str = "assets/app-icon.png";
/// Icon written by `generate-ico`, relative to the working directory.
pub const DEFAULT_OUTPUT_PATH: &str = "windows/runner/resources/app_icon.ico";

/// The largest edge an ICO directory entry can describe.
const MAX_ICON_SIZE: u32 = 256;

/// Builds an ICO file from one source image.
/// Every size is resampled from the source and forced to a square.
#[derive(Debug)]
pub struct IcoBuilder {
    sizes: IconSizes,
    source_file: PathBuf,
}

impl IcoBuilder {
    /// Creates a builder for `source_file`. The file can be PNG or any other format
    /// enabled on the [`image`] crate through this crate's features.
    pub fn new(source_file: impl AsRef<Path>) -> IcoBuilder {
        IcoBuilder {
            sizes: IconSizes::default(),
            source_file: source_file.as_ref().to_owned(),
        }
    }

    /// Customizes the sizes included in the ICO file. Defaults to [`IconSizes::WINDOWS_APP`].
    pub fn sizes(&mut self, sizes: impl Into<IconSizes>) -> &mut IcoBuilder {
        self.sizes = sizes.into();
        self
    }

    /// Replaces the source file.
    pub fn source_file(&mut self, source_file: impl AsRef<Path>) -> &mut IcoBuilder {
        self.source_file = source_file.as_ref().to_owned();
        self
    }

    /// Builds the ICO file and writes it to `output_file_path`, creating
    /// missing parent directories.
    ///
    /// Nothing is written unless every frame was encoded successfully.
    pub fn build_file(&self, output_file_path: impl AsRef<Path>) -> Result<IconReport> {
        let output_file_path = output_file_path.as_ref();

        check_capabilities()?;
        self.sizes.validate()?;
        if !self.source_file.exists() {
            return Err(Error::InputNotFound(self.source_file.clone()));
        }

        let icon = decode_icon(&self.source_file)?;

        let frames: Vec<_> = self
            .sizes
            .0
            .iter()
            .copied()
            .map(|size| create_ico_frame(&icon, size))
            .collect::<Result<_>>()?;

        let mut container = Vec::new();
        IcoEncoder::new(&mut container).encode_images(&frames)?;

        if let Some(parent) = output_file_path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(output_file_path, &container)?;

        info!(
            path = %output_file_path.display(),
            frames = frames.len(),
            bytes = container.len(),
            "wrote icon container"
        );

        Ok(IconReport {
            path: output_file_path.to_owned(),
            sizes: self.sizes.as_slice().to_vec(),
        })
    }
}

/// What [`IcoBuilder::build_file`] wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconReport {
    path: PathBuf,
    sizes: Vec<u32>,
}

impl IconReport {
    /// Path the icon container was written to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sizes in the order they appear in the icon directory.
    pub fn sizes(&self) -> &[u32] {
        &self.sizes
    }
}

impl fmt::Display for IconReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Successfully created {} with sizes: {:?}",
            self.path.display(),
            self.sizes
        )
    }
}

/// A list of square icon sizes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconSizes(Cow<'static, [u32]>);

impl IconSizes {
    /// The sizes of a Windows application icon: 16x16, 32x32, 48x48, 64x64, 128x128 and 256x256.
    pub const WINDOWS_APP: Self = Self::new(&[16, 32, 48, 64, 128, 256]);

    pub const fn new(sizes: &'static [u32]) -> IconSizes {
        Self(Cow::Borrowed(sizes))
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    fn validate(&self) -> Result<()> {
        match self
            .0
            .iter()
            .find(|&&size| size == 0 || size > MAX_ICON_SIZE)
        {
            Some(&size) => Err(Error::InvalidIconSize(size)),
            None => Ok(()),
        }
    }
}

impl Default for IconSizes {
    fn default() -> Self {
        IconSizes::WINDOWS_APP
    }
}

impl<'a, I> From<I> for IconSizes
where
    I: IntoIterator<Item = &'a u32>,
{
    fn from(value: I) -> Self {
        IconSizes(value.into_iter().copied().collect::<Vec<_>>().into())
    }
}

/// Fails when the linked `image` build cannot decode PNG sources or write
/// PNG-compressed ICO frames.
pub fn check_capabilities() -> Result<()> {
    let required = [
        (ImageFormat::Png, "decoding", ImageFormat::Png.reading_enabled()),
        (ImageFormat::Png, "encoding", ImageFormat::Png.writing_enabled()),
        (ImageFormat::Ico, "encoding", ImageFormat::Ico.writing_enabled()),
    ];
    match required.into_iter().find(|(_, _, enabled)| !enabled) {
        Some((format, operation, _)) => Err(Error::CapabilityMissing(format, operation)),
        None => Ok(()),
    }
}

fn decode_icon(path: &Path) -> Result<DynamicImage> {
    let icon = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    debug!(
        path = %path.display(),
        width = icon.width(),
        height = icon.height(),
        "decoded source image"
    );
    Ok(icon)
}

fn create_ico_frame(icon: &DynamicImage, size: u32) -> Result<IcoFrame<'static>> {
    let resized = resize(icon, size, size, FilterType::Lanczos3);
    encode_ico_frame(resized.as_raw(), size)
}

fn encode_ico_frame(buf: &[u8], size: u32) -> Result<IcoFrame<'static>> {
    let color_type = ExtendedColorType::Rgba8;
    let mut encoded = Vec::new();
    PngEncoder::new(Cursor::new(&mut encoded)).write_image(buf, size, size, color_type)?;
    debug!(size, bytes = encoded.len(), "encoded icon frame");
    Ok(IcoFrame::with_encoded(encoded, size, size, color_type)?)
}
