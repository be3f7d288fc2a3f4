//! Image decoding, encoding and conversion between `image` buffers and pixel arrays

use crate::io::configuration::IMAGE_EXTENSIONS;
use crate::io::error::{ImgprocError, Result, WithPath};
use image::RgbImage;
use log::{debug, warn};
use ndarray::Array3;
use std::path::{Path, PathBuf};

/// RGB pixel array with dimensions (height, width, 3)
pub type Image = Array3<u8>;

/// Check that an array is a three-channel image and return its (height, width)
///
/// # Errors
///
/// Returns an error if the last dimension is not 3
pub fn check_image(image: &Image) -> Result<(usize, usize)> {
    let (height, width, channels) = image.dim();
    if channels != 3 {
        return Err(ImgprocError::InvalidSourceData {
            reason: format!("expected 3 color channels, found {channels}"),
        });
    }
    Ok((height, width))
}

/// Convert an `image` RGB buffer into a pixel array
///
/// # Errors
///
/// Returns an error if the raw buffer does not match the reported dimensions
pub fn from_rgb_image(rgb: RgbImage) -> Result<Image> {
    let (width, height) = (rgb.width() as usize, rgb.height() as usize);
    Ok(Array3::from_shape_vec((height, width, 3), rgb.into_raw())?)
}

/// Convert a pixel array into an `image` RGB buffer
///
/// # Errors
///
/// Returns an error if the array is not three-channel or too large for `u32` dimensions
pub fn to_rgb_image(image: &Image) -> Result<RgbImage> {
    let (height, width) = check_image(image)?;
    let raw: Vec<u8> = image.iter().copied().collect();
    let dims = u32::try_from(width).ok().zip(u32::try_from(height).ok());
    dims.and_then(|(w, h)| RgbImage::from_raw(w, h, raw))
        .ok_or_else(|| ImgprocError::InvalidSourceData {
            reason: format!("cannot encode a {height}x{width} image"),
        })
}

/// Load an image as an RGB pixel array
///
/// Images with an alpha channel are accepted only when every pixel is fully opaque.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened or decoded
/// - The image has a transparency layer that masks any pixel
pub fn load_rgb<P: AsRef<Path>>(path: P) -> Result<Image> {
    let path = path.as_ref();
    let img = image::open(path).with_path(path)?;

    if img.color().has_alpha() && img.to_rgba8().pixels().any(|p| p.0[3] != u8::MAX) {
        return Err(ImgprocError::TransparentImage {
            path: path.to_path_buf(),
        });
    }

    debug!(
        "Loaded {} ({}x{})",
        path.display(),
        img.height(),
        img.width()
    );
    from_rgb_image(img.to_rgb8())
}

/// Save a pixel array, picking the format from the file extension
///
/// Missing parent directories are created.
///
/// # Errors
///
/// Returns an error if:
/// - The array is not a valid three-channel image
/// - The parent directory cannot be created
/// - The image cannot be encoded or written
pub fn save<P: AsRef<Path>>(image: &Image, path: P) -> Result<()> {
    let path = path.as_ref();
    let rgb = to_rgb_image(image)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.is_dir() {
            warn!("Creating directory {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| ImgprocError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }
    }

    rgb.save(path).map_err(|e| ImgprocError::ImageExport {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Whether a path carries one of the recognised image extensions
pub fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

/// List the image files of a folder in sorted order
///
/// # Errors
///
/// Returns an error if the directory cannot be read
pub fn list_images<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).with_path(dir)? {
        let path = entry.with_path(dir)?.path();
        if path.is_file() && has_image_extension(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// File size expressed in the largest fitting decimal unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileSize {
    /// Rounded-up amount in `unit`
    pub amount: u64,
    /// One of `B`, `KB`, `MB`
    pub unit: &'static str,
}

impl FileSize {
    /// Express a byte count in B, KB or MB (rounded up)
    ///
    /// # Errors
    ///
    /// Returns an error for sizes of 1 GB or more
    pub fn from_bytes(bytes: u64) -> Result<Self> {
        match bytes {
            0..1_000 => Ok(Self {
                amount: bytes,
                unit: "B",
            }),
            1_000..1_000_000 => Ok(Self {
                amount: bytes.div_ceil(1_000),
                unit: "KB",
            }),
            1_000_000..1_000_000_000 => Ok(Self {
                amount: bytes.div_ceil(1_000_000),
                unit: "MB",
            }),
            _ => Err(ImgprocError::InvalidSourceData {
                reason: format!("file size past 1GB ({bytes} bytes)"),
            }),
        }
    }
}

impl std::fmt::Display for FileSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.amount, self.unit)
    }
}

/// Summary of an image file as shown by the `info` command
#[derive(Debug, Clone)]
pub struct ImageInfo {
    /// Extension as written in the file name (upper case)
    pub extension: String,
    /// Format detected from the file signature
    pub format: Option<image::ImageFormat>,
    /// Dimensions as (height, width)
    pub dimensions: (u32, u32),
    /// Size on disk
    pub size: FileSize,
}

/// Describe an image file without decoding its pixels
///
/// # Errors
///
/// Returns an error if the file cannot be read or its header cannot be parsed
pub fn describe<P: AsRef<Path>>(path: P) -> Result<ImageInfo> {
    let path = path.as_ref();
    let bytes = std::fs::metadata(path).with_path(path)?.len();
    let reader = image::ImageReader::open(path)
        .with_path(path)?
        .with_guessed_format()
        .with_path(path)?;
    let format = reader.format();
    let (width, height) = reader.into_dimensions().with_path(path)?;

    Ok(ImageInfo {
        extension: path
            .extension()
            .map(|e| e.to_string_lossy().to_uppercase())
            .unwrap_or_default(),
        format,
        dimensions: (height, width),
        size: FileSize::from_bytes(bytes)?,
    })
}
