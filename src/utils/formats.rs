use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use crate::utils::PlaceholderError;

/// Media type reported for files whose extension is not a known image type.
pub const UNKNOWN_MEDIA_TYPE: &str = "application/octet-stream";

/// Media type of every generated placeholder.
pub const PLACEHOLDER_MEDIA_TYPE: &str = "image/png";

/// Media type of the batch archive.
pub const ARCHIVE_MEDIA_TYPE: &str = "application/zip";

/// Image formats the host recognises when building uploads from paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    JPEG,
    PNG,
    GIF,
    WebP,
    BMP,
    TIFF,
    ICO,
    AVIF,
}

lazy_static! {
    static ref EXTENSION_FORMATS: HashMap<&'static str, ImageFormat> = {
        let mut map = HashMap::new();
        for format in ImageFormat::ALL {
            for ext in format.extensions() {
                map.insert(*ext, format);
            }
        }
        map
    };
}

impl ImageFormat {
    pub const ALL: [ImageFormat; 8] = [
        Self::JPEG,
        Self::PNG,
        Self::GIF,
        Self::WebP,
        Self::BMP,
        Self::TIFF,
        Self::ICO,
        Self::AVIF,
    ];

    /// Get file extensions associated with this format
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::JPEG => &["jpg", "jpeg"],
            Self::PNG => &["png"],
            Self::GIF => &["gif"],
            Self::WebP => &["webp"],
            Self::BMP => &["bmp"],
            Self::TIFF => &["tif", "tiff"],
            Self::ICO => &["ico"],
            Self::AVIF => &["avif"],
        }
    }

    /// The declared media type an upload of this format carries
    pub fn media_type(&self) -> &'static str {
        match self {
            Self::JPEG => "image/jpeg",
            Self::PNG => "image/png",
            Self::GIF => "image/gif",
            Self::WebP => "image/webp",
            Self::BMP => "image/bmp",
            Self::TIFF => "image/tiff",
            Self::ICO => "image/x-icon",
            Self::AVIF => "image/avif",
        }
    }
}

impl FromStr for ImageFormat {
    type Err = PlaceholderError;

    fn from_str(ext: &str) -> Result<Self, Self::Err> {
        let ext = ext.to_lowercase();
        EXTENSION_FORMATS
            .get(ext.as_str())
            .copied()
            .ok_or_else(|| PlaceholderError::decode(format!("Unsupported image format: {}", ext)))
    }
}

/// Derives the declared media type of a file from its extension.
///
/// Unknown or missing extensions map to [`UNKNOWN_MEDIA_TYPE`] so intake filters them out.
pub fn media_type_from_path(path: impl AsRef<Path>) -> &'static str {
    path.as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .and_then(|ext| ImageFormat::from_str(ext).ok())
        .map(|format| format.media_type())
        .unwrap_or(UNKNOWN_MEDIA_TYPE)
}

/// Whether a declared media type denotes an image.
pub fn is_image_media_type(media_type: &str) -> bool {
    media_type.starts_with("image/")
}

/// Strips a trailing `.ext` from a file name.
///
/// The extension must be non-empty and contain neither `/` nor `.`, so
/// `"archive.tar.gz"` becomes `"archive.tar"` while `"notes."` is left alone.
pub fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(dot) => {
            let ext = &name[dot + 1..];
            if ext.is_empty() || ext.contains('/') {
                name
            } else {
                &name[..dot]
            }
        }
        None => name,
    }
}

/// Output file name of the placeholder generated for `source_name`.
pub fn placeholder_file_name(source_name: &str) -> String {
    // Directory parts of the upload name never reach the output
    let base = source_name.rsplit(['/', '\\']).next().unwrap_or(source_name);
    format!("{}.png", strip_extension(base))
}

/// Name of a batch archive created at `timestamp_ms` (unix epoch milliseconds).
pub fn archive_file_name(timestamp_ms: u128) -> String {
    format!("placeholder-images-{}.zip", timestamp_ms)
}
