pub mod error;
pub mod formats;
pub mod fs;

pub use error::{PlaceholderError, PlaceholderResult};
pub use formats::{
    archive_file_name,
    is_image_media_type,
    media_type_from_path,
    placeholder_file_name,
    strip_extension,
    ImageFormat,
    ARCHIVE_MEDIA_TYPE,
    PLACEHOLDER_MEDIA_TYPE,
    UNKNOWN_MEDIA_TYPE,
};
pub use fs::{read_input_file, save_export};
