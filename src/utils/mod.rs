pub mod error;
pub mod validation;
pub mod formats;
pub mod fs;

pub use error::{ConverterError, ConverterResult, ItemError};
pub use validation::{parse_settings, validate_sources};
pub use formats::{SOURCE_EXTENSIONS, base_name, file_stem, has_source_extension};
pub use fs::{save_archive, unique_archive_path, validate_save_dir};
