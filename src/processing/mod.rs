pub mod archive;
pub mod batch;
pub mod libvips;

pub use archive::build_archive;
pub use batch::{BatchProcessor, OutputNamer, convert};
pub use self::libvips::{codec_version, init_codec, is_initialized};
