// Module declarations in dependency order
pub mod cli;
pub mod core;
pub mod processing;
pub mod server;
pub mod utils;

// Public exports for external consumers
pub use core::{
    ArchiveResult, ConversionConfig, ConversionError, OutputFormat, Progress, QualityPreset,
    SourceItem,
};
pub use processing::{BatchProcessor, codec_version, convert, init_codec};
pub use utils::{ConverterError, ConverterResult, ItemError};
