use tracing::debug;

use crate::core::{ArchiveResult, ConversionConfig, ConversionError, ConvertedItem, Progress, SourceItem};
use crate::processing::archive::build_archive;
use crate::processing::libvips::{convert_single, is_initialized};
use crate::utils::{ConverterError, ConverterResult};

use super::naming::OutputNamer;

/// Converts a batch of uploaded images and packs the results into one zip.
///
/// Items are processed strictly in input order. A failing item is recorded
/// and skipped; only a batch without a single success (or a broken zip)
/// fails the call as a whole.
#[derive(Debug, Clone, Copy)]
pub struct BatchProcessor {
    config: ConversionConfig,
}

impl BatchProcessor {
    pub fn new(config: ConversionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// Runs the batch without progress reporting.
    pub fn process(&self, sources: &[SourceItem]) -> ConverterResult<ArchiveResult> {
        self.process_with_progress(sources, |_| {})
    }

    /// Runs the batch, calling `on_progress` before each item, after each
    /// failure, before archiving and on completion.
    pub fn process_with_progress<F>(
        &self,
        sources: &[SourceItem],
        mut on_progress: F,
    ) -> ConverterResult<ArchiveResult>
    where
        F: FnMut(&Progress),
    {
        self.config.validate()?;
        if !is_initialized() {
            return Err(ConverterError::NotInitialized);
        }

        let total = sources.len();
        debug!(
            "Converting {} file(s) to {} (quality: {:?})",
            total,
            self.config.output_format.label(),
            self.config.quality
        );
        on_progress(&Progress::start(total));

        let mut namer = OutputNamer::new(self.config.output_format);
        let mut converted: Vec<ConvertedItem> = Vec::with_capacity(total);
        let mut errors: Vec<ConversionError> = Vec::new();

        for (idx, source) in sources.iter().enumerate() {
            on_progress(&Progress::item(idx, total, &source.name));

            match convert_single(source, &self.config) {
                Ok(bytes) => converted.push(ConvertedItem {
                    output_name: namer.claim(&source.name),
                    bytes,
                }),
                Err(e) => {
                    debug!("Failed to convert {}: {}", source.name, e);
                    on_progress(&Progress::failed(idx, total, &source.name, &e.to_string()));
                    errors.push(ConversionError::new(source.name.clone(), e));
                }
            }
        }

        if converted.is_empty() {
            debug!("No files were successfully converted ({} error(s))", errors.len());
            return Err(ConverterError::EmptyBatch { errors });
        }

        on_progress(&Progress::archiving(total));
        let bytes = build_archive(&converted)?;

        let entry_names: Vec<String> = converted.into_iter().map(|item| item.output_name).collect();
        let result = ArchiveResult {
            bytes,
            entry_count: entry_names.len(),
            entry_names,
            errors,
        };

        debug!(
            "Batch done: {} of {} file(s) converted, zip is {:.2} MB",
            result.entry_count,
            total,
            result.size_mb()
        );
        on_progress(&Progress::complete(total, result.entry_count));

        Ok(result)
    }
}

/// Converts `sources` with `config` and returns the archive plus per-item errors.
///
/// [`init_codec`](crate::init_codec) must have been called once in this process.
pub fn convert(sources: &[SourceItem], config: &ConversionConfig) -> ConverterResult<ArchiveResult> {
    BatchProcessor::new(*config).process(sources)
}
