use crate::core::{ConversionConfig, OutputFormat, QualityPreset, SourceItem};
use crate::utils::{ConverterError, ConverterResult, has_source_extension};

/// Builds a [`ConversionConfig`] from the upload form's `format` and `quality` fields.
///
/// `quality` accepts the two presets (`highest`, `lowest`, or their radio labels)
/// or a plain number. It is ignored for PNG.
pub fn parse_settings(format: Option<&str>, quality: Option<&str>) -> ConverterResult<ConversionConfig> {
    let format = match format.map(str::trim).filter(|f| !f.is_empty()) {
        Some(value) => OutputFormat::parse(value).ok_or_else(|| {
            ConverterError::validation(format!("Unsupported output format: {value}"))
        })?,
        None => OutputFormat::Png,
    };

    let config = match format {
        OutputFormat::Png => ConversionConfig::png(),
        OutputFormat::Jpg => match quality.map(str::trim).filter(|q| !q.is_empty()) {
            Some(value) => ConversionConfig::jpg(parse_quality(value)?),
            None => ConversionConfig::jpg_preset(QualityPreset::Highest),
        },
    };

    config.validate()?;
    Ok(config)
}

fn parse_quality(value: &str) -> ConverterResult<u8> {
    match value.to_lowercase().as_str() {
        "highest" | "highest quality" => Ok(QualityPreset::Highest.quality()),
        "lowest" | "lowest quality" => Ok(QualityPreset::Lowest.quality()),
        other => other
            .parse::<u8>()
            .ok()
            .filter(|q| (1..=100).contains(q))
            .ok_or_else(|| {
                ConverterError::validation(format!(
                    "Invalid quality value: {value}. Must be between 1 and 100"
                ))
            }),
    }
}

/// Validates an uploaded batch before it reaches the pipeline.
pub fn validate_sources(sources: &[SourceItem]) -> ConverterResult<()> {
    if sources.is_empty() {
        return Err(ConverterError::validation(
            "Please upload one or more HEIC files",
        ));
    }

    for source in sources {
        if source.name.trim().is_empty() {
            return Err(ConverterError::validation("Uploaded file has no name"));
        }
        if !has_source_extension(&source.name) {
            return Err(ConverterError::validation(format!(
                "Unsupported file type: {}. Only .heic and .heif files are accepted",
                source.name
            )));
        }
    }

    Ok(())
}
