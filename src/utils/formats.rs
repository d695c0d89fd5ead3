use std::path::Path;
use crate::core::OutputFormat;

/// Extensions accepted by the upload form.
pub const SOURCE_EXTENSIONS: &[&str] = &["heic", "heif"];

impl OutputFormat {
    /// Extension written on archive entries
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpg => "jpg",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Png => "PNG",
            Self::Jpg => "JPG",
        }
    }

    /// Parses a user supplied format name, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpg),
            _ => None,
        }
    }

    /// Download name for a batch archive: `<label>_<format>.zip`.
    pub fn archive_file_name(&self, label: &str) -> String {
        format!("{label}_{}.zip", self.extension())
    }
}

/// Last path component of an uploaded name. Browsers on Windows may send
/// backslash separated paths.
pub fn base_name(name: &str) -> &str {
    name.rsplit(['/', '\\']).next().unwrap_or(name)
}

/// File stem of an uploaded name (last extension removed).
pub fn file_stem(name: &str) -> &str {
    let base = base_name(name);
    Path::new(base)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(base)
}

/// Whether `name` carries one of the accepted source extensions.
pub fn has_source_extension(name: &str) -> bool {
    Path::new(base_name(name))
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| SOURCE_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(OutputFormat::parse("PNG"), Some(OutputFormat::Png));
        assert_eq!(OutputFormat::parse("jpeg"), Some(OutputFormat::Jpg));
        assert_eq!(OutputFormat::parse(" Jpg "), Some(OutputFormat::Jpg));
        assert_eq!(OutputFormat::parse("webp"), None);
    }

    #[test]
    fn archive_name_follows_label_and_format() {
        assert_eq!(
            OutputFormat::Png.archive_file_name("heic_converted"),
            "heic_converted_png.zip"
        );
        assert_eq!(OutputFormat::Jpg.archive_file_name("batch"), "batch_jpg.zip");
    }

    #[test]
    fn stem_strips_last_extension_only() {
        assert_eq!(file_stem("photo.HEIC"), "photo");
        assert_eq!(file_stem("a.b.heic"), "a.b");
        assert_eq!(file_stem("noext"), "noext");
        assert_eq!(file_stem("dir/sub/x.heif"), "x");
        assert_eq!(file_stem(r"C:\Users\me\IMG_0001.heic"), "IMG_0001");
    }

    #[test]
    fn source_extensions() {
        assert!(has_source_extension("a.heic"));
        assert!(has_source_extension("a.HEIF"));
        assert!(!has_source_extension("a.png"));
        assert!(!has_source_extension("heic"));
    }
}
