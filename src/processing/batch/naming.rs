use std::collections::HashSet;

use crate::core::OutputFormat;
use crate::utils::file_stem;

/// Stem used when a source name has nothing left after stripping its extension.
const FALLBACK_STEM: &str = "image";

/// Hands out archive entry names for one batch.
///
/// Names are `<stem>.<ext>`; a later item whose name collides with an earlier
/// one (ignoring case) gets `<stem>_<n>.<ext>` with the smallest free `n`.
#[derive(Debug)]
pub struct OutputNamer {
    format: OutputFormat,
    taken: HashSet<String>,
}

impl OutputNamer {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            taken: HashSet::new(),
        }
    }

    /// Name without de-duplication.
    pub fn base_name(&self, source_name: &str) -> String {
        let stem = file_stem(source_name);
        let stem = if stem.trim().is_empty() { FALLBACK_STEM } else { stem };
        format!("{stem}.{}", self.format.extension())
    }

    /// Reserves and returns a unique entry name for `source_name`.
    ///
    /// Only call this for items that converted successfully.
    pub fn claim(&mut self, source_name: &str) -> String {
        let name = self.base_name(source_name);
        if self.taken.insert(name.to_lowercase()) {
            return name;
        }

        let ext = self.format.extension();
        let stem = name.strip_suffix(&format!(".{ext}")).unwrap_or(&name).to_string();
        let mut counter = 1;
        loop {
            let candidate = format!("{stem}_{counter}.{ext}");
            if self.taken.insert(candidate.to_lowercase()) {
                return candidate;
            }
            counter += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_follows_target_format() {
        let namer = OutputNamer::new(OutputFormat::Png);
        assert_eq!(namer.base_name("photo.HEIC"), "photo.png");
        assert_eq!(namer.base_name("photo.heif"), "photo.png");

        let namer = OutputNamer::new(OutputFormat::Jpg);
        assert_eq!(namer.base_name("IMG_0001.heic"), "IMG_0001.jpg");
        assert_eq!(namer.base_name("no_extension"), "no_extension.jpg");
    }

    #[test]
    fn empty_stems_fall_back() {
        let namer = OutputNamer::new(OutputFormat::Png);
        assert_eq!(namer.base_name(""), "image.png");
        assert_eq!(namer.base_name("dir/"), "image.png");
        assert_eq!(namer.base_name("   .heic"), "image.png");
    }

    #[test]
    fn stems_keep_their_whitespace() {
        let namer = OutputNamer::new(OutputFormat::Jpg);
        assert_eq!(namer.base_name(" holiday .heic"), " holiday .jpg");
        assert_eq!(namer.base_name("my photo.HEIC"), "my photo.jpg");
    }

    #[test]
    fn collisions_get_numbered_suffixes() {
        let mut namer = OutputNamer::new(OutputFormat::Png);
        assert_eq!(namer.claim("a.heic"), "a.png");
        assert_eq!(namer.claim("a.heif"), "a_1.png");
        assert_eq!(namer.claim("A.HEIC"), "A_2.png");
        assert_eq!(namer.claim("b.heic"), "b.png");
    }

    #[test]
    fn suffix_skips_names_already_present() {
        let mut namer = OutputNamer::new(OutputFormat::Jpg);
        assert_eq!(namer.claim("a_1.heic"), "a_1.jpg");
        assert_eq!(namer.claim("a.heic"), "a.jpg");
        assert_eq!(namer.claim("a.heif"), "a_2.jpg");
    }
}
