//! Zip assembly for converted outputs.
//!
//! The archive is built in an in-memory buffer owned by the calling batch;
//! nothing touches the filesystem.

use std::io::{Cursor, Write};
use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::core::ConvertedItem;
use crate::utils::{ConverterError, ConverterResult};

/// Writes every item as a deflated entry named by its `output_name`.
///
/// Entry names must be unique; the batch namer guarantees that.
pub fn build_archive(items: &[ConvertedItem]) -> ConverterResult<Vec<u8>> {
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

    for item in items {
        writer.start_file(item.output_name.as_str(), options)?;
        writer
            .write_all(&item.bytes)
            .map_err(|e| ConverterError::archive(format!("{}: {e}", item.output_name)))?;
    }

    let bytes = writer.finish()?.into_inner();
    debug!("Assembled zip with {} entries ({} bytes)", items.len(), bytes.len());
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use zip::ZipArchive;

    fn item(name: &str, bytes: &[u8]) -> ConvertedItem {
        ConvertedItem {
            output_name: name.to_string(),
            bytes: bytes.to_vec(),
        }
    }

    #[test]
    fn entries_are_deflated_and_named() {
        let payload = vec![7u8; 4096];
        let bytes = build_archive(&[item("a.png", &payload), item("b.png", b"bee")]).unwrap();

        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 2);

        let mut first = archive.by_name("a.png").unwrap();
        assert_eq!(first.compression(), CompressionMethod::Deflated);
        let mut content = Vec::new();
        first.read_to_end(&mut content).unwrap();
        assert_eq!(content, payload);
    }

    #[test]
    fn duplicate_names_are_an_assembly_error() {
        let err = build_archive(&[item("a.png", b"1"), item("a.png", b"2")]).unwrap_err();
        assert_eq!(err.code(), "archive_error");
    }
}
