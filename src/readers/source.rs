use crate::error::{ProcessingError, Result};
use crate::utils::constants::DEFAULT_BUFFER_SIZE;
use encoding_rs::{Encoding, WINDOWS_1252};
use memmap2::Mmap;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

/// Reads a delimited text file into memory and decodes it to UTF-8.
///
/// Files carrying a BOM are decoded with the BOM's encoding. Otherwise UTF-8
/// is tried first and Windows-1252 is the fallback, which covers the Latin-1
/// world-cities dump.
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceReader {
    use_mmap: bool,
}

impl SourceReader {
    pub fn new() -> Self {
        Self { use_mmap: false }
    }

    pub fn with_mmap(use_mmap: bool) -> Self {
        Self { use_mmap }
    }

    pub fn read_text(&self, path: &Path) -> Result<String> {
        if self.use_mmap {
            self.read_text_mmap(path)
        } else {
            self.read_text_buffered(path)
        }
    }

    fn read_text_buffered(&self, path: &Path) -> Result<String> {
        let file = File::open(path)?;
        let mut reader = BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file);
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Ok(decode_bytes(&bytes, path))
    }

    fn read_text_mmap(&self, path: &Path) -> Result<String> {
        let file = File::open(path)?;
        if file.metadata()?.len() == 0 {
            return Ok(String::new());
        }
        let mmap = unsafe { Mmap::map(&file)? };
        Ok(decode_bytes(&mmap, path))
    }
}

pub fn decode_bytes(bytes: &[u8], path: &Path) -> String {
    if let Some((encoding, bom_length)) = Encoding::for_bom(bytes) {
        let (text, _) = encoding.decode_without_bom_handling(&bytes[bom_length..]);
        return text.into_owned();
    }

    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            debug!(path = %path.display(), "input is not UTF-8, decoding as Windows-1252");
            let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
            text.into_owned()
        }
    }
}

/// Deserialize every row of a headed CSV document.
pub fn deserialize_rows<T: DeserializeOwned>(text: &str, table: &str) -> Result<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(ProcessingError::MissingData(format!(
            "{} table has no header row",
            table
        )));
    }

    let mut rows = Vec::new();
    for result in reader.deserialize() {
        rows.push(result?);
    }

    debug!(table, rows = rows.len(), "deserialized table");
    Ok(rows)
}
