/*!
 * Core types and data structures for the codedump application
 */

use std::path::PathBuf;

/// A file selected for export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Path relative to the scan root, used as the report label and sort key
    pub relative_path: String,
    /// Path used to read the file
    pub absolute_path: PathBuf,
}

impl FileEntry {
    /// Create a new entry
    pub fn new(relative_path: impl Into<String>, absolute_path: impl Into<PathBuf>) -> Self {
        Self {
            relative_path: relative_path.into(),
            absolute_path: absolute_path.into(),
        }
    }

    /// Key used to order entries in the report
    pub fn sort_key(&self) -> String {
        self.relative_path.to_lowercase()
    }
}

/// Text encodings tried, in order, when decoding file contents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// Strict UTF-8; fails on malformed input
    Utf8,
    /// ISO-8859-1; every byte maps to one code point, so decoding never fails
    Latin1,
}

impl TextEncoding {
    /// Decode `bytes`, or `None` if they are not valid in this encoding.
    ///
    /// Latin-1 always returns `Some`.
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        match self {
            Self::Utf8 => std::str::from_utf8(bytes).ok().map(str::to_owned),
            Self::Latin1 => Some(decode_latin1(bytes)),
        }
    }
}

/// Decode ISO-8859-1, which cannot fail
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Totals produced by a completed export
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportSummary {
    /// Number of file sections written
    pub files_processed: usize,
    /// Bytes written to the output file
    pub bytes_written: u64,
}
