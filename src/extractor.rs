/*!
 * File content extraction
 */

use std::fs;
use std::path::Path;

use crate::filter::{extension_of, PathFilter};
use crate::types::{decode_latin1, TextEncoding};

/// Encodings tried in order; each may reject the input
const STRICT_ENCODINGS: &[TextEncoding] = &[TextEncoding::Utf8];

/// Terminal step of the chain, total over all byte sequences
const FALLBACK_ENCODING: TextEncoding = TextEncoding::Latin1;

/// Reads file contents for the report body. Never fails: problems are
/// returned as placeholder text.
#[derive(Debug, Clone, Copy)]
pub struct ContentExtractor<'a> {
    filter: PathFilter<'a>,
}

impl<'a> ContentExtractor<'a> {
    /// Create an extractor
    pub fn new(filter: PathFilter<'a>) -> Self {
        Self { filter }
    }

    /// Return the text of `path`, or a placeholder for binary or unreadable files
    pub fn extract(&self, path: &Path) -> String {
        if self.filter.is_binary(path) {
            return binary_placeholder(path);
        }

        match fs::read(path) {
            Ok(bytes) => {
                let (text, encoding) = decode_text(&bytes);
                log::trace!("Decoded {} as {:?}", path.display(), encoding);
                text
            }
            Err(e) => {
                log::warn!("Failed to read {}: {}", path.display(), e);
                error_placeholder(&e)
            }
        }
    }
}

/// Decode bytes with the first encoding that accepts them, returning the
/// text and the encoding used
pub fn decode_text(bytes: &[u8]) -> (String, TextEncoding) {
    for &encoding in STRICT_ENCODINGS {
        if let Some(text) = encoding.decode(bytes) {
            return (text, encoding);
        }
    }

    log::debug!("No strict encoding accepted the content, using {:?}", FALLBACK_ENCODING);
    (decode_latin1(bytes), FALLBACK_ENCODING)
}

fn binary_placeholder(path: &Path) -> String {
    let ext = extension_of(path).unwrap_or_default().to_uppercase();
    match fs::metadata(path) {
        Ok(metadata) => format!(
            "[BINARY FILE - {} - Size: {} bytes]",
            ext,
            metadata.len()
        ),
        Err(e) => error_placeholder(&e),
    }
}

fn error_placeholder(err: &std::io::Error) -> String {
    format!("[Error reading file: {}]", err)
}
