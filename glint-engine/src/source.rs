//! Decoded source text and line/column arithmetic
//!
//!     Every position the engine reports is derived from this module: the lexer adapter turns
//!     logos byte spans into `(line, column)` pairs here, the accountant reads physical lines
//!     from here, and the span builder uses [`split_last_line`] with the same line-break rule.
//!     Keeping one rule (`\r\n`, `\r` or `\n`) in one place is what keeps highlighting ranges
//!     aligned with the editor's view of the file.
//!
//!     Lines are 1-based. Columns are 0-based and counted in characters, not bytes.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Character encodings a source file may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Encoding {
    #[default]
    Utf8,
    Utf16Le,
    Utf16Be,
    Latin1,
}

impl Encoding {
    /// Resolve an encoding label such as `UTF-8` or `iso-8859-1`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Some(Encoding::Utf8),
            "utf-16le" | "utf16le" => Some(Encoding::Utf16Le),
            "utf-16be" | "utf16be" => Some(Encoding::Utf16Be),
            "iso-8859-1" | "latin1" | "latin-1" => Some(Encoding::Latin1),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Encoding::Utf8 => "UTF-8",
            Encoding::Utf16Le => "UTF-16LE",
            Encoding::Utf16Be => "UTF-16BE",
            Encoding::Latin1 => "ISO-8859-1",
        }
    }

    /// Decode raw bytes, dropping a leading byte order mark.
    pub fn decode(self, bytes: &[u8]) -> Result<String, DecodeError> {
        match self {
            Encoding::Utf8 => {
                let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
                std::str::from_utf8(bytes)
                    .map(str::to_owned)
                    .map_err(|e| DecodeError::Invalid {
                        encoding: self,
                        offset: e.valid_up_to(),
                    })
            }
            Encoding::Utf16Le | Encoding::Utf16Be => {
                if bytes.len() % 2 != 0 {
                    return Err(DecodeError::Truncated {
                        encoding: self,
                        len: bytes.len(),
                    });
                }
                let mut units: Vec<u16> = bytes
                    .chunks_exact(2)
                    .map(|pair| match self {
                        Encoding::Utf16Le => u16::from_le_bytes([pair[0], pair[1]]),
                        _ => u16::from_be_bytes([pair[0], pair[1]]),
                    })
                    .collect();
                if units.first() == Some(&0xFEFF) {
                    units.remove(0);
                }
                String::from_utf16(&units).map_err(|_| DecodeError::Invalid {
                    encoding: self,
                    offset: invalid_utf16_offset(&units) * 2,
                })
            }
            Encoding::Latin1 => Ok(bytes.iter().map(|&b| b as char).collect()),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn invalid_utf16_offset(units: &[u16]) -> usize {
    char::decode_utf16(units.iter().copied())
        .scan(0usize, |offset, decoded| {
            let at = *offset;
            match decoded {
                Ok(c) => {
                    *offset += c.len_utf16();
                    Some(Ok(()))
                }
                Err(_) => Some(Err(at)),
            }
        })
        .find_map(Result::err)
        .unwrap_or(units.len())
}

/// The byte stream could not be decoded under its declared encoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("invalid {encoding} sequence at byte {offset}")]
    Invalid { encoding: Encoding, offset: usize },
    #[error("{encoding} input has an odd length of {len} bytes")]
    Truncated { encoding: Encoding, len: usize },
}

/// Decoded text of one file plus its line table.
#[derive(Debug, Clone)]
pub struct SourceText {
    text: String,
    /// Byte offsets where each line starts
    line_starts: Vec<usize>,
}

impl SourceText {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let line_starts = line_starts(&text);
        Self { text, line_starts }
    }

    pub fn decode(bytes: &[u8], encoding: Encoding) -> Result<Self, DecodeError> {
        encoding.decode(bytes).map(Self::new)
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Number of physical lines. An empty file has one (empty) line.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Physical line `line` (1-based) without its line break.
    pub fn line(&self, line: usize) -> Option<&str> {
        let index = line.checked_sub(1)?;
        let start = *self.line_starts.get(index)?;
        let end = self
            .line_starts
            .get(index + 1)
            .copied()
            .unwrap_or(self.text.len());
        Some(self.text[start..end].trim_end_matches(['\r', '\n']))
    }

    /// All physical lines, in order.
    pub fn lines(&self) -> impl Iterator<Item = &str> + '_ {
        (1..=self.line_count()).filter_map(move |line| self.line(line))
    }

    /// Convert a byte offset into a 1-based line and a 0-based character column.
    pub fn position(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.text.len());
        let index = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let start = self.line_starts[index];
        let column = self.text[start..offset].chars().count();
        (index + 1, column)
    }
}

fn line_starts(text: &str) -> Vec<usize> {
    let bytes = text.as_bytes();
    let mut starts = vec![0];
    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'\n' => starts.push(i + 1),
            b'\r' if bytes.get(i + 1) != Some(&b'\n') => starts.push(i + 1),
            _ => {}
        }
    }
    starts
}

/// Split a token's text at its line breaks.
///
/// Returns the number of line breaks and the text after the last one (the whole text when
/// there is none), using the same line-break rule as [`SourceText`].
pub fn split_last_line(text: &str) -> (usize, &str) {
    let starts = line_starts(text);
    let last = *starts.last().unwrap_or(&0);
    (starts.len() - 1, &text[last..])
}
