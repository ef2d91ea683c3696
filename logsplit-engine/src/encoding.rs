//! Character encodings and encoded delimiters
//!
//! Records are delimited in the stream's own character set: a newline in a
//! UTF-16LE stream is the two bytes `0A 00`, not a bare `0A`. This module
//! resolves configured encoding names to codecs and computes those delimiter
//! byte sequences once per built tokenizer.

use crate::error::{EngineError, Result};
use std::borrow::Cow;

/// Encoding names shown by `logsplit list encodings`
///
/// Any WHATWG label accepted by `encoding_rs` also works.
pub const COMMON_ENCODINGS: &[&str] = &[
    "utf-8",
    "utf-16le",
    "utf-16be",
    "ascii",
    "windows-1252",
    "iso-8859-2",
    "shift_jis",
    "euc-jp",
    "euc-kr",
    "gbk",
    "big5",
    "nop",
];

/// A stream's character encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// No conversion: the stream is treated as opaque bytes
    Nop,
    /// A text codec
    Text(&'static encoding_rs::Encoding),
}

impl Default for Encoding {
    fn default() -> Self {
        Encoding::Text(encoding_rs::UTF_8)
    }
}

/// Byte sequences of the logical newline and carriage-return characters in
/// a particular encoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delimiters {
    /// Encoded `\n`
    pub newline: Vec<u8>,
    /// Encoded `\r`
    pub carriage_return: Vec<u8>,
}

/// Resolve an encoding name
///
/// Names are matched case-insensitively. The empty name, `utf8` and the
/// ASCII aliases select UTF-8, `utf-16` selects little-endian UTF-16, and
/// `nop` selects the pass-through encoding. Other names are looked up as
/// WHATWG labels.
pub fn lookup_encoding(name: &str) -> Result<Encoding> {
    let normalized = name.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "nop" => Ok(Encoding::Nop),
        "" | "utf-8" | "utf8" | "ascii" | "us-ascii" => Ok(Encoding::Text(encoding_rs::UTF_8)),
        "utf-16" | "utf16" => Ok(Encoding::Text(encoding_rs::UTF_16LE)),
        label => encoding_rs::Encoding::for_label(label.as_bytes())
            .map(Encoding::Text)
            .ok_or_else(|| EngineError::UnknownEncoding {
                name: name.to_string(),
            }),
    }
}

impl Encoding {
    /// Canonical name of the encoding
    pub fn name(&self) -> &'static str {
        match self {
            Encoding::Nop => "nop",
            Encoding::Text(encoding) => encoding.name(),
        }
    }

    /// Whether this is the pass-through encoding
    pub fn is_nop(&self) -> bool {
        matches!(self, Encoding::Nop)
    }

    /// Encode a single character
    ///
    /// Fails when the codec has no representation for `ch`.
    pub fn encode_char(&self, ch: char) -> Result<Vec<u8>> {
        let encoding = match self {
            Encoding::Nop => {
                let mut buf = [0u8; 4];
                return Ok(ch.encode_utf8(&mut buf).as_bytes().to_vec());
            }
            Encoding::Text(encoding) => *encoding,
        };

        // The WHATWG encoder set has no UTF-16 encoders
        if encoding == encoding_rs::UTF_16LE || encoding == encoding_rs::UTF_16BE {
            let little_endian = encoding == encoding_rs::UTF_16LE;
            let mut units = [0u16; 2];
            return Ok(ch
                .encode_utf16(&mut units)
                .iter()
                .flat_map(|unit| {
                    if little_endian {
                        unit.to_le_bytes()
                    } else {
                        unit.to_be_bytes()
                    }
                })
                .collect());
        }

        let mut buf = [0u8; 4];
        let (bytes, used, unmappable) = encoding.encode(ch.encode_utf8(&mut buf));
        if used != encoding || unmappable || bytes.is_empty() {
            return Err(EngineError::EncodingError(format!(
                "{} cannot represent {:?}",
                encoding.name(),
                ch
            )));
        }
        Ok(bytes.into_owned())
    }

    /// Resolve the encoded newline and carriage-return sequences
    pub fn delimiters(&self) -> Result<Delimiters> {
        Ok(Delimiters {
            newline: self.encode_char('\n')?,
            carriage_return: self.encode_char('\r')?,
        })
    }

    /// Decode a record into text
    ///
    /// Malformed sequences are replaced with U+FFFD. A byte order mark is
    /// not sniffed; the configured encoding always wins.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Cow<'a, str> {
        match self {
            Encoding::Nop => String::from_utf8_lossy(bytes),
            Encoding::Text(encoding) => encoding.decode_without_bom_handling(bytes).0,
        }
    }
}
