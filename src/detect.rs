//! HTML input detection and decoding.
//!
//! The tree builder accepts any text, so the only inputs rejected up front are
//! ones that are clearly not markup at all: binary data and well-known binary
//! formats. Everything else is decoded, falling back to replacement
//! characters for malformed sequences.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::OnceLock;

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8};
use regex::bytes::Regex;

/// HTML input information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlFormat {
    /// Text encoding the input was decoded from
    pub encoding: TextEncoding,
    /// Whether the input starts with a `<!DOCTYPE html>` declaration
    pub has_doctype: bool,
    /// Whether malformed byte sequences were replaced with U+FFFD
    pub had_replacements: bool,
}

impl std::fmt::Display for HtmlFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HTML ({})", self.encoding)
    }
}

/// How the input's text encoding was determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// UTF-8, with or without byte order mark
    Utf8,
    /// UTF-16 little-endian with byte order mark
    Utf16Le,
    /// UTF-16 big-endian with byte order mark
    Utf16Be,
    /// Declared by a `<meta charset>` in the document head
    Declared(&'static Encoding),
    /// Guessed from byte statistics (Windows-1252, Shift_JIS, ...)
    Legacy(&'static Encoding),
}

impl TextEncoding {
    fn encoding(self) -> &'static Encoding {
        match self {
            TextEncoding::Utf8 => UTF_8,
            TextEncoding::Utf16Le => UTF_16LE,
            TextEncoding::Utf16Be => UTF_16BE,
            TextEncoding::Declared(enc) | TextEncoding::Legacy(enc) => enc,
        }
    }
}

impl std::fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TextEncoding::Utf8 => write!(f, "UTF-8"),
            TextEncoding::Utf16Le => write!(f, "UTF-16LE"),
            TextEncoding::Utf16Be => write!(f, "UTF-16BE"),
            TextEncoding::Declared(enc) => write!(f, "{} (declared)", enc.name()),
            TextEncoding::Legacy(enc) => write!(f, "{} (detected)", enc.name()),
        }
    }
}

/// Magic bytes of binary formats that are commonly mistaken for documents.
const BINARY_MAGIC: &[&[u8]] = &[
    b"%PDF-",
    &[0x89, 0x50, 0x4E, 0x47],
    &[0xFF, 0xD8, 0xFF],
    b"GIF87a",
    b"GIF89a",
    &[0x50, 0x4B, 0x03, 0x04],
];

/// How far into the input a `<meta charset>` declaration is looked for.
const CHARSET_PRESCAN: usize = 1024;

fn meta_charset_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"(?i-u)<meta[^>]*?charset\s*=\s*["']?\s*([A-Za-z0-9_:.\-]+)"#)
            .expect("charset pattern is valid")
    })
}

/// Detect the HTML input format from a file path.
///
/// # Example
/// ```no_run
/// use unhtml::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("page.html").unwrap();
/// println!("Encoding: {}", format.encoding);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<HtmlFormat> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    detect_format_from_bytes(&data)
}

/// Detect the HTML input format from bytes.
///
/// # Returns
/// * `Ok(HtmlFormat)` if the data is text in any encoding
/// * `Err(Error::UnknownFormat)` if the data is binary
pub fn detect_format_from_bytes(data: &[u8]) -> Result<HtmlFormat> {
    let (text, encoding, had_replacements) = decode_with_encoding(data)?;
    Ok(HtmlFormat {
        encoding,
        has_doctype: starts_with_doctype(&text),
        had_replacements,
    })
}

/// Decode input bytes into text, rejecting binary content.
pub fn decode_bytes(data: &[u8]) -> Result<String> {
    let (text, encoding, had_replacements) = decode_with_encoding(data)?;
    if had_replacements {
        log::warn!("input is not clean {}; malformed bytes replaced", encoding);
    }
    Ok(text)
}

fn decode_with_encoding(data: &[u8]) -> Result<(String, TextEncoding, bool)> {
    if BINARY_MAGIC.iter().any(|magic| data.starts_with(magic)) {
        return Err(Error::UnknownFormat);
    }

    if let Some((encoding, bom_len)) = Encoding::for_bom(data) {
        let detected = if encoding == UTF_16LE {
            TextEncoding::Utf16Le
        } else if encoding == UTF_16BE {
            TextEncoding::Utf16Be
        } else {
            TextEncoding::Utf8
        };
        let (text, had_errors) = encoding.decode_without_bom_handling(&data[bom_len..]);
        if text.contains('\0') {
            return Err(Error::UnknownFormat);
        }
        return Ok((text.into_owned(), detected, had_errors));
    }

    if data.contains(&0) {
        return Err(Error::UnknownFormat);
    }

    let detected = sniff_encoding(data);
    let (text, had_errors) = detected.encoding().decode_without_bom_handling(data);
    log::debug!("decoded {} bytes as {}", data.len(), detected);
    Ok((text.into_owned(), detected, had_errors))
}

/// Pick an encoding for input without a byte order mark.
///
/// Valid UTF-8 wins, then a `<meta charset>` declaration, then a statistical
/// guess.
fn sniff_encoding(data: &[u8]) -> TextEncoding {
    if std::str::from_utf8(data).is_ok() {
        return TextEncoding::Utf8;
    }

    let head = &data[..data.len().min(CHARSET_PRESCAN)];
    if let Some(label) = meta_charset_pattern()
        .captures(head)
        .and_then(|caps| caps.get(1))
    {
        if let Some(encoding) = Encoding::for_label(label.as_bytes()) {
            // a UTF-16 declaration inside ASCII-compatible bytes is ignored
            if encoding == UTF_8 {
                return TextEncoding::Utf8;
            }
            if encoding != UTF_16LE && encoding != UTF_16BE {
                return TextEncoding::Declared(encoding);
            }
        }
    }

    let mut detector = EncodingDetector::new();
    detector.feed(data, true);
    let encoding = detector.guess(None, false);
    if encoding == UTF_8 {
        TextEncoding::Utf8
    } else {
        TextEncoding::Legacy(encoding)
    }
}

fn starts_with_doctype(text: &str) -> bool {
    let head: String = text.trim_start().chars().take(9).collect();
    head.eq_ignore_ascii_case("<!doctype")
}

/// Check if bytes look like a convertible HTML document.
pub fn is_html_bytes(data: &[u8]) -> bool {
    detect_format_from_bytes(data).is_ok()
}
