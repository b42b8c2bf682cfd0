//! Side channel for images embedded as `data:` URIs.
//!
//! The walker never stores image bytes itself. Decoded payloads are handed to
//! a [`BlobSink`], which returns a reference that the resulting image block
//! points at.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use base64::Engine;
use regex::Regex;

use crate::error::{Error, Result};
use crate::model::Resource;

/// Destination for decoded embedded images.
pub trait BlobSink: Send {
    /// Store `data` of the given media type and return a reference usable as
    /// an image source.
    fn store(&mut self, data: Vec<u8>, media_type: &str) -> Result<String>;
}

/// An embedded image decoded from a `data:` URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedImage {
    /// Media type, e.g. `image/png`
    pub media_type: String,
    /// Decoded bytes
    pub data: Vec<u8>,
}

fn data_uri_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?s)^data:image/([^;]+);([^,]+),(.+)$").expect("data URI pattern is valid")
    })
}

/// Check whether an image source is an inline `data:` URI.
pub fn is_data_uri(src: &str) -> bool {
    src.get(..5)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("data:"))
}

/// Decode a `data:image/<type>;base64,<payload>` URI.
pub fn decode_data_uri(src: &str) -> Result<EmbeddedImage> {
    let captures = data_uri_pattern()
        .captures(src.trim())
        .ok_or_else(|| Error::ImageData("image data missing".to_string()))?;

    let image_type = &captures[1];
    let encoding = &captures[2];
    let payload = &captures[3];

    if !encoding.eq_ignore_ascii_case("base64") {
        return Err(Error::UnsupportedImageEncoding(encoding.to_string()));
    }

    let compact: String = payload
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    log::debug!(
        "decoding embedded image: {} [{} bytes encoded]",
        image_type,
        compact.len()
    );

    let data = base64::engine::general_purpose::STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| Error::ImageData(format!("invalid base64 payload: {}", e)))?;

    Ok(EmbeddedImage {
        media_type: format!("image/{}", image_type.to_ascii_lowercase()),
        data,
    })
}

/// Sink keeping every stored image in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    resources: Vec<(String, Resource)>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored resources with their IDs, in store order.
    pub fn resources(&self) -> &[(String, Resource)] {
        &self.resources
    }

    /// Consume the sink and return the stored resources.
    pub fn into_resources(self) -> Vec<(String, Resource)> {
        self.resources
    }
}

impl BlobSink for MemorySink {
    fn store(&mut self, data: Vec<u8>, media_type: &str) -> Result<String> {
        let id = format!("image{}", self.resources.len() + 1);
        let reference = format!("resource://{}", id);
        self.resources.push((id, Resource::image(data, media_type)));
        Ok(reference)
    }
}

/// Sink writing each image to a file in a directory.
///
/// References are bare file names, so renderers can point at the directory
/// through an image path prefix.
#[derive(Debug)]
pub struct DirectorySink {
    dir: PathBuf,
    written: usize,
}

impl DirectorySink {
    /// Create a sink writing into `dir`, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir, written: 0 })
    }

    /// Target directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Number of files written so far.
    pub fn written(&self) -> usize {
        self.written
    }
}

impl BlobSink for DirectorySink {
    fn store(&mut self, data: Vec<u8>, media_type: &str) -> Result<String> {
        let resource = Resource::image(data, media_type);
        let filename = resource.suggested_filename(&format!("image-{}", self.written + 1));
        let path = self.dir.join(&filename);

        std::fs::write(&path, &resource.data)
            .map_err(|e| Error::BlobStore(format!("{}: {}", path.display(), e)))?;
        self.written += 1;

        log::debug!("stored embedded image: {}", path.display());
        Ok(filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_base64_png() {
        let image = decode_data_uri("data:image/png;base64,AAAA").unwrap();
        assert_eq!(image.media_type, "image/png");
        assert_eq!(image.data, vec![0, 0, 0]);
    }

    #[test]
    fn test_decode_ignores_whitespace_in_payload() {
        let image = decode_data_uri("data:image/gif;base64,AA\n AA").unwrap();
        assert_eq!(image.data.len(), 3);
    }

    #[test]
    fn test_unsupported_encoding() {
        let result = decode_data_uri("data:image/svg+xml;utf8,<svg/>");
        assert!(matches!(result, Err(Error::UnsupportedImageEncoding(e)) if e == "utf8"));
    }

    #[test]
    fn test_malformed_uri() {
        assert!(matches!(
            decode_data_uri("data:text/plain,hello"),
            Err(Error::ImageData(_))
        ));
        assert!(matches!(
            decode_data_uri("data:image/png;base64,!!!!"),
            Err(Error::ImageData(_))
        ));
    }

    #[test]
    fn test_is_data_uri() {
        assert!(is_data_uri("data:image/png;base64,AAAA"));
        assert!(is_data_uri("DATA:image/png;base64,AAAA"));
        assert!(!is_data_uri("http://x/y.png"));
        assert!(!is_data_uri("dat"));
    }

    #[test]
    fn test_memory_sink_references() {
        let mut sink = MemorySink::new();
        let first = sink.store(vec![1], "image/png").unwrap();
        let second = sink.store(vec![2], "image/gif").unwrap();

        assert_eq!(first, "resource://image1");
        assert_eq!(second, "resource://image2");
        assert_eq!(sink.resources().len(), 2);
        assert_eq!(sink.resources()[1].1.mime_type, "image/gif");
    }

    #[test]
    fn test_directory_sink_writes_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = DirectorySink::new(dir.path().join("images")).unwrap();

        let reference = sink.store(vec![0, 0, 0], "image/png").unwrap();
        assert_eq!(reference, "image-1.png");
        assert_eq!(
            std::fs::read(sink.dir().join(&reference)).unwrap(),
            vec![0, 0, 0]
        );
        assert_eq!(sink.written(), 1);
    }
}
