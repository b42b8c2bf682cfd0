//! HTML parsing module.

mod blob;
mod html_parser;
mod inline;
mod options;
mod style;
mod tag;
mod walker;

pub use blob::{decode_data_uri, is_data_uri, BlobSink, DirectorySink, EmbeddedImage, MemorySink};
pub use html_parser::HtmlParser;
pub use options::{ErrorMode, ParseOptions, StylePolicy, UnknownTagPolicy, DEFAULT_MAX_DEPTH};
pub use style::{Style, StyleState};
pub use tag::Tag;
