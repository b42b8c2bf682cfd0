//! Document model types for converted HTML content.
//!
//! This module defines the block tree produced by the parser: a closed set of
//! block variants, the text-run container shared by text-bearing blocks, and
//! the document wrapper carrying title and head metadata.

mod block;
mod document;
mod resource;
mod table;
mod text;

pub use block::{Block, BlockContainer, Embed, Image, ImageSource, ListItem};
pub use document::{Document, DocumentStats};
pub use resource::Resource;
pub use table::{Table, TableRow};
pub use text::{Annotations, RichText, TextRun};
