//! Document pipeline: raw AI text → typed sections → editable preview →
//! downloadable artifacts.
//!
//! Section order is authoritative throughout; the exporters render whatever
//! order and content the shell hands them.

pub mod export;
pub mod html;
pub mod parser;
pub mod section;

pub use export::{to_paginated_document, to_word_document, ExportArtifact};
pub use parser::parse_document;
pub use section::{DocumentKind, Section, SectionKind};
