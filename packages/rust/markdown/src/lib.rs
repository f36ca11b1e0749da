//! Markdown processing for mdsite: parsing, admonition rewriting, slugs,
//! and changelog version extraction.

pub mod admonition;
pub mod anchors;
pub mod ast;
pub mod parser;
pub mod versions;

pub use anchors::{slugify, split_anchor};
pub use ast::{Alignment, Node, Tree};
pub use versions::{annotate_headings, extract_versions};

/// Parse document text and apply the admonition rewrite, yielding the tree
/// the renderer consumes.
pub fn parse_document(text: &str) -> Tree {
    let mut tree = parser::parse(text);
    admonition::transform(&mut tree);
    tree
}
