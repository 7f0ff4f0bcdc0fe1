// src/render/mod.rs
// =============================================================================
// The rendering side: which markdown files we check, and how they become
// queryable HTML documents.
//
// Submodules:
// - source: discovers and loads the documents
// - markdown: renders markdown into a scraper DOM
// =============================================================================

mod markdown;
mod source;

pub use markdown::{render_markdown, RenderedDocument};
pub use source::{discover_documents, load_documents};
