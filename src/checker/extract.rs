// src/checker/extract.rs
// =============================================================================
// This module pulls raw link targets out of rendered documents.
//
// We query two things with `scraper` CSS selectors:
// - a[href]   (links)
// - img[src]  (images)
//
// Order of the output matters for readable logs and for deterministic
// tests: document order first, then all hrefs of that document, then all
// image sources, each in DOM order. Nothing is filtered or deduplicated
// here; that is the classifier's job.
// =============================================================================

use crate::error::{CheckError, Result};
use crate::render::RenderedDocument;
use scraper::Selector;
use serde::Serialize;
use std::path::PathBuf;

// Which attribute a link came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    Href,
    ImgSrc,
}

impl LinkKind {
    fn selector(self) -> &'static str {
        match self {
            LinkKind::Href => "a[href]",
            LinkKind::ImgSrc => "img[src]",
        }
    }

    fn attribute(self) -> &'static str {
        match self {
            LinkKind::Href => "href",
            LinkKind::ImgSrc => "src",
        }
    }
}

// One link target exactly as it appears in a rendered page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawLink {
    pub source_document: PathBuf,
    pub target: String,
    pub kind: LinkKind,
}

// Extracts every href and img src from the documents, flattened in order
pub fn extract_links(documents: &[RenderedDocument]) -> Result<Vec<RawLink>> {
    const KINDS: [LinkKind; 2] = [LinkKind::Href, LinkKind::ImgSrc];

    // Selector::parse only fails on invalid CSS, but we'd rather report
    // that than panic
    let selectors = KINDS
        .iter()
        .map(|kind| {
            Selector::parse(kind.selector())
                .map(|selector| (*kind, selector))
                .map_err(|_| CheckError::Selector(kind.selector().to_string()))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut links = Vec::new();
    for document in documents {
        for (kind, selector) in &selectors {
            for element in document.html.select(selector) {
                if let Some(target) = element.value().attr(kind.attribute()) {
                    links.push(RawLink {
                        source_document: document.source.clone(),
                        target: target.to_string(),
                        kind: *kind,
                    });
                }
            }
        }
    }

    Ok(links)
}
