// src/render/source.rs
// =============================================================================
// Finds the markdown documents to check and loads them.
//
// Strategy:
// - Extra documents from the config come first (README.md by default)
// - Then every *.md file directly inside the source root, sorted by name
//
// The listing is not recursive: the source root is a flat directory of
// chapters, sub-directories hold example projects that are link targets,
// not documents.
// =============================================================================

use super::markdown::RenderedDocument;
use crate::config::Config;
use crate::error::{CheckError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

// Lists the documents to check, in check order
pub fn discover_documents(config: &Config) -> Result<Vec<PathBuf>> {
    let mut documents = Vec::new();

    for extra in &config.extra_documents {
        if extra.is_file() {
            documents.push(extra.clone());
        } else {
            // A missing README is not worth aborting the run for
            warn!("extra document {} not found, skipping", extra.display());
        }
    }

    documents.extend(list_markdown_files(&config.source_root)?);
    debug!("{} document(s) to check", documents.len());
    Ok(documents)
}

// Lists `*.md` files directly inside `dir`, sorted by file name
fn list_markdown_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let listing_error = |source| CheckError::SourceListing {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(listing_error)? {
        let entry = entry.map_err(listing_error)?;
        let path = entry.path();
        let is_markdown = path.extension().is_some_and(|ext| ext == "md");
        if is_markdown && entry.file_type().map_err(listing_error)?.is_file() {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

// Reads and renders every document, keeping order
pub fn load_documents(paths: &[PathBuf]) -> Result<Vec<RenderedDocument>> {
    paths
        .iter()
        .map(|path| {
            let markdown =
                std::fs::read_to_string(path).map_err(|source| CheckError::DocumentRead {
                    path: path.clone(),
                    source,
                })?;
            Ok(RenderedDocument::new(path.clone(), &markdown))
        })
        .collect()
}
