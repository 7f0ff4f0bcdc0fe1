// src/checker/classify.rs
// =============================================================================
// This module decides what each raw link target is:
//
// - External URL   "https://..."             -> checked over HTTP
// - Local reference "chapter.html", "a.scala" -> checked on disk
// - Dropped         "#footnote", "Foo[T]"     -> not checked at all
//
// Local references point at the markdown sources, not at the rendered site,
// so "chapter.html" is checked as "<root>/chapter.md". Files under the
// artifact marker directory (example projects) are served as-is and keep
// their extension.
//
// The classifier is conservative: anything it does not recognize is
// dropped instead of reported. The one thing it does report is a local
// reference that climbs out of the source root ("../outside.md"), because
// such a link breaks once the site is built.
// =============================================================================

use super::extract::RawLink;
use crate::config::Config;
use percent_encoding::percent_decode_str;
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};
use url::Url;

// A local reference after normalization
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalRef {
    /// Path to check, `<root>/<target>` with the .html -> .md rewrite applied
    pub path: PathBuf,
    /// The raw target it came from
    pub target: String,
    pub source_document: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedLink {
    External(String),
    Local(PathBuf),
}

// Result of classifying a single target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Link(ClassifiedLink),
    /// A local reference that resolves outside the source root
    Escaped(PathBuf),
    Drop,
}

// All links of a run, split by what we do with them
#[derive(Debug, Default)]
pub struct ClassifiedSet {
    /// Unique, in first-seen order
    pub external: Vec<String>,
    pub local: Vec<LocalRef>,
    pub escaped: Vec<LocalRef>,
    pub dropped: usize,
}

// Classifies one target string
pub fn classify(target: &str, config: &Config) -> Classification {
    if target.starts_with("http") {
        return if is_valid_url(target) {
            Classification::Link(ClassifiedLink::External(target.to_string()))
        } else {
            Classification::Drop
        };
    }

    // Page-internal anchors (footnotes, headings)
    if target.starts_with('#') {
        return Classification::Drop;
    }

    // The renderer percent-encodes hrefs; files on disk are named in plain
    // UTF-8 ("型クラス.md", "my page.md")
    let Some(target) = decode_local_target(target) else {
        return Classification::Drop;
    };

    // Code snippets sometimes render as links ("Option[A]"), so only
    // targets with a known extension are treated as files
    if !has_allowed_extension(&target, &config.local_extensions) {
        return Classification::Drop;
    }

    let path = local_path(&target, config);
    if is_inside(&path, &config.source_root) {
        Classification::Link(ClassifiedLink::Local(path))
    } else {
        Classification::Escaped(path)
    }
}

// Classifies every raw link; external URLs come back deduplicated
pub fn classify_links(links: &[RawLink], config: &Config) -> ClassifiedSet {
    let mut set = ClassifiedSet::default();
    let mut external = Vec::new();

    for link in links {
        let local_ref = |path| LocalRef {
            path,
            target: decode_local_target(&link.target).unwrap_or_else(|| link.target.clone()),
            source_document: link.source_document.clone(),
        };
        match classify(&link.target, config) {
            Classification::Link(ClassifiedLink::External(url)) => external.push(url),
            Classification::Link(ClassifiedLink::Local(path)) => set.local.push(local_ref(path)),
            Classification::Escaped(path) => set.escaped.push(local_ref(path)),
            Classification::Drop => set.dropped += 1,
        }
    }

    set.external = dedup_urls(external);
    set
}

// Removes duplicate URLs, keeping the first occurrence of each
pub fn dedup_urls(urls: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    urls.into_iter()
        .filter(|url| seen.insert(url.clone()))
        .collect()
}

// Undoes the renderer's percent-encoding; None if the bytes are not UTF-8
pub fn decode_local_target(target: &str) -> Option<String> {
    percent_decode_str(target)
        .decode_utf8()
        .ok()
        .map(|decoded| decoded.into_owned())
}

fn is_valid_url(target: &str) -> bool {
    Url::parse(target)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
        .unwrap_or(false)
}

fn has_allowed_extension(target: &str, extensions: &[String]) -> bool {
    extensions
        .iter()
        .filter(|ext| !ext.is_empty())
        .any(|ext| {
            target.len() > ext.len() + 1
                && target.ends_with(ext.as_str())
                && target[..target.len() - ext.len()].ends_with('.')
        })
}

// Maps a target to the file we expect under the source root
fn local_path(target: &str, config: &Config) -> PathBuf {
    let rewritten = match target.strip_suffix(".html") {
        Some(stem) if !target.contains(config.artifact_marker.as_str()) => format!("{stem}.md"),
        _ => target.to_string(),
    };
    // "/page.md" is site-absolute, which is still relative to the root
    config.source_root.join(rewritten.trim_start_matches('/'))
}

// Lexical containment check, the file does not need to exist
fn is_inside(path: &Path, root: &Path) -> bool {
    let root = normalize_lexically(root);
    let path = normalize_lexically(path);
    match path.strip_prefix(&root) {
        Ok(rest) => {
            rest.components().next().is_some()
                && rest.components().all(|c| matches!(c, Component::Normal(_)))
        }
        Err(_) => false,
    }
}

// Resolves "." and ".." without touching the filesystem
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut parts: Vec<Component> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                // "/.." is still "/"
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }
    parts.iter().collect()
}
