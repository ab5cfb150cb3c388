//! Linear substring search over the locally downloaded documents.
//!
//! Every call re-reads and re-extracts each matching file; nothing is
//! indexed or cached between calls.

use anyhow::Result;
use globset::GlobSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::{SearchConfig, StorageConfig};
use crate::extract::extract_text;
use crate::models::SearchResult;

#[derive(Debug, Clone)]
pub struct SearchScanner {
    dir: PathBuf,
    include: GlobSet,
    snippet_chars: usize,
}

impl SearchScanner {
    pub fn new(storage: &StorageConfig, search: &SearchConfig) -> Result<Self> {
        Ok(Self {
            dir: storage.download_dir.clone(),
            include: search.build_globset()?,
            snippet_chars: search.snippet_chars,
        })
    }

    /// Returns one result per local document whose text contains `query`,
    /// ignoring case.
    ///
    /// Results follow directory enumeration order. Documents that fail to
    /// extract are logged and skipped.
    pub fn scan(&self, query: &str) -> Vec<SearchResult> {
        let needle = query.to_lowercase();
        let mut results = Vec::new();

        for (name, path) in self.documents() {
            let text = match extract_text(&path) {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!(file = %name, error = %e, "skipping unreadable document");
                    continue;
                }
            };

            if text.to_lowercase().contains(&needle) {
                results.push(SearchResult {
                    snippet: snippet(&text, self.snippet_chars),
                    file: name,
                });
            }
        }

        tracing::debug!(query, matches = results.len(), "search finished");
        results
    }

    /// Regular files directly inside the download directory whose names
    /// match the include globs.
    fn documents(&self) -> Vec<(String, PathBuf)> {
        if !self.dir.is_dir() {
            return Vec::new();
        }

        WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!(error = %e, "failed to read download directory entry");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                let name = entry.file_name().to_str()?.to_string();
                self.matches(&name)
                    .then(|| (name, entry.into_path()))
            })
            .collect()
    }

    fn matches(&self, name: &str) -> bool {
        self.include.is_match(Path::new(name))
    }
}

/// First `max_chars` characters of `text`.
pub fn snippet(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => text[..end].to_string(),
        None => text.to_string(),
    }
}
