//! Corpus file discovery.
//!
//! Walks the configured roots and yields candidate file paths in a
//! deterministic order. Discovery is deliberately decoupled from
//! processing: the batch runners accept any `IntoIterator` of paths, so
//! they can be driven by an in-memory list in tests.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use walkdir::WalkDir;

use crate::config::CorpusConfig;

/// Discover files across every corpus root, sorted for determinism.
///
/// An unreadable directory entry is reported and skipped; a missing root is
/// a configuration problem and fails the run before any processing starts.
pub fn discover(corpus: &CorpusConfig) -> Result<Vec<PathBuf>> {
    let include = build_globset(&corpus.include_globs)?;
    let exclude = build_globset(&corpus.exclude_globs)?;

    let mut files = Vec::new();
    for root in &corpus.roots {
        files.extend(discover_root(root, &include, &exclude, corpus.follow_symlinks)?);
    }
    files.sort();
    Ok(files)
}

/// Discover files under a single root. Used directly by the SQLCMD script
/// generator, which groups its output per root.
pub fn discover_root(
    root: &Path,
    include: &GlobSet,
    exclude: &GlobSet,
    follow_symlinks: bool,
) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        bail!("corpus root does not exist: {}", root.display());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(follow_symlinks) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                eprintln!("skipping unreadable entry under {}: {}", root.display(), err);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path);
        let rel_str = relative.to_string_lossy();

        if exclude.is_match(rel_str.as_ref()) {
            continue;
        }
        if !include.is_match(rel_str.as_ref()) {
            continue;
        }

        files.push(path.to_path_buf());
    }
    files.sort();
    Ok(files)
}

pub fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}
