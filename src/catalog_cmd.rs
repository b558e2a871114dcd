//! Catalog batch run: `sift catalog`.
//!
//! Scans every corpus file for object declarations and writes one
//! timestamped report of `object_type,qualified_name,source_file_stem`
//! records. Deduplication is scoped to that full triple: the same object
//! declared in two files is reported twice on purpose — cross-file
//! duplication is exactly what the audit is looking for.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::catalog::{self, CatalogEntry};
use crate::config::Config;
use crate::discover::discover;
use crate::encoding::{self, Encoding};

pub fn run_catalog(config: &Config) -> Result<()> {
    let files = discover(&config.corpus)?;
    let (entries, skipped) = collect_entries(files, &config.encodings.mutate);

    let lines: Vec<String> = entries
        .iter()
        .map(|e| format!("{},{},{}", e.object_type, e.qualified_name, e.source_file))
        .collect();

    let path = crate::report::timestamped_path(&config.report.output_dir, "object_checks", "txt");
    crate::report::write_lines(&path, &lines)?;

    println!("catalog");
    println!("  entries: {}", entries.len());
    println!("  skipped files: {}", skipped);
    println!("Output written to {}", path.display());
    Ok(())
}

/// Extract declarations from every file, deduplicating on the
/// (type, name, stem) triple in first-seen order. Returns the entries plus
/// the count of files skipped for decode failures.
pub fn collect_entries<I>(files: I, candidates: &[Encoding]) -> (Vec<CatalogEntry>, u64)
where
    I: IntoIterator<Item = PathBuf>,
{
    let mut seen = HashSet::new();
    let mut entries = Vec::new();
    let mut skipped = 0u64;

    for path in files {
        let (text, _) = match encoding::resolve(&path, candidates) {
            Ok(resolved) => resolved,
            Err(err) => {
                eprintln!("skipping {}: {:#}", path.display(), err);
                skipped += 1;
                continue;
            }
        };

        let stem = file_stem(&path);
        for decl in catalog::extract(&text) {
            let entry = CatalogEntry {
                object_type: decl.object_type,
                qualified_name: decl.qualified_name,
                source_file: stem.clone(),
            };
            if seen.insert(entry.clone()) {
                entries.push(entry);
            }
        }
    }

    (entries, skipped)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const CANDIDATES: &[Encoding] = &[Encoding::Utf8Sig, Encoding::Utf8, Encoding::Latin1];

    #[test]
    fn test_same_object_in_two_files_is_two_entries() {
        let tmp = TempDir::new().unwrap();
        let a = tmp.path().join("first.sql");
        let b = tmp.path().join("second.sql");
        fs::write(&a, "CREATE TABLE [dbo].[Accounts] (id INT);\n").unwrap();
        fs::write(&b, "CREATE TABLE [dbo].[Accounts] (id INT);\n").unwrap();

        let (entries, skipped) = collect_entries(vec![a, b], CANDIDATES);
        assert_eq!(skipped, 0);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].qualified_name, "dbo.accounts");
        assert_eq!(entries[0].source_file, "first");
        assert_eq!(entries[1].source_file, "second");
    }

    #[test]
    fn test_repeat_within_one_file_deduplicated() {
        let tmp = TempDir::new().unwrap();
        let a = tmp.path().join("dup.sql");
        fs::write(
            &a,
            "CREATE TABLE [dbo].[A] (id INT);\nGO\nCREATE TABLE [dbo].[A] (id INT);\n",
        )
        .unwrap();

        let (entries, _) = collect_entries(vec![a], CANDIDATES);
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_source_file_is_stem_without_extension() {
        let tmp = TempDir::new().unwrap();
        let a = tmp.path().join("001_Create_Accounts.sql");
        fs::write(&a, "CREATE VIEW [dbo].[V] AS SELECT 1;\n").unwrap();

        let (entries, _) = collect_entries(vec![a], CANDIDATES);
        assert_eq!(entries[0].source_file, "001_Create_Accounts");
    }

    #[test]
    fn test_decode_failure_skips_file_continues_batch() {
        let tmp = TempDir::new().unwrap();
        let bad = tmp.path().join("bad.sql");
        let good = tmp.path().join("good.sql");
        fs::write(&bad, b"CREATE TABLE [dbo].[X\xE9] (id INT);\n").unwrap();
        fs::write(&good, "CREATE TABLE [dbo].[Y] (id INT);\n").unwrap();

        // No latin-1 fallback here, so bad.sql is undecodable.
        let (entries, skipped) =
            collect_entries(vec![bad, good], &[Encoding::Utf8Sig, Encoding::Utf8]);
        assert_eq!(skipped, 1);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].qualified_name, "dbo.y");
    }
}
