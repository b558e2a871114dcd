//! Keyword counting: `sift sleuth`.
//!
//! Loads a keyword list (one per line) and counts case-insensitive
//! occurrences of each keyword in every corpus file, emitting CSV rows of
//! `Keyword,Count,FileName,FilePath`. Useful for auditing how often SQL
//! patterns or vendor-specific constructs appear across a script corpus.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use regex::{Regex, RegexBuilder};

use crate::config::Config;
use crate::discover::discover;
use crate::encoding::{self, Encoding};

/// One (keyword, file) count row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordCount {
    pub keyword: String,
    pub count: usize,
    pub file_name: String,
    pub file_path: String,
}

/// Load keywords from a plain-text file, one per line, blanks skipped.
pub fn load_keywords(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read keywords file {}", path.display()))?;

    let keywords: Vec<String> = content
        .lines()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect();

    if keywords.is_empty() {
        bail!("keywords file {} contains no keywords", path.display());
    }
    Ok(keywords)
}

/// Compile each keyword into an escaped-literal, case-insensitive matcher.
fn compile_keywords(keywords: &[String]) -> Result<Vec<(String, Regex)>> {
    keywords
        .iter()
        .map(|kw| {
            let re = RegexBuilder::new(&regex::escape(kw))
                .case_insensitive(true)
                .build()?;
            Ok((kw.clone(), re))
        })
        .collect()
}

pub fn run_sleuth(config: &Config) -> Result<()> {
    let sleuth = config
        .sleuth
        .as_ref()
        .ok_or_else(|| anyhow!("[sleuth] is not configured"))?;

    let keywords = load_keywords(&sleuth.keywords_file)?;
    let matchers = compile_keywords(&keywords)?;

    let files = discover(&config.corpus)?;
    let (counts, skipped) = collect_counts(files, &config.encodings.analyze, &matchers);

    let mut lines = vec!["Keyword,Count,FileName,FilePath".to_string()];
    lines.extend(counts.iter().map(|c| {
        format!("{},{},{},{}", c.keyword, c.count, c.file_name, c.file_path)
    }));

    let path =
        crate::report::timestamped_path(&config.report.output_dir, "wordcount_sleuth", "csv");
    crate::report::write_lines(&path, &lines)?;

    println!("sleuth");
    println!("  keywords: {}", keywords.len());
    println!("  rows: {}", lines.len() - 1);
    println!("  skipped files: {}", skipped);
    println!("Output written to {}", path.display());
    Ok(())
}

/// One row per (keyword, file), in file order then keyword order.
pub fn collect_counts<I>(
    files: I,
    candidates: &[Encoding],
    matchers: &[(String, Regex)],
) -> (Vec<KeywordCount>, u64)
where
    I: IntoIterator<Item = PathBuf>,
{
    let mut counts = Vec::new();
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

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let file_path = path.display().to_string();

        for (keyword, re) in matchers {
            counts.push(KeywordCount {
                keyword: keyword.clone(),
                count: re.find_iter(&text).count(),
                file_name: file_name.clone(),
                file_path: file_path.clone(),
            });
        }
    }

    (counts, skipped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_counting_is_case_insensitive() {
        let matchers = compile_keywords(&["nocount".to_string()]).unwrap();
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("a.sql");
        fs::write(&path, "SET NOCOUNT ON;\nset nocount off;\n").unwrap();

        let (counts, _) = collect_counts(
            vec![path],
            &[Encoding::Utf8Sig, Encoding::Latin1],
            &matchers,
        );
        assert_eq!(counts.len(), 1);
        assert_eq!(counts[0].count, 2);
    }

    #[test]
    fn test_keywords_are_escaped_literals() {
        // A keyword containing regex metacharacters must match literally.
        let matchers = compile_keywords(&["sp_configure '%'".to_string()]).unwrap();
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("a.sql");
        fs::write(&path, "EXECUTE sp_configure '%';\n").unwrap();

        let (counts, _) = collect_counts(
            vec![path],
            &[Encoding::Utf8Sig, Encoding::Latin1],
            &matchers,
        );
        assert_eq!(counts[0].count, 1);
    }

    #[test]
    fn test_zero_counts_still_emit_rows() {
        let matchers = compile_keywords(&["MERGE".to_string()]).unwrap();
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("a.sql");
        fs::write(&path, "SELECT 1;\n").unwrap();

        let (counts, _) = collect_counts(
            vec![path],
            &[Encoding::Utf8Sig, Encoding::Latin1],
            &matchers,
        );
        assert_eq!(counts.len(), 1);
        assert_eq!(counts[0].count, 0);
    }

    #[test]
    fn test_load_keywords_trims_and_skips_blanks() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("keywords.txt");
        fs::write(&path, "CURSOR\n\n  MERGE  \n").unwrap();
        assert_eq!(load_keywords(&path).unwrap(), vec!["CURSOR", "MERGE"]);
    }

    #[test]
    fn test_empty_keywords_file_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("keywords.txt");
        fs::write(&path, "\n  \n").unwrap();
        assert!(load_keywords(&path).is_err());
    }
}
