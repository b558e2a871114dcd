//! File metadata analysis: `sift analyze`.
//!
//! Produces one row per corpus file: name, size, directory, the encoding
//! that decoded it, line count, and occurrence counts for the four
//! statement keywords. Counting here is case-insensitive, unlike the
//! catalog scanner — the two matching modes are deliberately independent.

use std::path::PathBuf;

use anyhow::Result;

use crate::config::Config;
use crate::discover::discover;
use crate::encoding::{self, Encoding};

/// Statement counts for one file.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SqlCounts {
    pub lines: usize,
    pub creates: usize,
    pub alters: usize,
    pub inserts: usize,
    pub updates: usize,
}

/// Count lines and case-insensitive keyword occurrences.
pub fn analyze_text(text: &str) -> SqlCounts {
    let upper = text.to_uppercase();
    SqlCounts {
        lines: text.lines().count(),
        creates: upper.matches("CREATE").count(),
        alters: upper.matches("ALTER").count(),
        inserts: upper.matches("INSERT").count(),
        updates: upper.matches("UPDATE").count(),
    }
}

pub fn run_analyze(config: &Config) -> Result<()> {
    let files = discover(&config.corpus)?;
    let (rows, skipped) = collect_rows(files, &config.encodings.analyze);

    let mut lines = vec![
        "File Name, Size (bytes), Directory, Encoding, Lines, CREATEs, ALTERs, INSERTs, UPDATEs"
            .to_string(),
    ];
    lines.extend(rows);

    let path = crate::report::timestamped_path(&config.report.output_dir, "file_analysis", "txt");
    crate::report::write_lines(&path, &lines)?;

    println!("analyze");
    println!("  files: {}", lines.len() - 1);
    println!("  skipped files: {}", skipped);
    println!("Output written to {}", path.display());
    Ok(())
}

fn collect_rows<I>(files: I, candidates: &[Encoding]) -> (Vec<String>, u64)
where
    I: IntoIterator<Item = PathBuf>,
{
    let mut rows = Vec::new();
    let mut skipped = 0u64;

    for path in files {
        let (text, enc) = match encoding::resolve(&path, candidates) {
            Ok(resolved) => resolved,
            Err(err) => {
                eprintln!("skipping {}: {:#}", path.display(), err);
                skipped += 1;
                continue;
            }
        };

        let size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let dir = path
            .parent()
            .map(|p| p.display().to_string())
            .unwrap_or_default();

        let counts = analyze_text(&text);
        rows.push(format!(
            "{}, {}, {}, {}, {}, {}, {}, {}, {}",
            name, size, dir, enc, counts.lines, counts.creates, counts.alters, counts.inserts,
            counts.updates
        ));
    }

    (rows, skipped)
}
