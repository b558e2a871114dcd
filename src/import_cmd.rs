//! Line import: `sift import`.
//!
//! Inserts one row per line of each corpus file into the `file_text_import`
//! table, so a whole script corpus can be queried with SQL (which files
//! mention a given object, diff line counts between releases, and so on).
//! Rows are append-only for the duration of a run.
//!
//! Decoding follows the usual strict candidate list; `--lossy` opts into
//! replacement-character decoding for files nothing can decode, since the
//! imported text is never written back to the source file.

use anyhow::Result;
use sqlx::SqlitePool;

use crate::config::Config;
use crate::db;
use crate::discover::discover;
use crate::encoding;

pub async fn run_import(config: &Config, lossy: bool) -> Result<()> {
    let pool = db::connect(config).await?;
    let files = discover(&config.corpus)?;
    let candidates = &config.encodings.mutate;

    let mut files_imported = 0u64;
    let mut lines_imported = 0u64;
    let mut skipped = 0u64;

    for path in &files {
        let resolved = if lossy {
            encoding::resolve_lossy(path, candidates)
        } else {
            encoding::resolve(path, candidates)
        };
        let (text, enc) = match resolved {
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
        let file_directory = path
            .parent()
            .map(|p| p.display().to_string())
            .unwrap_or_default();

        let inserted = insert_file_lines(&pool, &file_name, &file_directory, &text).await?;

        println!("Imported {} with encoding {}", path.display(), enc);
        files_imported += 1;
        lines_imported += inserted;
    }

    println!("import");
    println!("  files: {}", files_imported);
    println!("  lines: {}", lines_imported);
    println!("  skipped: {}", skipped);
    println!("ok");

    pool.close().await;
    Ok(())
}

/// Insert every line of one file inside a single transaction. Line numbers
/// start at 1.
async fn insert_file_lines(
    pool: &SqlitePool,
    file_name: &str,
    file_directory: &str,
    text: &str,
) -> Result<u64> {
    let mut tx = pool.begin().await?;
    let mut inserted = 0u64;

    for (index, line) in text.lines().enumerate() {
        sqlx::query(
            "INSERT INTO file_text_import (file_name, line_number, line_text, file_directory) \
             VALUES (?, ?, ?, ?)",
        )
        .bind(file_name)
        .bind((index + 1) as i64)
        .bind(line)
        .bind(file_directory)
        .execute(&mut *tx)
        .await?;
        inserted += 1;
    }

    tx.commit().await?;
    Ok(inserted)
}
