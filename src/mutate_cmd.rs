//! Batch mutation runner: `sift prepend`, `sift replace`, `sift truncate`.
//!
//! Sequential processing, one file at a time: resolve encoding, apply the
//! rule, write back in the encoding the file was read with. A file that
//! cannot be decoded or written is reported and skipped; the batch always
//! attempts every discovered file and ends with a tally.

use std::io::Write as _;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use crate::config::Config;
use crate::discover::discover;
use crate::encoding::{self, Encoding};
use crate::mutate::{self, MutationRule};

/// Outcome of one batch run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BatchTally {
    pub processed: u64,
    pub updated: u64,
    pub skipped: u64,
}

/// Prepend the configured header (or the one named by `option`) to every
/// corpus file, replacing any previously prepended variant.
pub fn run_prepend(config: &Config, option: Option<&str>) -> Result<()> {
    let headers = config
        .headers
        .as_ref()
        .ok_or_else(|| anyhow!("[headers] is not configured"))?;

    let name = option.unwrap_or(&headers.current);
    let chosen = headers
        .variants
        .get(name)
        .ok_or_else(|| anyhow!("unknown header option '{}'", name))?;
    let variants: Vec<String> = headers.variants.values().cloned().collect();
    let rule = MutationRule::header(chosen, &variants)?;

    let files = discover(&config.corpus)?;
    let tally = apply_rule(files, &config.encodings.mutate, &rule);
    print_tally("prepend", &tally);
    Ok(())
}

/// Globally substitute `pattern` with the literal `replacement` in every
/// corpus file. Files the pattern does not touch are left unwritten and not
/// counted as updated.
pub fn run_replace(config: &Config, pattern: &str, replacement: &str) -> Result<()> {
    // Pattern compilation happens before any file is touched.
    let rule = MutationRule::substitution(pattern, replacement)
        .with_context(|| format!("invalid search pattern '{}'", pattern))?;

    let files = discover(&config.corpus)?;
    let tally = apply_rule(files, &config.encodings.mutate, &rule);
    print_tally("replace", &tally);
    Ok(())
}

/// Remove the first `lines` lines from every corpus file.
///
/// Truncation is not idempotent — running it twice removes twice the lines —
/// so it is gated behind a confirmation prompt unless `yes` is set.
pub fn run_truncate(config: &Config, lines: usize, yes: bool) -> Result<()> {
    if !yes && !confirm_truncate(lines, &config.corpus.roots)? {
        println!("Operation canceled.");
        return Ok(());
    }

    let rule = MutationRule::truncation(lines);
    let files = discover(&config.corpus)?;
    let tally = apply_rule(files, &config.encodings.mutate, &rule);
    print_tally("truncate", &tally);
    Ok(())
}

/// Apply `rule` to every path in `files`. Accepts any path iterator so the
/// loop can be tested without touching a real corpus layout.
pub fn apply_rule<I>(files: I, candidates: &[Encoding], rule: &MutationRule) -> BatchTally
where
    I: IntoIterator<Item = PathBuf>,
{
    let mut tally = BatchTally::default();

    for path in files {
        tally.processed += 1;

        let (text, enc) = match encoding::resolve(&path, candidates) {
            Ok(resolved) => resolved,
            Err(err) => {
                eprintln!("skipping {}: {:#}", path.display(), err);
                tally.skipped += 1;
                continue;
            }
        };

        let new_text = mutate::apply(&text, rule);

        // A substitution that matched nothing is a logical no-op: skip the
        // write so the file's mtime is untouched and it is not reported as
        // updated.
        if new_text == text {
            if let MutationRule::Substitution(_) = rule {
                continue;
            }
        }

        match write_back(&path, &new_text, enc) {
            Ok(()) => {
                println!("Processed {} with encoding {}", path.display(), enc);
                tally.updated += 1;
            }
            Err(err) => {
                eprintln!("skipping {}: {:#}", path.display(), err);
                tally.skipped += 1;
            }
        }
    }

    tally
}

/// Write `text` to `path` using the same encoding it was read with.
fn write_back(path: &std::path::Path, text: &str, enc: Encoding) -> Result<()> {
    let bytes = enc.encode(text)?;
    std::fs::write(path, bytes).with_context(|| format!("failed to write {}", path.display()))
}

fn confirm_truncate(lines: usize, roots: &[PathBuf]) -> Result<bool> {
    println!(
        "You are about to delete the first {} lines from all matching files in:",
        lines
    );
    for root in roots {
        println!("  {}", root.display());
    }
    print!("Do you want to proceed? (yes/no): ");
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("yes"))
}

fn print_tally(command: &str, tally: &BatchTally) {
    println!("{}", command);
    println!("  files: {}", tally.processed);
    println!("  updated: {}", tally.updated);
    println!("  skipped: {}", tally.skipped);
    println!("ok");
}
