//! # sqlsift CLI (`sift`)
//!
//! The `sift` binary drives batch processing of a SQL script corpus. Every
//! command reads the same TOML configuration (corpus roots, encoding
//! candidate lists, report directory) and processes files sequentially,
//! skipping the ones it cannot decode and finishing with a tally.
//!
//! ## Usage
//!
//! ```bash
//! sift --config ./sift.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `sift init` | Create the SQLite schema for line imports |
//! | `sift prepend` | Prepend the configured header block, replacing old variants |
//! | `sift replace <pattern> <replacement>` | Regex find-and-replace across the corpus |
//! | `sift truncate <n>` | Delete the first N lines of every file (confirmed) |
//! | `sift catalog` | Extract a catalog of object-creation statements |
//! | `sift analyze` | Per-file size/encoding/statement-count report |
//! | `sift sleuth` | Count configured keywords per file |
//! | `sift import` | Import file lines into SQLite |
//! | `sift script` | Generate a SQLCMD runner script |
//! | `sift rename-dates` | Strip `_YYYYMMDD` suffixes from file names |

mod analyze;
mod catalog;
mod catalog_cmd;
mod config;
mod db;
mod discover;
mod encoding;
mod import_cmd;
mod migrate;
mod mutate;
mod mutate_cmd;
mod rename;
mod report;
mod script_gen;
mod sleuth;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// sqlsift — batch text processing for SQL script corpora.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file describing the corpus roots, encoding candidates, and report
/// output directory.
#[derive(Parser)]
#[command(
    name = "sift",
    about = "sqlsift — batch text processing for SQL script corpora",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./sift.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Initialize the SQLite schema used by `sift import`.
    ///
    /// Idempotent — running it multiple times is safe.
    Init,

    /// Prepend the configured header block to every corpus file.
    ///
    /// Recognizes every known header variant at the top of a file and
    /// replaces it with the chosen one, so repeated runs (and runs after
    /// switching variants) never stack headers.
    Prepend {
        /// Header option to prepend (a key of `[headers.variants]`).
        /// Defaults to `headers.current` from the config.
        #[arg(long)]
        option: Option<String>,
    },

    /// Find and replace a regex pattern across the corpus.
    ///
    /// Files the pattern does not match are left untouched. The
    /// replacement is literal text, not a template.
    Replace {
        /// Search pattern (regular expression).
        pattern: String,
        /// Literal replacement string.
        replacement: String,
    },

    /// Delete the first N lines from every corpus file.
    ///
    /// NOT idempotent: running it twice removes 2×N lines. Prompts for
    /// confirmation unless `--yes` is given.
    Truncate {
        /// Number of leading lines to remove.
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        lines: u64,

        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },

    /// Extract a catalog of object-creation statements.
    ///
    /// Writes `object_type,qualified_name,source_file_stem` records to a
    /// timestamped report. The same object declared in two files yields
    /// two records — cross-file duplication is what the audit looks for.
    Catalog,

    /// Report per-file metadata: size, encoding, line and statement counts.
    Analyze,

    /// Count configured keywords per file (case-insensitive).
    Sleuth,

    /// Import every file's lines into the SQLite `file_text_import` table.
    Import {
        /// Decode undecodable files with replacement characters instead of
        /// skipping them.
        #[arg(long)]
        lossy: bool,
    },

    /// Generate a SQLCMD script that executes every corpus file.
    Script {
        /// Write the script to a file instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Strip `_YYYYMMDD` suffixes from file names in the corpus roots.
    ///
    /// Dry-run by default; shows what would be renamed.
    RenameDates {
        /// Actually perform the renames.
        #[arg(long)]
        apply: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Init => {
            migrate::run_migrations(&cfg).await?;
            println!("Database initialized successfully.");
        }
        Commands::Prepend { option } => {
            mutate_cmd::run_prepend(&cfg, option.as_deref())?;
        }
        Commands::Replace {
            pattern,
            replacement,
        } => {
            mutate_cmd::run_replace(&cfg, &pattern, &replacement)?;
        }
        Commands::Truncate { lines, yes } => {
            mutate_cmd::run_truncate(&cfg, lines as usize, yes)?;
        }
        Commands::Catalog => {
            catalog_cmd::run_catalog(&cfg)?;
        }
        Commands::Analyze => {
            analyze::run_analyze(&cfg)?;
        }
        Commands::Sleuth => {
            sleuth::run_sleuth(&cfg)?;
        }
        Commands::Import { lossy } => {
            import_cmd::run_import(&cfg, lossy).await?;
        }
        Commands::Script { output } => {
            script_gen::run_script(&cfg, output.as_deref())?;
        }
        Commands::RenameDates { apply } => {
            rename::run_rename_dates(&cfg, apply)?;
        }
    }

    Ok(())
}
