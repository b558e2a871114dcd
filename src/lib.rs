//! # sqlsift
//!
//! A batch text-processing toolkit for corpora of SQL script files.
//!
//! sqlsift walks directory trees of generated `.sql` scripts, reads them
//! despite unknown or mixed character encodings, applies idempotent content
//! transformations (header prepending, pattern replacement, leading-line
//! removal), and extracts a catalog of schema-object declarations for
//! auditing. It grew out of migration tooling for moving SQL Server script
//! corpora onto PostgreSQL/Babelfish.
//!
//! ## Pipeline
//!
//! ```text
//! ┌───────────┐   ┌────────────┐   ┌───────────────────────┐
//! │ Discovery │──▶│  Encoding  │──▶│ Mutation / Extraction │
//! │ (walkdir) │   │  resolver  │   │  (write-back/report)  │
//! └───────────┘   └────────────┘   └───────────────────────┘
//! ```
//!
//! Files are processed strictly one at a time. Each file is decoded with the
//! first candidate encoding that succeeds, transformed, and written back in
//! that same encoding — a file's encoding is never silently changed.
//! Per-file failures are reported and skipped; the batch always attempts
//! every discovered file.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing and validation |
//! | [`encoding`] | Ordered-candidate encoding resolution |
//! | [`discover`] | Corpus file discovery (walkdir + globs) |
//! | [`mutate`] | Idempotent mutation rules |
//! | [`catalog`] | Schema-object declaration extraction |
//! | [`analyze`] | Per-file metadata and statement counts |
//! | [`sleuth`] | Case-insensitive keyword counting |
//! | [`report`] | Timestamped report artifacts |
//! | [`db`] / [`migrate`] | SQLite storage for line imports |

pub mod analyze;
pub mod catalog;
pub mod catalog_cmd;
pub mod config;
pub mod db;
pub mod discover;
pub mod encoding;
pub mod import_cmd;
pub mod migrate;
pub mod mutate;
pub mod mutate_cmd;
pub mod rename;
pub mod report;
pub mod script_gen;
pub mod sleuth;
