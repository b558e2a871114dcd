//! TOML configuration parsing and validation.
//!
//! Configuration is an explicit value passed into each operation at call
//! time, never ambient global state. All validation happens at load time:
//! an invalid configuration aborts the run before any file is touched.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::encoding::Encoding;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub encodings: EncodingsConfig,
    pub report: ReportConfig,
    #[serde(default)]
    pub headers: Option<HeadersConfig>,
    #[serde(default)]
    pub sleuth: Option<SleuthConfig>,
    #[serde(default)]
    pub db: Option<DbConfig>,
}

/// Which directory trees to process, and which files within them.
#[derive(Debug, Deserialize, Clone)]
pub struct CorpusConfig {
    pub roots: Vec<PathBuf>,
    #[serde(default = "default_include_globs")]
    pub include_globs: Vec<String>,
    #[serde(default)]
    pub exclude_globs: Vec<String>,
    #[serde(default)]
    pub follow_symlinks: bool,
}

fn default_include_globs() -> Vec<String> {
    vec!["**/*.sql".to_string()]
}

/// Candidate encoding lists, in priority order. The mutate list is used by
/// every path that writes files back (and by the catalog crawler); the
/// analyze list by the read-only analysis paths.
#[derive(Debug, Deserialize, Clone)]
pub struct EncodingsConfig {
    #[serde(default = "default_mutate_encodings")]
    pub mutate: Vec<Encoding>,
    #[serde(default = "default_analyze_encodings")]
    pub analyze: Vec<Encoding>,
}

impl Default for EncodingsConfig {
    fn default() -> Self {
        Self {
            mutate: default_mutate_encodings(),
            analyze: default_analyze_encodings(),
        }
    }
}

fn default_mutate_encodings() -> Vec<Encoding> {
    vec![Encoding::Utf8Sig, Encoding::Utf8, Encoding::Latin1]
}

fn default_analyze_encodings() -> Vec<Encoding> {
    vec![Encoding::Utf8Sig, Encoding::Latin1]
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReportConfig {
    pub output_dir: PathBuf,
}

/// The canonical header plus every historically used variant. The variant
/// set is what makes prepending idempotent: an old header is recognized and
/// replaced instead of a new one stacking on top.
#[derive(Debug, Deserialize, Clone)]
pub struct HeadersConfig {
    /// Key into `variants` naming the header to prepend.
    pub current: String,
    pub variants: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SleuthConfig {
    /// Plain-text file with one keyword per line.
    pub keywords_file: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DbConfig {
    pub path: PathBuf,
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.corpus.roots.is_empty() {
        bail!("corpus.roots must list at least one directory");
    }
    if config.corpus.include_globs.is_empty() {
        bail!("corpus.include_globs must not be empty");
    }

    validate_candidates("encodings.mutate", &config.encodings.mutate)?;
    validate_candidates("encodings.analyze", &config.encodings.analyze)?;

    if let Some(headers) = &config.headers {
        if headers.variants.is_empty() {
            bail!("headers.variants must not be empty");
        }
        if !headers.variants.contains_key(&headers.current) {
            bail!(
                "headers.current = '{}' does not name a member of headers.variants",
                headers.current
            );
        }
    }

    Ok(config)
}

/// A candidate list must be non-empty, and an infallible encoding can only
/// sit in last position: anything listed after it would never be tried.
fn validate_candidates(field: &str, candidates: &[Encoding]) -> Result<()> {
    if candidates.is_empty() {
        bail!("{} must list at least one encoding", field);
    }
    for (i, candidate) in candidates.iter().enumerate() {
        if candidate.is_infallible() && i != candidates.len() - 1 {
            bail!(
                "{}: '{}' never fails to decode and must be the last candidate",
                field,
                candidate
            );
        }
    }
    Ok(())
}
