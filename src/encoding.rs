//! Ordered-candidate encoding resolution.
//!
//! SQL script corpora accumulate files saved by different tools and locales
//! over years: BOM-prefixed UTF-8 from SSMS, plain UTF-8, and legacy
//! single-byte files. Rather than guess with confidence heuristics, the
//! resolver tries an ordered candidate list and accepts the first encoding
//! that decodes the whole file without error. The winning [`Encoding`] flows
//! with the text so a later write-back re-encodes with exactly the encoding
//! the file was read with.
//!
//! `latin-1` (realized as windows-1252, the WHATWG `latin1` alias) decodes
//! any byte sequence, so it acts as a universal fallback and must always be
//! the last candidate.

use std::fmt;
use std::path::Path;

use anyhow::{bail, Context, Result};
use encoding_rs::{UTF_8, WINDOWS_1252};
use serde::Deserialize;

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// A candidate file encoding. The serde names match the identifiers used in
/// configuration files (`utf-8-sig`, `utf-8`, `latin-1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Encoding {
    /// UTF-8 with a leading byte-order mark. Only matches when the BOM is
    /// actually present, so a BOM is never introduced onto a file that had
    /// none.
    #[serde(rename = "utf-8-sig")]
    Utf8Sig,
    /// Plain UTF-8, no BOM handling.
    #[serde(rename = "utf-8")]
    Utf8,
    /// Windows-1252 (the WHATWG `latin1` alias). Decoding never fails.
    #[serde(rename = "latin-1")]
    Latin1,
}

impl Encoding {
    /// Strictly decode `bytes`, returning `None` on any decoding error.
    pub fn decode(&self, bytes: &[u8]) -> Option<String> {
        match self {
            Encoding::Utf8Sig => {
                let rest = bytes.strip_prefix(&UTF8_BOM)?;
                UTF_8
                    .decode_without_bom_handling_and_without_replacement(rest)
                    .map(|s| s.into_owned())
            }
            Encoding::Utf8 => UTF_8
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(|s| s.into_owned()),
            Encoding::Latin1 => WINDOWS_1252
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(|s| s.into_owned()),
        }
    }

    /// Re-encode text for write-back. `Utf8Sig` re-emits the BOM; `Latin1`
    /// fails if the text contains characters outside windows-1252 (possible
    /// when a substitution introduced them).
    pub fn encode(&self, text: &str) -> Result<Vec<u8>> {
        match self {
            Encoding::Utf8Sig => {
                let mut out = UTF8_BOM.to_vec();
                out.extend_from_slice(text.as_bytes());
                Ok(out)
            }
            Encoding::Utf8 => Ok(text.as_bytes().to_vec()),
            Encoding::Latin1 => {
                let (bytes, _, had_errors) = WINDOWS_1252.encode(text);
                if had_errors {
                    bail!("text contains characters not representable in latin-1");
                }
                Ok(bytes.into_owned())
            }
        }
    }

    /// True when decoding with this encoding can never fail.
    pub fn is_infallible(&self) -> bool {
        matches!(self, Encoding::Latin1)
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Encoding::Utf8Sig => "utf-8-sig",
            Encoding::Utf8 => "utf-8",
            Encoding::Latin1 => "latin-1",
        };
        f.write_str(name)
    }
}

/// Read `path` and decode it with the first candidate encoding that
/// succeeds. First match wins; there is no scoring.
///
/// Fails when the file cannot be read or when every candidate fails to
/// decode it. Callers treat either case as a per-file skip, never as a
/// batch abort.
pub fn resolve(path: &Path, candidates: &[Encoding]) -> Result<(String, Encoding)> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    for candidate in candidates {
        if let Some(text) = candidate.decode(&bytes) {
            return Ok((text, *candidate));
        }
    }

    bail!(
        "no candidate encoding could decode {} (tried {})",
        path.display(),
        candidates
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );
}

/// Like [`resolve`], but falls back to a lossy UTF-8 decode (replacement
/// characters for invalid sequences) instead of failing when the candidate
/// list is exhausted. Explicit opt-in only — used by the line importer,
/// which never writes the text back.
pub fn resolve_lossy(path: &Path, candidates: &[Encoding]) -> Result<(String, Encoding)> {
    match resolve(path, candidates) {
        Ok(resolved) => Ok(resolved),
        Err(_) => {
            let bytes = std::fs::read(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let (text, _, _) = UTF_8.decode(&bytes);
            Ok((text.into_owned(), Encoding::Utf8))
        }
    }
}
