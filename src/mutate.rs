//! Idempotent mutation rules.
//!
//! A [`MutationRule`] transforms a file's text; [`apply`] is a pure function
//! of text and rule, with no knowledge of paths or encodings (those are the
//! batch runner's concern in [`crate::mutate_cmd`]).
//!
//! Header and substitution rules converge under repeated application.
//! Truncation does not — re-running it removes more lines — so the CLI
//! gates it behind a confirmation prompt.

use anyhow::{bail, Result};
use regex::Regex;

/// One of the three supported mutation kinds.
#[derive(Debug)]
pub enum MutationRule {
    Header(HeaderRule),
    Substitution(SubstitutionRule),
    Truncation(TruncationRule),
}

impl MutationRule {
    pub fn header(chosen: &str, variants: &[String]) -> Result<Self> {
        Ok(MutationRule::Header(HeaderRule::new(chosen, variants)?))
    }

    pub fn substitution(pattern: &str, replacement: &str) -> Result<Self> {
        Ok(MutationRule::Substitution(SubstitutionRule::new(
            pattern,
            replacement,
        )?))
    }

    pub fn truncation(lines: usize) -> Self {
        MutationRule::Truncation(TruncationRule { lines })
    }
}

/// Ensures a canonical header block is present at the top of the file.
///
/// The matcher recognizes *every* historically known header variant, not
/// just the chosen one: a file previously prepended with an older variant
/// has that variant replaced rather than a second header stacked on top.
#[derive(Debug)]
pub struct HeaderRule {
    chosen: String,
    matcher: Regex,
}

impl HeaderRule {
    /// Build a rule from the chosen header text plus the full variant set.
    /// An empty variant set cannot detect prior runs and is rejected.
    pub fn new(chosen: &str, variants: &[String]) -> Result<Self> {
        if variants.iter().all(|v| v.trim().is_empty()) {
            bail!("header variant set is empty; idempotence detection requires at least one known variant");
        }

        // Longest variant first, so a variant that prefixes another is not
        // matched short of the full block.
        let mut alternatives: Vec<&str> = variants
            .iter()
            .map(|v| v.trim_end())
            .filter(|v| !v.is_empty())
            .collect();
        alternatives.sort_by_key(|v| std::cmp::Reverse(v.len()));
        alternatives.dedup();
        if alternatives.is_empty() {
            bail!("header variant set contains only blank variants");
        }

        let pattern = format!(
            "^(?:{})",
            alternatives
                .iter()
                .map(|v| format!("{}(?:[ \\t]*\\r?\\n|$)", regex::escape(v)))
                .collect::<Vec<_>>()
                .join("|")
        );
        let matcher = Regex::new(&pattern)?;

        Ok(Self {
            chosen: chosen.trim_end().to_string(),
            matcher,
        })
    }

    fn apply(&self, text: &str) -> String {
        let remainder = match self.matcher.find(text) {
            Some(m) => text[m.end()..].trim_start(),
            None => text,
        };

        let mut out = String::with_capacity(self.chosen.len() + 2 + remainder.len());
        out.push_str(&self.chosen);
        out.push_str("\n\n");
        out.push_str(remainder);
        out
    }
}

/// Global regex substitution with a literal replacement string.
#[derive(Debug)]
pub struct SubstitutionRule {
    pattern: Regex,
    replacement: String,
}

impl SubstitutionRule {
    pub fn new(pattern: &str, replacement: &str) -> Result<Self> {
        let pattern = Regex::new(pattern)?;
        Ok(Self {
            pattern,
            replacement: replacement.to_string(),
        })
    }

    fn apply(&self, text: &str) -> String {
        // NoExpand: the replacement is literal, `$` has no special meaning.
        self.pattern
            .replace_all(text, regex::NoExpand(&self.replacement))
            .into_owned()
    }
}

/// Removes a fixed count of leading lines (terminator inclusive).
#[derive(Debug)]
pub struct TruncationRule {
    pub lines: usize,
}

impl TruncationRule {
    fn apply(&self, text: &str) -> String {
        let mut rest = text;
        for _ in 0..self.lines {
            match rest.find('\n') {
                Some(pos) => rest = &rest[pos + 1..],
                // Fewer lines than requested: everything goes.
                None => return String::new(),
            }
        }
        rest.to_string()
    }
}

/// Apply `rule` to `text`, returning the new text.
pub fn apply(text: &str, rule: &MutationRule) -> String {
    match rule {
        MutationRule::Header(r) => r.apply(text),
        MutationRule::Substitution(r) => r.apply(text),
        MutationRule::Truncation(r) => r.apply(text),
    }
}
