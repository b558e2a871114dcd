//! Filename date-suffix cleanup: `sift rename-dates`.
//!
//! Generated deployment scripts often carry an `_YYYYMMDD` suffix before
//! the extension. This strips it, scanning each corpus root's top level
//! (non-recursive). Dry-run by default; `--apply` performs the renames.

use std::sync::OnceLock;

use anyhow::{Context, Result};
use regex::Regex;

use crate::config::Config;

/// `_YYYYMMDD` immediately before the extension.
fn date_suffix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(_\d{8})(\.\w+)$").expect("date suffix pattern is valid"))
}

/// New file name with the date suffix removed, or `None` when the name does
/// not carry one.
pub fn strip_date_suffix(name: &str) -> Option<String> {
    let re = date_suffix();
    if !re.is_match(name) {
        return None;
    }
    Some(re.replace(name, "$2").into_owned())
}

pub fn run_rename_dates(config: &Config, apply: bool) -> Result<()> {
    let mut renamed = 0u64;

    for root in &config.corpus.roots {
        let entries = std::fs::read_dir(root)
            .with_context(|| format!("failed to read {}", root.display()))?;

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    eprintln!("skipping unreadable entry under {}: {}", root.display(), err);
                    continue;
                }
            };
            if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                continue;
            }

            let name = entry.file_name().to_string_lossy().into_owned();
            let Some(new_name) = strip_date_suffix(&name) else {
                continue;
            };

            if apply {
                let target = root.join(&new_name);
                match std::fs::rename(entry.path(), &target) {
                    Ok(()) => {
                        println!("Renamed \"{}\" to \"{}\"", name, new_name);
                        renamed += 1;
                    }
                    Err(err) => eprintln!("skipping {}: {}", name, err),
                }
            } else {
                println!("Would rename \"{}\" to \"{}\"", name, new_name);
                renamed += 1;
            }
        }
    }

    if apply {
        println!("{} file(s) renamed", renamed);
    } else {
        println!("{} file(s) would be renamed (pass --apply to rename)", renamed);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_date_suffix() {
        assert_eq!(
            strip_date_suffix("Create_Accounts_20240115.sql").as_deref(),
            Some("Create_Accounts.sql")
        );
    }

    #[test]
    fn test_requires_eight_digits() {
        assert_eq!(strip_date_suffix("Create_Accounts_2024.sql"), None);
        assert_eq!(strip_date_suffix("Create_Accounts_202401157.sql"), None);
    }

    #[test]
    fn test_suffix_must_precede_extension() {
        assert_eq!(strip_date_suffix("20240115_Create.sql"), None);
        assert_eq!(strip_date_suffix("Create_20240115_more.sql"), None);
    }

    #[test]
    fn test_plain_names_untouched() {
        assert_eq!(strip_date_suffix("Create_Accounts.sql"), None);
    }
}
