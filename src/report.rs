//! Timestamped report artifacts.
//!
//! Every extraction/analysis run writes a single artifact named
//! `<prefix>_<YYYYmmdd_HHMMSS>.<ext>` under the configured output
//! directory. Record fields are joined with plain commas and no escaping,
//! matching the downstream tooling that consumes these files.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Build `<dir>/<prefix>_<timestamp>.<ext>` using local time.
pub fn timestamped_path(dir: &Path, prefix: &str, ext: &str) -> PathBuf {
    let ts = chrono::Local::now().format("%Y%m%d_%H%M%S");
    dir.join(format!("{}_{}.{}", prefix, ts, ext))
}

/// Write `lines` (one record each, no terminators) to `path` as UTF-8,
/// creating the output directory if needed.
pub fn write_lines(path: &Path, lines: &[String]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let mut content = lines.join("\n");
    if !content.is_empty() {
        content.push('\n');
    }
    std::fs::write(path, content)
        .with_context(|| format!("failed to write report {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_timestamped_name_shape() {
        let path = timestamped_path(Path::new("/reports"), "object_checks", "txt");
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("object_checks_"));
        assert!(name.ends_with(".txt"));
        // prefix + _YYYYmmdd_HHMMSS + .txt
        assert_eq!(name.len(), "object_checks_".len() + 15 + 4);
    }

    #[test]
    fn test_write_creates_parent_and_terminates_lines() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out/report.txt");
        write_lines(&path, &["a,b,c".to_string(), "d,e,f".to_string()]).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a,b,c\nd,e,f\n");
    }
}
