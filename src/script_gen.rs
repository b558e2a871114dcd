//! SQLCMD runner-script generation: `sift script`.
//!
//! Emits a SQLCMD batch that executes every discovered file, grouped per
//! corpus root with a `:setvar Path` block. The generated script addresses
//! files by bare name relative to `$(Path)`, matching how the deployment
//! runbooks consume it.

use std::path::Path;

use anyhow::Result;

use crate::config::Config;
use crate::discover::{build_globset, discover_root};

pub fn run_script(config: &Config, output: Option<&Path>) -> Result<()> {
    let script = generate_script(config)?;

    match output {
        Some(path) => {
            std::fs::write(path, &script)?;
            println!("Script written to {}", path.display());
        }
        None => print!("{}", script),
    }
    Ok(())
}

pub fn generate_script(config: &Config) -> Result<String> {
    let include = build_globset(&config.corpus.include_globs)?;
    let exclude = build_globset(&config.corpus.exclude_globs)?;

    let mut script = String::from("SET NOCOUNT ON;\nGO\nPRINT @@SERVERNAME;\nGO\n\n");

    for root in &config.corpus.roots {
        script.push_str(&format!(":setvar Path \"{}\"\n\n", root.display()));

        let folder = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        for file in discover_root(root, &include, &exclude, config.corpus.follow_symlinks)? {
            let name = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            script.push_str(&format!("PRINT('Executing {}/{}')\n", folder, name));
            script.push_str(&format!(":setvar SQLFile \"{}\"\n", name));
            script.push_str(":r $(Path)$(SQLFile)\nGO\n\n");
        }
    }

    Ok(script)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CorpusConfig, EncodingsConfig, ReportConfig};
    use std::fs;
    use tempfile::TempDir;

    fn config_for(root: &Path) -> Config {
        Config {
            corpus: CorpusConfig {
                roots: vec![root.to_path_buf()],
                include_globs: vec!["**/*.sql".to_string()],
                exclude_globs: vec![],
                follow_symlinks: false,
            },
            encodings: EncodingsConfig::default(),
            report: ReportConfig {
                output_dir: root.join("reports"),
            },
            headers: None,
            sleuth: None,
            db: None,
        }
    }

    #[test]
    fn test_script_has_preamble_and_per_file_blocks() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("deploy");
        fs::create_dir(&root).unwrap();
        fs::write(root.join("001_schema.sql"), "").unwrap();
        fs::write(root.join("002_data.sql"), "").unwrap();

        let script = generate_script(&config_for(&root)).unwrap();

        assert!(script.starts_with("SET NOCOUNT ON;\nGO\n"));
        assert!(script.contains(&format!(":setvar Path \"{}\"", root.display())));
        assert!(script.contains("PRINT('Executing deploy/001_schema.sql')"));
        assert!(script.contains(":setvar SQLFile \"002_data.sql\""));
        // Files appear in sorted order.
        let first = script.find("001_schema.sql").unwrap();
        let second = script.find("002_data.sql").unwrap();
        assert!(first < second);
    }
}
