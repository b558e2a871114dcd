//! Schema-object declaration extraction.
//!
//! Scans SQL text line by line for object-creation statements and pulls out
//! the bracketed qualified name. This is a best-effort scanner for the
//! generated, consistently formatted scripts the corpus contains — not a SQL
//! parser. Matching is a case-sensitive substring test against each line, so
//! a comment or string literal containing `CREATE TABLE` will be cataloged
//! too; well-formed generated scripts do not hit that case.

use std::sync::OnceLock;

use regex::Regex;

/// Creation-statement prefixes the scanner recognizes. A line containing any
/// of these as a substring is treated as a declaration. Order carries no
/// priority — each line is tested against the full vocabulary.
pub const VOCABULARY: &[&str] = &[
    "CREATE TYPE",
    "CREATE TABLE",
    "CREATE VIEW",
    "CREATE FUNCTION",
    "CREATE SYNONYM",
    "CREATE PROCEDURE",
    "CREATE SEQUENCE",
    "CREATE TRIGGER",
    "CREATE CONSTRAINT",
    "CREATE CLUSTERED INDEX",
    "CREATE INDEX",
    "CREATE NONCLUSTERED INDEX",
    "CREATE UNIQUE CLUSTERED",
    "CREATE UNIQUE NONCLUSTERED",
];

/// One recognized declaration, before the owning file is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectDecl {
    /// Second whitespace-delimited token of the line, lower-cased
    /// (`CREATE TABLE [dbo].[Foo]` yields `table`).
    pub object_type: String,
    /// Bracketed name segments, lower-cased and dot-joined
    /// (`[dbo].[Foo]` yields `dbo.foo`).
    pub qualified_name: String,
}

/// A catalog record: one declaration in one source file. Uniqueness is
/// scoped to the full triple — the same object declared in two files is two
/// legitimate entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CatalogEntry {
    pub object_type: String,
    pub qualified_name: String,
    /// Base file name with the extension stripped.
    pub source_file: String,
}

/// `[first]` optionally followed by `.[second]`.
fn name_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\[(.*?)\](?:\.\[(.*?)\])?").expect("bracket name pattern is valid")
    })
}

/// Extract every recognized declaration from `text`, in line order.
///
/// Deterministic for a fixed input. No deduplication happens here; lines
/// without a bracketed name (or with fewer than two tokens) are skipped
/// silently rather than surfaced as errors.
pub fn extract(text: &str) -> Vec<ObjectDecl> {
    let mut decls = Vec::new();

    for line in text.lines() {
        if !VOCABULARY.iter().any(|kw| line.contains(kw)) {
            continue;
        }

        let Some(caps) = name_pattern().captures(line) else {
            continue;
        };
        let Some(object_type) = line.split_whitespace().nth(1) else {
            continue;
        };

        let qualified_name = [caps.get(1), caps.get(2)]
            .into_iter()
            .flatten()
            .map(|m| m.as_str())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_lowercase())
            .collect::<Vec<_>>()
            .join(".");

        decls.push(ObjectDecl {
            object_type: object_type.to_lowercase(),
            qualified_name,
        });
    }

    decls
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_table_two_segments() {
        let decls = extract("CREATE TABLE [dbo].[Accounts] (\n    id INT\n);\n");
        assert_eq!(
            decls,
            vec![ObjectDecl {
                object_type: "table".to_string(),
                qualified_name: "dbo.accounts".to_string(),
            }]
        );
    }

    #[test]
    fn test_create_procedure() {
        let decls = extract("CREATE PROCEDURE [dbo].[DoThing]\nAS\nBEGIN\nEND\n");
        assert_eq!(decls[0].object_type, "procedure");
        assert_eq!(decls[0].qualified_name, "dbo.dothing");
    }

    #[test]
    fn test_single_segment_name() {
        let decls = extract("CREATE SEQUENCE [OrderSeq] START WITH 1;\n");
        assert_eq!(decls[0].qualified_name, "orderseq");
        assert_eq!(decls[0].object_type, "sequence");
    }

    #[test]
    fn test_alter_is_not_a_declaration() {
        assert!(extract("ALTER TABLE [dbo].[Accounts] ADD x INT;\n").is_empty());
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        // The counting paths elsewhere are case-insensitive; this one is
        // deliberately not.
        assert!(extract("create table [dbo].[accounts] (id INT);\n").is_empty());
    }

    #[test]
    fn test_missing_brackets_skips_line() {
        assert!(extract("CREATE TABLE dbo.Accounts (id INT);\n").is_empty());
    }

    #[test]
    fn test_unique_nonclustered_index() {
        let decls =
            extract("CREATE UNIQUE NONCLUSTERED INDEX [IX_Acct] ON [dbo].[Accounts] (id);\n");
        assert_eq!(decls.len(), 1);
        // Object type is positional: second token of the line.
        assert_eq!(decls[0].object_type, "unique");
        assert_eq!(decls[0].qualified_name, "ix_acct");
    }

    #[test]
    fn test_multiple_declarations_in_order() {
        let text = "CREATE TABLE [dbo].[A] (id INT);\nGO\nCREATE VIEW [dbo].[B] AS SELECT 1;\n";
        let decls = extract(text);
        assert_eq!(decls.len(), 2);
        assert_eq!(decls[0].qualified_name, "dbo.a");
        assert_eq!(decls[1].qualified_name, "dbo.b");
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let text = "CREATE TABLE [dbo].[A] (id INT);\nCREATE TABLE [dbo].[A] (id INT);\n";
        let first = extract(text);
        let second = extract(text);
        assert_eq!(first, second);
        // Within-file repeats are preserved; dedup is the runner's job.
        assert_eq!(first.len(), 2);
    }
}
