use anyhow::Result;

use crate::config::Config;
use crate::db;

/// Create the line-import schema. Idempotent — safe to run repeatedly.
pub async fn run_migrations(config: &Config) -> Result<()> {
    let pool = db::connect(config).await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS file_text_import (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            insert_date TEXT NOT NULL DEFAULT (datetime('now')),
            file_name TEXT NOT NULL,
            line_number INTEGER NOT NULL,
            line_text TEXT NOT NULL,
            file_directory TEXT NOT NULL
        )
        "#,
    )
    .execute(&pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_file_text_import_file_name \
         ON file_text_import(file_name)",
    )
    .execute(&pool)
    .await?;

    pool.close().await;
    Ok(())
}
