//! Database schema setup.
//!
//! One table holds one record per module. Collection-valued fields
//! (variables, outputs, examples, tags) are stored as JSON text and must
//! round-trip losslessly. Name uniqueness is enforced here, by the unique
//! index, rather than by application-level check-then-insert.

use sqlx::SqlitePool;
use tracing::debug;

pub(crate) async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS modules (
            id              TEXT PRIMARY KEY,
            name            TEXT NOT NULL,
            provider        TEXT NOT NULL,
            resource_type   TEXT NOT NULL,
            version         TEXT NOT NULL,
            description     TEXT NOT NULL DEFAULT '',
            hcl_template    TEXT NOT NULL,
            variables       TEXT NOT NULL DEFAULT '[]',
            outputs         TEXT NOT NULL DEFAULT '[]',
            examples        TEXT NOT NULL DEFAULT '[]',
            tags            TEXT NOT NULL DEFAULT '[]',
            created_at      TEXT NOT NULL,
            download_count  INTEGER NOT NULL DEFAULT 0
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_modules_provider ON modules(provider)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_modules_resource_type ON modules(resource_type)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE UNIQUE INDEX IF NOT EXISTS idx_modules_name ON modules(name)")
        .execute(pool)
        .await?;

    debug!("Module schema initialized");
    Ok(())
}
