use anyhow::Context;
use sqlx::{Executor, PgPool};

const SCHEMA_SQL: &str = include_str!("../schema/schema.sql");

/// Drop and recreate the `users` and `trips` tables. All data is lost.
pub async fn recreate(db: &PgPool) -> anyhow::Result<()> {
    db.execute(SCHEMA_SQL).await.context("recreate schema")?;
    Ok(())
}
