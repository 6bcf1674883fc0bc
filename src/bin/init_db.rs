//! Drops and recreates the `users` and `trips` tables.

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tripwise::init_tracing("init_db=info,tripwise=info");

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let db = PgPoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await
        .context("connect to database")?;

    tripwise::schema::recreate(&db).await?;
    tracing::info!("database re-initialized with `users` and `trips` tables");
    Ok(())
}
