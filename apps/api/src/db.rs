use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
        .context("failed to connect to PostgreSQL")?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Table definitions, applied in order. Every statement is idempotent.
const SCHEMA: &[(&str, &str)] = &[
    (
        "profile",
        r#"
        CREATE TABLE IF NOT EXISTS profile (
            id SERIAL PRIMARY KEY,
            singleton BOOLEAN NOT NULL DEFAULT TRUE UNIQUE CHECK (singleton),
            name TEXT NOT NULL,
            headline TEXT NOT NULL,
            about TEXT NOT NULL,
            location TEXT NOT NULL,
            social_links JSONB NOT NULL DEFAULT '{}'::jsonb
        )
        "#,
    ),
    (
        "experiences",
        r#"
        CREATE TABLE IF NOT EXISTS experiences (
            id SERIAL PRIMARY KEY,
            title TEXT NOT NULL,
            company TEXT NOT NULL,
            duration TEXT NOT NULL,
            location TEXT NOT NULL,
            description TEXT NOT NULL,
            skills TEXT[] NOT NULL DEFAULT '{}'
        )
        "#,
    ),
    (
        "education",
        r#"
        CREATE TABLE IF NOT EXISTS education (
            id SERIAL PRIMARY KEY,
            school TEXT NOT NULL,
            degree TEXT NOT NULL,
            duration TEXT NOT NULL,
            description TEXT NOT NULL
        )
        "#,
    ),
    (
        "skills",
        r#"
        CREATE TABLE IF NOT EXISTS skills (
            id SERIAL PRIMARY KEY,
            category TEXT NOT NULL,
            items TEXT[] NOT NULL DEFAULT '{}'
        )
        "#,
    ),
    (
        "projects",
        r#"
        CREATE TABLE IF NOT EXISTS projects (
            id SERIAL PRIMARY KEY,
            title TEXT NOT NULL,
            description TEXT NOT NULL,
            tech_stack TEXT[] NOT NULL DEFAULT '{}',
            github_link TEXT,
            link TEXT
        )
        "#,
    ),
];

/// Creates the portfolio tables if they do not exist yet.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    for (table, ddl) in SCHEMA {
        sqlx::query(ddl)
            .execute(pool)
            .await
            .with_context(|| format!("failed to create {table} table"))?;
    }

    info!("database migrations complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_covers_every_entity_table() {
        let tables: Vec<&str> = SCHEMA.iter().map(|(t, _)| *t).collect();
        assert_eq!(
            tables,
            vec!["profile", "experiences", "education", "skills", "projects"]
        );
        for (table, ddl) in SCHEMA {
            assert!(
                ddl.contains(&format!("CREATE TABLE IF NOT EXISTS {table} (")),
                "DDL for {table} must be idempotent"
            );
        }
    }

    #[test]
    fn profile_table_enforces_single_row() {
        let (_, ddl) = SCHEMA[0];
        assert!(ddl.contains("singleton BOOLEAN NOT NULL DEFAULT TRUE UNIQUE CHECK (singleton)"));
    }

    // Integration tests require a real database
    // Run with: DATABASE_URL=postgres://... cargo test -- --ignored

    #[tokio::test]
    #[ignore = "requires database"]
    async fn migrations_are_idempotent() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url, 2).await.expect("pool creation failed");

        run_migrations(&pool).await.expect("first run failed");
        run_migrations(&pool).await.expect("second run failed");
    }
}
