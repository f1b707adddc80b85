//! Database connection management.
//!
//! The pool is built once per process and handed to handlers by reference.
//! Schema setup runs here at startup, never inside a request.

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::info;

use crate::config::DatabaseSource;
use crate::secrets::get_database_credentials;
use crate::{Config, Error, Result};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id BIGSERIAL PRIMARY KEY,
    username VARCHAR(128) NOT NULL,
    email VARCHAR(128) NOT NULL,
    display_name VARCHAR(40) NOT NULL,
    is_host BOOLEAN NOT NULL DEFAULT FALSE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    CONSTRAINT username_unique UNIQUE (username),
    CONSTRAINT email_unique UNIQUE (email)
)
"#;

/// Create a database connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(3))
        .connect(database_url)
        .await
        .map_err(Error::Database)?;

    Ok(pool)
}

/// Create the tables this service needs if they do not exist yet.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(SCHEMA).execute(pool).await?;
    Ok(())
}

/// Resolve credentials, connect, and prepare the schema.
pub async fn connect(config: &Config) -> Result<PgPool> {
    let database_url = match &config.database {
        DatabaseSource::Url(url) => url.clone(),
        DatabaseSource::Secret {
            host,
            name,
            secret_arn,
        } => {
            let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
                .region(aws_config::Region::new(config.aws_region.clone()))
                .load()
                .await;
            let secrets_client = aws_sdk_secretsmanager::Client::new(&aws_config);

            get_database_credentials(&secrets_client, secret_arn)
                .await?
                .database_url(host, name)
        }
    };

    let pool = create_pool(&database_url).await?;
    ensure_schema(&pool).await?;
    info!("Database pool ready");

    Ok(pool)
}
