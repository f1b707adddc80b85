//! Configuration management for Lambda functions.

use std::env;

use crate::{Error, Result};

/// Where database credentials come from.
#[derive(Debug, Clone, PartialEq)]
pub enum DatabaseSource {
    /// A complete DSN, e.g. for local development
    Url(String),
    /// Host and database name, with credentials held in Secrets Manager
    Secret {
        host: String,
        name: String,
        secret_arn: String,
    },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Database connection source
    pub database: DatabaseSource,
    /// AWS region
    pub aws_region: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| Error::Config(format!("{} not set", key)))
        };

        let database = match lookup("DATABASE_URL").filter(|v| !v.is_empty()) {
            Some(url) => DatabaseSource::Url(url),
            None => DatabaseSource::Secret {
                host: required("DATABASE_HOST")?,
                name: lookup("DATABASE_NAME").unwrap_or_else(|| "cohi".to_string()),
                secret_arn: required("DATABASE_URL_SECRET_ARN")?,
            },
        };

        Ok(Self {
            database,
            aws_region: lookup("AWS_REGION").unwrap_or_else(|| "us-east-1".to_string()),
        })
    }
}
