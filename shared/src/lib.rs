//! Shared library for Cohi Lambda functions.
//!
//! This crate provides the calendar grid utilities, account persistence, and the
//! configuration, database, and HTTP plumbing used by every Lambda function.

pub mod calendar;
pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod models;
pub mod secrets;
pub mod users;

pub use calendar::{last_day_of_month, month_grid, start_weekday, sunday_first_padding, CalendarError};
pub use config::{Config, DatabaseSource};
pub use error::{Error, Result};
pub use http::ApiResponse;
pub use models::{random_display_name, CreateUser, NewUser, User};
pub use secrets::{get_secret, get_database_credentials, DatabaseCredentials};
pub use users::{PgUserStore, UserStore};
