//! Accounts Lambda - Handles /account/users endpoints.
//!
//! Endpoints:
//! - GET /account/users/{username} - Get a user by username
//! - POST /account/users - Create a user

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use shared::http::{error_from, error_response, json_response, ApiResponse};
use shared::models::random_display_name;
use shared::{parse_body, Config, NewUser, PgUserStore, UserStore};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

const USERS_PATH: &str = "/account/users";

/// Extract the percent-decoded username from `/account/users/{username}`.
fn username_from_path(path: &str) -> Option<String> {
    let segment = path
        .strip_prefix(USERS_PATH)?
        .strip_prefix('/')
        .filter(|s| !s.is_empty() && !s.contains('/'))?;

    urlencoding::decode(segment).ok().map(|s| s.into_owned())
}

async fn handler<S: UserStore>(store: &S, event: Request) -> Result<Response<Body>, Error> {
    let method = event.method().as_str();
    let raw_path = event.uri().path();
    // Strip /api stage prefix if present (API Gateway REST API includes stage in path)
    let path = raw_path.strip_prefix("/api").unwrap_or(raw_path);

    info!("Accounts request: {} {}", method, path);

    match method {
        "GET" => {
            let Some(username) = username_from_path(path) else {
                return error_response(404, "Not found");
            };

            match store.find_by_username(&username).await {
                Ok(Some(user)) => json_response(200, &ApiResponse::success(user)),
                Ok(None) => error_response(404, "User not found"),
                Err(e) => error_from(&e),
            }
        }

        "POST" if path == USERS_PATH => {
            let request: NewUser = parse_body!(event.body());

            let user = match request.into_create(random_display_name) {
                Ok(user) => user,
                Err(e) => return error_from(&e),
            };

            match store.create(user).await {
                Ok(created) => json_response(201, &ApiResponse::success(created)),
                Err(e) => error_from(&e),
            }
        }

        _ => error_response(404, "Not found"),
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = Config::from_env()?;
    let pool = shared::db::connect(&config).await?;
    let store = Arc::new(PgUserStore::new(pool));

    run(service_fn(move |event| {
        let store = Arc::clone(&store);
        async move { handler(store.as_ref(), event).await }
    }))
    .await
}
