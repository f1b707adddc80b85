//! Calendar Lambda - Handles /calendar endpoint.
//!
//! Endpoints:
//! - GET /calendar/{year}/{month} - Sunday-first day grid for a month

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use serde::Serialize;
use shared::calendar::{last_day_of_month, month_grid, start_weekday, sunday_first_padding};
use shared::http::{error_from, error_response, json_response, ApiResponse};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Month grid response
#[derive(Debug, Serialize)]
struct MonthGridResponse {
    year: i32,
    month: u32,
    /// Weekday of the 1st, Monday = 0
    start_weekday: u32,
    /// Leading empty cells in a Sunday-first grid
    padding: u32,
    last_day: u32,
    days: Vec<u32>,
}

impl MonthGridResponse {
    fn build(year: i32, month: u32) -> shared::Result<Self> {
        let start_weekday = start_weekday(year, month)?;
        Ok(Self {
            year,
            month,
            start_weekday,
            padding: sunday_first_padding(start_weekday),
            last_day: last_day_of_month(year, month)?,
            days: month_grid(year, month)?,
        })
    }
}

/// Parse `/calendar/{year}/{month}`. `None` means the path is not a calendar
/// route; `Some(Err(_))` means it is, but the segments are not integers.
fn parse_path(path: &str) -> Option<Result<(i32, u32), String>> {
    let rest = path.strip_prefix("/calendar/")?;
    let (year, month) = rest.split_once('/')?;
    if month.contains('/') {
        return None;
    }

    Some(match (year.parse::<i32>(), month.parse::<u32>()) {
        (Ok(year), Ok(month)) => Ok((year, month)),
        _ => Err(format!("Invalid year or month: {}/{}", year, month)),
    })
}

async fn handler(event: Request) -> Result<Response<Body>, Error> {
    let method = event.method().as_str();
    let raw_path = event.uri().path();
    let path = raw_path.strip_prefix("/api").unwrap_or(raw_path);

    info!("Calendar request: {} {}", method, path);

    if method != "GET" {
        return error_response(404, "Not found");
    }

    match parse_path(path) {
        Some(Ok((year, month))) => match MonthGridResponse::build(year, month) {
            Ok(grid) => json_response(200, &ApiResponse::success(grid)),
            Err(e) => error_from(&e),
        },
        Some(Err(message)) => error_response(400, message),
        None => error_response(404, "Not found"),
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    run(service_fn(handler)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get(uri: &str) -> Request {
        lambda_http::http::Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::Empty)
            .unwrap()
    }

    fn body_json(response: &Response<Body>) -> serde_json::Value {
        serde_json::from_slice(response.body().as_ref()).unwrap()
    }

    #[test]
    fn test_parse_path() {
        assert_eq!(parse_path("/calendar/2024/3"), Some(Ok((2024, 3))));
        assert_eq!(parse_path("/calendar/-44/3"), Some(Ok((-44, 3))));
        assert!(matches!(parse_path("/calendar/x/1"), Some(Err(_))));
        assert_eq!(parse_path("/calendar/2024"), None);
        assert_eq!(parse_path("/calendar/2024/3/1"), None);
        assert_eq!(parse_path("/reminders"), None);
    }

    #[tokio::test]
    async fn test_month_grid_endpoint() {
        let response = handler(get("/calendar/2024/3")).await.unwrap();
        assert_eq!(response.status(), 200);

        let json = body_json(&response);
        let data = &json["data"];
        assert_eq!(data["year"], 2024);
        assert_eq!(data["month"], 3);
        assert_eq!(data["start_weekday"], 4);
        assert_eq!(data["padding"], 5);
        assert_eq!(data["last_day"], 31);
        assert_eq!(data["days"], serde_json::json!(month_grid(2024, 3).unwrap()));
    }

    #[tokio::test]
    async fn test_month_grid_endpoint_with_stage_prefix() {
        let response = handler(get("/api/calendar/2024/12")).await.unwrap();
        assert_eq!(response.status(), 200);
        let json = body_json(&response);
        assert_eq!(json["data"]["padding"], 0);
        assert_eq!(json["data"]["days"][0], 1);
    }

    #[tokio::test]
    async fn test_invalid_dates_are_bad_requests() {
        for uri in ["/calendar/2024/13", "/calendar/2024/0", "/calendar/x/1"] {
            let response = handler(get(uri)).await.unwrap();
            assert_eq!(response.status(), 400, "{uri}");
            assert_eq!(body_json(&response)["success"], false);
        }
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let response = handler(get("/calendar")).await.unwrap();
        assert_eq!(response.status(), 404);
    }
}
