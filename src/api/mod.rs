// API module entry
// The API subsystem dispatched by the sequencer's API guard. Requests that
// reach it bypass the auth gate and handler resolution entirely; everything
// it answers is a JSON envelope.

mod response;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

use crate::logger;

pub use response::{json_response, ApiEnvelope};

/// Dispatch the path segments after the API entry name
pub fn dispatch(segments: &[String], is_head: bool) -> Response<Full<Bytes>> {
    let operation = segments.first().map_or("", String::as_str);

    let (status, response) = match operation {
        "ping" => (
            StatusCode::OK,
            json_response(
                StatusCode::OK,
                &ApiEnvelope::ok(serde_json::json!({ "pong": true })),
                is_head,
            ),
        ),
        "version" => (
            StatusCode::OK,
            json_response(
                StatusCode::OK,
                &ApiEnvelope::ok(serde_json::json!({ "version": env!("CARGO_PKG_VERSION") })),
                is_head,
            ),
        ),
        "get" => {
            let resource = segments.get(1..).unwrap_or_default().join("/");
            (
                StatusCode::OK,
                json_response(
                    StatusCode::OK,
                    &ApiEnvelope::ok(serde_json::json!({ "resource": resource })),
                    is_head,
                ),
            )
        }
        _ => (
            StatusCode::NOT_FOUND,
            json_response(
                StatusCode::NOT_FOUND,
                &ApiEnvelope::error(404, &format!("unknown operation \"{operation}\"")),
                is_head,
            ),
        ),
    };

    logger::log_api_request("GET", &segments.join("/"), status.as_u16());
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segments(path: &str) -> Vec<String> {
        path.split('/').map(ToString::to_string).collect()
    }

    #[test]
    fn test_ping() {
        let response = dispatch(&segments("ping"), false);
        assert_eq!(response.status(), 200);
        assert_eq!(
            response.headers().get("Content-Type").unwrap(),
            "application/json"
        );
    }

    #[test]
    fn test_get_echoes_resource_path() {
        let response = dispatch(&segments("get/file/ab12"), false);
        assert_eq!(response.status(), 200);
    }

    #[test]
    fn test_unknown_operation_is_json_404() {
        let response = dispatch(&segments("frobnicate"), false);
        assert_eq!(response.status(), 404);
        assert_eq!(
            response.headers().get("Content-Type").unwrap(),
            "application/json"
        );
    }

    #[test]
    fn test_empty_operation_is_json_404() {
        let response = dispatch(&[], false);
        assert_eq!(response.status(), 404);
    }
}
