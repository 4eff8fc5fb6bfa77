// API response utility functions module

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;

use crate::logger;

/// Result envelope every API answer is wrapped in
#[derive(Debug, Serialize)]
pub struct ApiEnvelope {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<ErrorDetail>,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: u16,
    pub message: String,
}

impl ApiEnvelope {
    pub fn ok(data: serde_json::Value) -> Self {
        Self {
            status: "ok",
            data: Some(data),
            error_detail: None,
        }
    }

    pub fn error(code: u16, message: &str) -> Self {
        Self {
            status: "error",
            data: None,
            error_detail: Some(ErrorDetail {
                code,
                message: message.to_string(),
            }),
        }
    }
}

/// Build JSON response
pub fn json_response<T: Serialize>(
    status: StatusCode,
    body: &T,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let json = match serde_json::to_string_pretty(body) {
        Ok(j) => j,
        Err(e) => {
            logger::log_error(&format!("Failed to serialize API response: {e}"));
            return Response::builder()
                .status(StatusCode::INTERNAL_SERVER_ERROR)
                .header("Content-Type", "application/json")
                .body(Full::new(Bytes::from(
                    r#"{"status":"error","error_detail":{"code":500,"message":"serialization failed"}}"#,
                )))
                .unwrap_or_else(|_| Response::new(Full::new(Bytes::from("Error"))));
        }
    };

    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(json)
    };

    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            logger::log_error(&format!("Failed to build API response: {e}"));
            Response::new(Full::new(Bytes::from("Error")))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_envelope_shape() {
        let envelope = ApiEnvelope::ok(serde_json::json!({ "pong": true }));
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["data"]["pong"], true);
        assert!(json.get("error_detail").is_none());
    }

    #[test]
    fn test_error_envelope_shape() {
        let envelope = ApiEnvelope::error(404, "unknown operation");
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["error_detail"]["code"], 404);
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_head_strips_body() {
        let response = json_response(StatusCode::OK, &ApiEnvelope::ok(serde_json::json!({})), true);
        assert_eq!(response.status(), 200);
    }
}
