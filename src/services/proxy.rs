//! Forwarding of create/update/delete requests to the upstream API.

use axum::{http::StatusCode, Json};
use reqwest::Method;
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::upstream::{self, UpstreamClient};

/// Response of a forwarded mutation: upstream status and JSON body.
pub type ProxyResult = Result<(StatusCode, Json<Value>), AppError>;

/// Body used when the upstream succeeds without a JSON payload.
fn empty_success(method: &Method) -> Value {
    if *method == Method::DELETE {
        json!({ "status": "deleted" })
    } else {
        json!({ "status": "ok" })
    }
}

/// `{prefix}/{id}` with `id` encoded as a single path segment. Identifiers a
/// URL path cannot carry are rejected with 400.
pub fn item_path(prefix: &str, id: &str) -> Result<String, AppError> {
    let segment = upstream::encode_segment(id)
        .ok_or_else(|| AppError::Validation(format!("Invalid identifier: {id:?}")))?;
    Ok(format!("{prefix}/{segment}"))
}

/// Send one mutation upstream and mirror the outcome.
///
/// Upstream error statuses become [`AppError::Upstream`] with the same code;
/// transport failures become [`AppError::Unavailable`] (500).
pub async fn forward(
    client: &UpstreamClient,
    method: Method,
    path: &str,
    query: &[(&str, String)],
    body: Option<&Value>,
) -> ProxyResult {
    let response = client.send(method.clone(), path, query, body).await?;

    let payload = match response.json() {
        Ok(Value::Null) => None,
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(path, error = %e, "Upstream success body is not JSON");
            None
        }
    };

    match payload {
        Some(value) => Ok((response.status, Json(value))),
        // 204 cannot carry the synthesized body.
        None if response.status == StatusCode::NO_CONTENT => {
            Ok((StatusCode::OK, Json(empty_success(&method))))
        }
        None => Ok((response.status, Json(empty_success(&method)))),
    }
}
