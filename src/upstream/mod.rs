//! HTTP client for the backend management API.
//!
//! Every call carries the static admin token header and the admin `tg_id`
//! query parameter. Statuses >= 400 are surfaced as [`UpstreamError::Status`]
//! so callers can choose between degrading to an empty value (pages) and
//! mirroring the failure back to the browser (mutations).

use std::time::Duration;

use reqwest::{Method, StatusCode, Url};
use serde_json::{Map, Value};

use crate::config::AppConfig;

/// Header carrying the admin token.
pub const ADMIN_TOKEN_HEADER: &str = "X-Token";

/// Query parameter carrying the admin identifier.
pub const ADMIN_ID_PARAM: &str = "tg_id";

/// Percent-encode `segment` as exactly one URL path segment, so `/`, `?`,
/// `#` and `%` inside an identifier cannot change the target resource.
///
/// Returns `None` for identifiers a URL path cannot carry: empty, `.`, `..`
/// or containing control characters.
pub fn encode_segment(segment: &str) -> Option<String> {
    if matches!(segment, "" | "." | "..") || segment.chars().any(|c| c.is_ascii_control()) {
        return None;
    }
    let mut url = Url::parse("http://upstream.invalid/").ok()?;
    url.path_segments_mut().ok()?.clear().push(segment);
    url.path().strip_prefix('/').map(str::to_string)
}

/// Failure of a single upstream call.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("upstream responded with {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream returned malformed JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// A successful (status < 400) upstream reply.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub body: String,
}

impl UpstreamResponse {
    /// Parse the body as JSON. An empty body is `null`.
    pub fn json(&self) -> Result<Value, UpstreamError> {
        if self.body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Shared upstream client. Cloning is cheap and reuses the connection pool.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: String,
    admin_id: String,
    admin_token: String,
}

impl UpstreamClient {
    pub fn new(config: &AppConfig) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.upstream_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_base_url.clone(),
            admin_id: config.admin_tg_id.clone(),
            admin_token: config.admin_token.clone(),
        })
    }

    /// Full URL for a resource path such as `/users/`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Admin `tg_id` followed by the caller's parameters. A caller-supplied
    /// `tg_id` replaces the admin one.
    fn query_params<'a>(&'a self, extra: &'a [(&'a str, String)]) -> Vec<(&'a str, &'a str)> {
        let mut params = Vec::with_capacity(extra.len() + 1);
        if !extra.iter().any(|(key, _)| *key == ADMIN_ID_PARAM) {
            params.push((ADMIN_ID_PARAM, self.admin_id.as_str()));
        }
        params.extend(extra.iter().map(|(key, value)| (*key, value.as_str())));
        params
    }

    /// Perform one upstream call.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<UpstreamResponse, UpstreamError> {
        let mut request = self
            .http
            .request(method.clone(), self.url(path))
            .header(ADMIN_TOKEN_HEADER, &self.admin_token)
            .query(&self.query_params(query));

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        tracing::debug!(method = %method, path, status = status.as_u16(), "Upstream call");

        if status.is_client_error() || status.is_server_error() {
            return Err(UpstreamError::Status { status, body });
        }

        Ok(UpstreamResponse { status, body })
    }

    /// GET a path and parse the JSON reply.
    pub async fn get_json(&self, path: &str) -> Result<Value, UpstreamError> {
        self.send(Method::GET, path, &[], None).await?.json()
    }

    /// GET a collection. Any failure is logged and yields an empty list.
    pub async fn fetch_list(&self, path: &str, resource: &str) -> Vec<Value> {
        match self.get_json(path).await {
            Ok(Value::Array(items)) => items,
            Ok(Value::Null) => Vec::new(),
            Ok(_) => {
                tracing::warn!(resource, path, "Upstream returned a non-array collection");
                Vec::new()
            }
            Err(e) => {
                tracing::error!(resource, path, error = %e, "Upstream fetch failed");
                Vec::new()
            }
        }
    }

    /// GET a single record. Any failure is logged and yields `None`.
    pub async fn fetch_record(&self, path: &str, resource: &str) -> Option<Map<String, Value>> {
        match self.get_json(path).await {
            Ok(Value::Object(record)) => Some(record),
            Ok(_) => {
                tracing::warn!(resource, path, "Upstream returned a non-object record");
                None
            }
            Err(e) => {
                tracing::error!(resource, path, error = %e, "Upstream fetch failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> UpstreamClient {
        let config = AppConfig::from_lookup(|key| match key {
            "API_BASE_URL" => Some("http://upstream.test/api/".to_string()),
            "ADMIN_TG_ID" => Some("777".to_string()),
            _ => None,
        });
        UpstreamClient::new(&config).unwrap()
    }

    #[test]
    fn url_joins_base_and_path() {
        assert_eq!(client().url("/users/"), "http://upstream.test/api/users/");
    }

    #[test]
    fn admin_id_added_to_query() {
        let client = client();
        let extra = [("referrer_tg_id", "5".to_string())];
        let params = client.query_params(&extra);
        assert_eq!(params, vec![("tg_id", "777"), ("referrer_tg_id", "5")]);
    }

    #[test]
    fn caller_tg_id_replaces_admin_id() {
        let client = client();
        let extra = [("tg_id", "9".to_string())];
        let params = client.query_params(&extra);
        assert_eq!(params, vec![("tg_id", "9")]);
    }

    #[test]
    fn segment_encoding_keeps_identifier_in_one_segment() {
        assert_eq!(encode_segment("SPRING").as_deref(), Some("SPRING"));
        assert_eq!(encode_segment("de/1").as_deref(), Some("de%2F1"));
        assert_eq!(encode_segment("A?x=1").as_deref(), Some("A%3Fx=1"));
        assert_eq!(encode_segment("A#B").as_deref(), Some("A%23B"));
        assert_eq!(encode_segment("50%off").as_deref(), Some("50%25off"));
        assert_eq!(encode_segment("../users/5").as_deref(), Some("..%2Fusers%2F5"));
        assert_eq!(encode_segment("a b").as_deref(), Some("a%20b"));
        assert_eq!(encode_segment("user@vpn.test").as_deref(), Some("user@vpn.test"));
    }

    #[test]
    fn dot_and_empty_segments_rejected() {
        assert_eq!(encode_segment(""), None);
        assert_eq!(encode_segment("."), None);
        assert_eq!(encode_segment(".."), None);
        assert_eq!(encode_segment(".\t."), None);
        assert_eq!(encode_segment("..."), Some("...".to_string()));
    }

    #[test]
    fn empty_body_parses_as_null() {
        let response = UpstreamResponse {
            status: StatusCode::NO_CONTENT,
            body: String::new(),
        };
        assert_eq!(response.json().unwrap(), Value::Null);
    }

    #[test]
    fn malformed_body_is_decode_error() {
        let response = UpstreamResponse {
            status: StatusCode::OK,
            body: "<html>".to_string(),
        };
        let err = response.json().unwrap_err();
        assert!(matches!(err, UpstreamError::Decode(_)));
    }

    #[test]
    fn status_error_display() {
        let err = UpstreamError::Status {
            status: StatusCode::NOT_FOUND,
            body: "missing".to_string(),
        };
        assert_eq!(err.to_string(), "upstream responded with 404 Not Found: missing");
    }
}
