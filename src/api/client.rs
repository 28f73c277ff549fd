use crate::core::config::ApiConfig;
use crate::core::helpers::preview;
use crate::core::prelude::*;
use crate::session::SessionContext;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

pub(crate) const LOGIN_PATH: &str = "auth/login";

/// HTTP client for the document store.
///
/// Every request carries the session's bearer token. A 401/403 answer
/// clears the session before the error is returned, except on login where
/// it only means the submitted credentials were wrong. There is no retry.
#[derive(Debug, Clone)]
pub struct StoreClient {
    http: reqwest::Client,
    base_url: String,
    upload_chunk: usize,
    session: Arc<SessionContext>,
}

impl StoreClient {
    pub fn new(config: &ApiConfig, session: Arc<SessionContext>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::Config(format!("HTTP client setup failed: {}", e)))?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            upload_chunk: config.upload_chunk_kib.max(1) * 1024,
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<SessionContext> {
        &self.session
    }

    pub(crate) fn upload_chunk(&self) -> usize {
        self.upload_chunk
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match self.session.bearer() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub async fn get(&self, path: &str) -> Result<Value> {
        self.send(Method::GET, path, self.request(Method::GET, path))
            .await
    }

    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value> {
        let builder = self.request(Method::POST, path).json(body);
        self.send(Method::POST, path, builder).await
    }

    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value> {
        let builder = self.request(Method::PUT, path).json(body);
        self.send(Method::PUT, path, builder).await
    }

    pub async fn delete(&self, path: &str) -> Result<Value> {
        self.send(Method::DELETE, path, self.request(Method::DELETE, path))
            .await
    }

    pub(crate) async fn send(
        &self,
        method: Method,
        path: &str,
        builder: RequestBuilder,
    ) -> Result<Value> {
        log::debug!("{} {}", method, path);

        let response = builder.send().await.map_err(|e| {
            log::warn!("{} {} failed: {}", method, path, e);
            AppError::from(e)
        })?;
        let status = response.status();
        let text = response.text().await?;
        let body = parse_body(&text, status)?;

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            log::warn!("{} {} rejected credential (HTTP {})", method, path, status.as_u16());
            let reason = error_message(&body).unwrap_or_else(|| status.to_string());
            // Rejected credentials on login say nothing about the current token.
            if path == LOGIN_PATH {
                return Err(AppError::Auth(reason));
            }
            let message = if self.session.bearer().is_some() {
                crate::t!("auth.session_expired", &reason)
            } else {
                reason
            };
            self.session.clear();
            return Err(AppError::Auth(message));
        }

        if !status.is_success() {
            let message = error_message(&body).unwrap_or_else(|| status.to_string());
            log::warn!("{} {} -> HTTP {}: {}", method, path, status.as_u16(), message);
            return Err(AppError::remote(Some(status.as_u16()), message));
        }

        unwrap_payload(body).map_err(|e| {
            log::warn!("{} {} reported failure: {}", method, path, e.reason());
            e
        })
    }
}

/// Empty bodies become `null`; a non-JSON error body is kept as a string.
fn parse_body(text: &str, status: StatusCode) -> Result<Value> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    match serde_json::from_str(text) {
        Ok(value) => Ok(value),
        Err(_) if !status.is_success() => Ok(Value::String(preview(text.trim(), 200))),
        Err(e) => Err(AppError::Decode(format!("response body: {}", e))),
    }
}

fn error_message(body: &Value) -> Option<String> {
    match body {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Object(map) => map
            .get("error")
            .or_else(|| map.get("message"))
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}

/// Unwraps the store's `{success, data}` envelope.
///
/// `success:false` is a remote error; a `data` key yields its value; any
/// other body is returned as is (e.g. `{success:true, token}`).
pub fn unwrap_payload(body: Value) -> Result<Value> {
    match body {
        Value::Object(mut map) => {
            if map.get("success").and_then(Value::as_bool) == Some(false) {
                let message = error_message(&Value::Object(map))
                    .unwrap_or_else(|| "Request failed".to_string());
                return Err(AppError::remote(None, message));
            }
            match map.remove("data") {
                Some(data) => Ok(data),
                None => Ok(Value::Object(map)),
            }
        }
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_data_is_unwrapped() {
        let data = unwrap_payload(json!({"success": true, "data": [1, 2]})).expect("ok");
        assert_eq!(data, json!([1, 2]));
    }

    #[test]
    fn envelope_without_data_is_kept() {
        let body = unwrap_payload(json!({"success": true, "token": "t"})).expect("ok");
        assert_eq!(body["token"], "t");
    }

    #[test]
    fn success_false_is_a_remote_error() {
        let err = unwrap_payload(json!({"success": false, "error": "Not found"}))
            .expect_err("remote error");
        assert!(matches!(err, AppError::Remote { status: None, .. }));
        assert_eq!(err.reason(), "Not found");

        let err = unwrap_payload(json!({"success": false})).expect_err("remote error");
        assert_eq!(err.reason(), "Request failed");
    }

    #[test]
    fn error_bodies_may_be_plain_text() {
        let body = parse_body("Bad Gateway", StatusCode::BAD_GATEWAY).expect("kept");
        assert_eq!(error_message(&body).as_deref(), Some("Bad Gateway"));
        assert!(parse_body("<html>", StatusCode::OK).is_err());
        assert_eq!(parse_body("  ", StatusCode::OK).expect("empty"), Value::Null);
    }
}
