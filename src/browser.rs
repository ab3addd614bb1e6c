//! Browser Adapters
//!
//! localStorage, `window.location` and a fetch-backed transport plugged into
//! the core client.

use async_trait::async_trait;
use futures::future::{select, Either};
use gloo_timers::future::TimeoutFuture;
use serde_json::Value;
use web_sys::Storage;

use task_hub_core::http::{HttpRequest, HttpResponse, Method, Navigator, Transport};
use task_hub_core::session::KeyValueStore;
use task_hub_core::{StorageError, TransportError};

fn local_storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// `window.localStorage`
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn available() -> bool {
        local_storage().is_some()
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        local_storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = local_storage().ok_or(StorageError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|_| StorageError::Write(key.to_string()))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let storage = local_storage().ok_or(StorageError::Unavailable)?;
        storage
            .remove_item(key)
            .map_err(|_| StorageError::Write(key.to_string()))
    }
}

/// Full page load of `/login`, so every view starts over signed out.
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn redirect_to_login(&self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(e) = window.location().set_href("/login") {
            log::error!("[NAV] Redirect to login failed: {:?}", e);
        }
    }
}

/// Sends requests with `reqwest` (fetch under wasm) and races each one
/// against its timeout.
pub struct FetchTransport {
    client: reqwest::Client,
}

impl FetchTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

fn method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

/// Empty bodies become `Null`; non-JSON text is kept as a string.
fn parse_body(text: String) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(&text).unwrap_or(Value::String(text))
}

#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.client.request(method(request.method), &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.to_string());
        }

        let call = async move {
            let response = builder
                .send()
                .await
                .map_err(|e| TransportError::Network(e.to_string()))?;
            let status = response.status().as_u16();
            let text = response
                .text()
                .await
                .map_err(|e| TransportError::Network(e.to_string()))?;
            Ok(HttpResponse::new(status, parse_body(text)))
        };

        let timeout = request.timeout;
        let timer = TimeoutFuture::new(timeout.as_millis().min(u32::MAX as u128) as u32);
        match select(Box::pin(call), Box::pin(timer)).await {
            Either::Left((result, _)) => result,
            Either::Right(((), _)) => {
                log::warn!("[HTTP] {} {} timed out", request.method.as_str(), request.url);
                Err(TransportError::Timeout(timeout))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_body() {
        assert_eq!(parse_body(String::new()), Value::Null);
        assert_eq!(parse_body("  ".into()), Value::Null);
        assert_eq!(parse_body(r#"{"data":1}"#.into()), json!({"data": 1}));
        assert_eq!(parse_body("Bad Gateway".into()), json!("Bad Gateway"));
    }

    #[test]
    fn test_method_mapping() {
        assert_eq!(method(Method::Patch), reqwest::Method::PATCH);
        assert_eq!(method(Method::Delete), reqwest::Method::DELETE);
    }
}
