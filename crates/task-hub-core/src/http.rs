//! HTTP Client Adapter
//!
//! Every call goes through [`ApiClient::request`]:
//! - outbound: attach `Authorization: Bearer <token>` when a session exists
//! - inbound 2xx: decode the envelope and hand back the payload
//! - inbound 401: clear the session and redirect to login, once per response
//! - any other failure: return it to the caller, no retry

use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::envelope::Envelope;
use crate::error::{ApiError, ErrorPayload, TransportError};
use crate::session::SessionContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

/// A fully decorated request, ready for the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
    pub timeout: Duration,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Raw response. `body` is `Null` when the server sent nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Value,
}

impl HttpResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request. Implementations enforce `request.timeout` and map
/// connection failures to [`TransportError`].
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Where to send the user when their session is rejected.
pub trait Navigator {
    fn redirect_to_login(&self);
}

/// Characters escaped in query values
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

/// Build `?a=1&b=2`. Empty values are still sent.
pub fn encode_query(params: &[(&str, String)]) -> String {
    if params.is_empty() {
        return String::new();
    }
    let pairs: Vec<String> = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, utf8_percent_encode(v, QUERY_VALUE)))
        .collect();
    format!("?{}", pairs.join("&"))
}

struct ClientInner {
    config: ClientConfig,
    transport: Rc<dyn Transport>,
    navigator: Rc<dyn Navigator>,
    session: SessionContext,
}

/// REST client shared by every view. Cheap to clone.
#[derive(Clone)]
pub struct ApiClient {
    inner: Rc<ClientInner>,
}

impl ApiClient {
    pub fn new(
        config: ClientConfig,
        transport: Rc<dyn Transport>,
        navigator: Rc<dyn Navigator>,
        session: SessionContext,
    ) -> Self {
        Self {
            inner: Rc::new(ClientInner {
                config,
                transport,
                navigator,
                session,
            }),
        }
    }

    pub fn session(&self) -> &SessionContext {
        &self.inner.session
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Decorate a request with the base URL, JSON headers and bearer token.
    pub fn build_request(&self, method: Method, path: &str, body: Option<Value>) -> HttpRequest {
        let mut headers = vec![("Accept".to_string(), "application/json".to_string())];
        if body.is_some() {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }
        if let Some(token) = self.inner.session.token() {
            headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
        }
        HttpRequest {
            method,
            url: self.inner.config.url(path),
            headers,
            body,
            timeout: self.inner.config.request_timeout,
        }
    }

    /// Send a request and return the unwrapped payload as raw JSON.
    pub async fn request(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value, ApiError> {
        let request = self.build_request(method, path, body);
        log::debug!("[API] {} {}", method.as_str(), path);

        let response = match self.inner.transport.send(request).await {
            Ok(response) => response,
            Err(e) => {
                log::error!("[API] {} {} failed: {}", method.as_str(), path, e);
                return Err(ApiError::Transport(e));
            }
        };

        if response.is_success() {
            return Ok(Envelope::decode(response.body).into_payload());
        }

        log::warn!("[API] {} {} -> {}", method.as_str(), path, response.status);
        let payload = ErrorPayload::from_body(response.body);
        if response.status == 401 {
            log::info!("[API] Session rejected, clearing credentials");
            self.inner.session.clear();
            self.inner.navigator.redirect_to_login();
            return Err(ApiError::Unauthorized { payload });
        }
        Err(ApiError::Server {
            status: response.status,
            payload,
        })
    }

    /// Send and decode the payload into `T`.
    pub async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<T, ApiError> {
        let payload = self.request(method, path, body).await?;
        serde_json::from_value(payload).map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.call(Method::Get, path, None).await
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        self.call(Method::Post, path, Some(to_body(body)?)).await
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        self.call(Method::Put, path, Some(to_body(body)?)).await
    }

    /// PATCH endpoints answer with a status envelope; the body is not needed.
    pub async fn patch<B: Serialize>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        self.request(Method::Patch, path, Some(to_body(body)?)).await.map(|_| ())
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.request(Method::Delete, path, None).await.map(|_| ())
    }
}

fn to_body<B: Serialize>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_query_keeps_empty_values() {
        let q = encode_query(&[("status", String::new()), ("priority", "HIGH".into())]);
        assert_eq!(q, "?status=&priority=HIGH");
    }

    #[test]
    fn test_encode_query_escapes() {
        assert_eq!(encode_query(&[("q", "a b&c".into())]), "?q=a%20b%26c");
        assert_eq!(encode_query(&[]), "");
    }

    #[test]
    fn test_success_range() {
        assert!(HttpResponse::new(204, Value::Null).is_success());
        assert!(!HttpResponse::new(302, Value::Null).is_success());
        assert!(!HttpResponse::new(401, Value::Null).is_success());
    }
}
