use log::debug;
use reqwest::{header::AUTHORIZATION, Client, Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::rc::Rc;

use crate::{api::ApiError, config, session::SessionManager, utils::storage as storage_utils};

pub const LOGIN_PATH: &str = "/users/login/";
pub const REGISTER_PATH: &str = "/users/";
pub const REFRESH_PATH: &str = "/token/refresh/";
pub const ME_PATH: &str = "/users/me/";

/// An outbound call, described independently of the HTTP stack so it can be
/// replayed after a token refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the API base, e.g. `/courses/`.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    /// Set once the request has been replayed after a 401.
    pub retried: bool,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            retried: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body)
            .map_err(|e| ApiError::validation(format!("Failed to encode request: {}", e)))?;
        self.body = Some(value);
        Ok(self)
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn queries(mut self, params: impl IntoIterator<Item = (String, String)>) -> Self {
        self.query.extend(params);
        self
    }

    pub fn is_refresh(&self) -> bool {
        self.path == REFRESH_PATH
    }
}

#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        let text = if self.body.trim().is_empty() {
            "null"
        } else {
            self.body.as_str()
        };
        serde_json::from_str(text).map_err(|e| {
            ApiError::server(
                self.status.as_u16(),
                format!("Failed to parse response: {}", e),
            )
        })
    }

    pub fn payload(&self) -> Option<Value> {
        serde_json::from_str(&self.body).ok()
    }

    /// `error` first, then the REST framework's `detail`.
    pub fn error_message(&self) -> Option<String> {
        let payload = self.payload()?;
        ["error", "detail"]
            .iter()
            .find_map(|key| payload.get(*key).and_then(Value::as_str))
            .map(str::to_string)
    }

    pub fn into_error(self) -> ApiError {
        let status = self.status.as_u16();
        let message = self
            .error_message()
            .unwrap_or_else(|| format!("Request failed with status {}", status));
        ApiError::Server {
            status,
            message,
            details: self.payload(),
        }
    }

    pub fn into_result<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        if self.is_success() {
            self.json()
        } else {
            Err(self.into_error())
        }
    }

    pub fn into_unit(self) -> Result<(), ApiError> {
        if self.is_success() {
            Ok(())
        } else {
            Err(self.into_error())
        }
    }
}

/// Sends `ApiRequest`s to the configured API base. Knows nothing about tokens
/// beyond the bearer value it is handed.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Option<String>,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: None,
        }
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: Some(base_url.into()),
        }
    }

    async fn resolved_base_url(&self) -> String {
        if let Some(base) = &self.base_url {
            base.clone()
        } else {
            config::await_api_base_url().await
        }
    }

    pub async fn send(
        &self,
        request: &ApiRequest,
        bearer: Option<&str>,
    ) -> Result<ApiResponse, ApiError> {
        let base_url = self.resolved_base_url().await;
        let url = format!("{}{}", base_url.trim_end_matches('/'), request.path);
        debug!(
            "{} {} (auth: {}, retried: {})",
            request.method,
            url,
            bearer.is_some(),
            request.retried
        );
        self.dispatch(request, &url, bearer).await
    }

    #[cfg(not(test))]
    async fn dispatch(
        &self,
        request: &ApiRequest,
        url: &str,
        bearer: Option<&str>,
    ) -> Result<ApiResponse, ApiError> {
        self.dispatch_http(request, url, bearer).await
    }

    #[cfg(test)]
    async fn dispatch(
        &self,
        request: &ApiRequest,
        url: &str,
        bearer: Option<&str>,
    ) -> Result<ApiResponse, ApiError> {
        match mock_hooks::lookup(url) {
            Some(responder) => mock_hooks::respond(responder, request, url, bearer).await,
            None => self.dispatch_http(request, url, bearer).await,
        }
    }

    async fn dispatch_http(
        &self,
        request: &ApiRequest,
        url: &str,
        bearer: Option<&str>,
    ) -> Result<ApiResponse, ApiError> {
        let mut builder = self.client.request(request.method.clone(), url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = bearer {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::network(format!("Request failed: {}", e)))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::network(format!("Failed to read response: {}", e)))?;
        Ok(ApiResponse { status, body })
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

/// Facade used by every view. Cloning shares the same session.
#[derive(Clone)]
pub struct ApiClient {
    session: Rc<SessionManager>,
}

impl ApiClient {
    pub fn new() -> Self {
        Self::with_transport(HttpTransport::new())
    }

    pub fn new_with_base_url(base_url: impl Into<String>) -> Self {
        Self::with_transport(HttpTransport::with_base_url(base_url))
    }

    fn with_transport(transport: HttpTransport) -> Self {
        let session = SessionManager::new(transport, storage_utils::default_storage());
        Self::with_session(Rc::new(session))
    }

    pub fn with_session(session: Rc<SessionManager>) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &Rc<SessionManager> {
        &self.session
    }

    pub(crate) async fn fetch<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<T, ApiError> {
        self.session.authorized_request(request).await?.into_result()
    }

    pub(crate) async fn execute(&self, request: ApiRequest) -> Result<(), ApiError> {
        self.session.authorized_request(request).await?.into_unit()
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
pub(crate) use mock_hooks::{register_mock, MockRequest, MockResponse, TestResponder};
