//! API client for communicating with the Product Evaluator REST API.
//!
//! This module provides the `ApiClient` struct for making authenticated
//! JSON requests and multipart form uploads.

use std::sync::Arc;

use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use reqwest::multipart::Form;
use reqwest::{Client, Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};
use tracing::{debug, error, warn};

use crate::auth::{SessionStore, AUTH_TOKEN_KEY, SESSION_KEYS};
use crate::config::Config;
use crate::nav::Navigator;

use super::error::{ApiError, ApiResult};

/// Method, extra headers and raw body for [`ApiClient::request`].
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    /// Merged over the defaults; a header set here replaces the default one.
    pub headers: HeaderMap,
    pub body: Option<String>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::new(Method::GET)
    }
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// API client for the evaluator backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    login_path: String,
    store: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    /// Create a client for `base_url` with the default timeout and login path
    pub fn new(
        base_url: impl Into<String>,
        store: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> ApiResult<Self> {
        let config = Config {
            api_base_url: base_url.into(),
            ..Config::default()
        };
        Self::from_config(&config, store, navigator)
    }

    pub fn from_config(
        config: &Config,
        store: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
            login_path: config.login_path.clone(),
            store,
            navigator,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    fn auth_headers(&self) -> ApiResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        if let Some(token) = self.store.get(AUTH_TOKEN_KEY)?.filter(|t| !t.is_empty()) {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| ApiError::InvalidRequest(format!("bad auth token: {}", e)))?;
            value.set_sensitive(true);
            headers.insert(header::AUTHORIZATION, value);
        }
        Ok(headers)
    }

    /// Drop the session and send the user to the login page.
    fn handle_unauthorized(&self) {
        warn!("Unauthorized response, clearing session");
        if let Err(e) = self.store.remove_all(&SESSION_KEYS) {
            warn!(error = %e, "Failed to clear session after 401");
        }
        self.navigator.navigate(&self.login_path);
    }

    /// Read a body as JSON, masking unreadable or malformed bodies as `{}`.
    async fn parse_body(response: reqwest::Response) -> Value {
        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!(error = %e, "Failed to read response body");
                return json!({});
            }
        };
        serde_json::from_slice(&bytes).unwrap_or_else(|_| json!({}))
    }

    /// Send a JSON request to `<base_url><endpoint>`.
    ///
    /// Returns `Ok(None)` on 401 after clearing the session and redirecting
    /// to the login page, and `{"success": true}` on 204. Any other non-2xx
    /// status fails with [`ApiError::Request`] carrying the body's `detail`.
    pub async fn request(&self, endpoint: &str, options: RequestOptions) -> ApiResult<Option<Value>> {
        let result = self.send_json(endpoint, options).await;
        if let Err(ref e) = result {
            error!(endpoint, error = %e, "API request error");
        }
        result
    }

    async fn send_json(&self, endpoint: &str, options: RequestOptions) -> ApiResult<Option<Value>> {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.extend(self.auth_headers()?);
        for name in options.headers.keys() {
            headers.remove(name);
        }
        for (name, value) in options.headers.iter() {
            headers.append(name.clone(), value.clone());
        }

        let url = self.url(endpoint);
        debug!(method = %options.method, url = %url, "Sending API request");

        let mut builder = self.client.request(options.method, &url).headers(headers);
        if let Some(body) = options.body {
            builder = builder.body(body);
        }
        let response = builder.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            self.handle_unauthorized();
            return Ok(None);
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(Some(json!({ "success": true })));
        }

        let data = Self::parse_body(response).await;
        if !status.is_success() {
            return Err(ApiError::from_body(status, &data));
        }
        Ok(Some(data))
    }

    pub async fn get(&self, endpoint: &str) -> ApiResult<Option<Value>> {
        self.request(endpoint, RequestOptions::new(Method::GET)).await
    }

    pub async fn post<B: Serialize + ?Sized>(&self, endpoint: &str, data: &B) -> ApiResult<Option<Value>> {
        let body = Self::encode(data)?;
        self.request(endpoint, RequestOptions::new(Method::POST).body(body))
            .await
    }

    pub async fn put<B: Serialize + ?Sized>(&self, endpoint: &str, data: &B) -> ApiResult<Option<Value>> {
        let body = Self::encode(data)?;
        self.request(endpoint, RequestOptions::new(Method::PUT).body(body))
            .await
    }

    pub async fn delete(&self, endpoint: &str) -> ApiResult<Option<Value>> {
        self.request(endpoint, RequestOptions::new(Method::DELETE)).await
    }

    /// GET and decode into `T`. A 401 still comes back as `Ok(None)`.
    pub async fn get_as<T: DeserializeOwned>(&self, endpoint: &str) -> ApiResult<Option<T>> {
        let value = self.get(endpoint).await?;
        Self::decode(value)
    }

    /// POST and decode into `T`. A 401 still comes back as `Ok(None)`.
    pub async fn post_as<T, B>(&self, endpoint: &str, data: &B) -> ApiResult<Option<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let value = self.post(endpoint, data).await?;
        Self::decode(value)
    }

    /// POST a multipart form. Only the bearer header is attached.
    ///
    /// Unlike [`request`](Self::request) there is no 401/204 handling: every
    /// non-2xx status is an error and a 2xx body must be valid JSON.
    pub async fn post_form(&self, endpoint: &str, form: Form) -> ApiResult<Value> {
        let result = self.send_form(endpoint, form).await;
        if let Err(ref e) = result {
            error!(endpoint, error = %e, "API form request error");
        }
        result
    }

    async fn send_form(&self, endpoint: &str, form: Form) -> ApiResult<Value> {
        let url = self.url(endpoint);
        debug!(url = %url, "Sending API form request");

        let response = self
            .client
            .post(&url)
            .headers(self.auth_headers()?)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let data = Self::parse_body(response).await;
            return Err(ApiError::from_body(status, &data));
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    fn encode<B: Serialize + ?Sized>(data: &B) -> ApiResult<String> {
        serde_json::to_string(data).map_err(|e| ApiError::InvalidRequest(e.to_string()))
    }

    fn decode<T: DeserializeOwned>(value: Option<Value>) -> ApiResult<Option<T>> {
        value
            .map(|v| serde_json::from_value(v).map_err(|e| ApiError::InvalidResponse(e.to_string())))
            .transpose()
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("login_path", &self.login_path)
            .finish_non_exhaustive()
    }
}
