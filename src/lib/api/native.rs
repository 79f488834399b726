//! Native HTTP client for the console front end. A single `reqwest::Client`
//! with a cookie store plays the role of the browser: the session cookie set by
//! sign-in is replayed on every later request for the lifetime of the client.

use super::build_url_with_base;
use crate::app_lib::errors::AppError;
use reqwest::{Client, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Builds a cookie-aware client for the given API base URL.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the base URL is not an absolute http(s) URL
    /// or the HTTP client cannot be initialized.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AppError> {
        let parsed = url::Url::parse(base_url.trim())
            .map_err(|err| AppError::Config(format!("Invalid API URL {base_url}: {err}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(AppError::Config(format!(
                "Unsupported API URL scheme: {}",
                parsed.scheme()
            )));
        }

        let client = Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|err| AppError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            base_url: parsed.as_str().to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches JSON; cookies from earlier responses are attached automatically.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let request = self.client.get(self.url(path));
        let response = send(request).await?;
        handle_json_response(response).await
    }

    /// Posts JSON and parses a JSON response.
    pub async fn post_json_response<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        let request = self.client.post(self.url(path)).json(body);
        let response = send(request).await?;
        handle_json_response(response).await
    }

    /// Posts JSON and ignores the response body.
    pub async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> Result<(), AppError> {
        let request = self.client.post(self.url(path)).json(body);
        let response = send(request).await?;
        handle_empty_response(response).await
    }

    /// Puts JSON and ignores the response body.
    pub async fn put_json<B: Serialize>(&self, path: &str, body: &B) -> Result<(), AppError> {
        let request = self.client.put(self.url(path)).json(body);
        let response = send(request).await?;
        handle_empty_response(response).await
    }

    /// Posts an empty body, used to clear a session.
    pub async fn post_empty(&self, path: &str) -> Result<(), AppError> {
        let request = self.client.post(self.url(path));
        let response = send(request).await?;
        handle_empty_response(response).await
    }

    fn url(&self, path: &str) -> String {
        build_url_with_base(&self.base_url, path)
    }
}

async fn send(request: RequestBuilder) -> Result<Response, AppError> {
    request.send().await.map_err(map_request_error)
}

/// Maps transport errors into `AppError` variants with timeout detection.
fn map_request_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::Timeout("Request timed out. Please try again.".to_string())
    } else if err.is_builder() {
        AppError::Serialization(format!("Failed to build request: {err}"))
    } else {
        AppError::Network(format!("Unable to reach the server: {err}"))
    }
}

async fn handle_json_response<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    let status = response.status();
    if status.is_success() {
        response
            .json::<T>()
            .await
            .map_err(|err| AppError::Parse(format!("Failed to decode response: {err}")))
    } else {
        Err(error_from_response(response).await)
    }
}

async fn handle_empty_response(response: Response) -> Result<(), AppError> {
    if response.status().is_success() {
        Ok(())
    } else {
        Err(error_from_response(response).await)
    }
}

async fn error_from_response(response: Response) -> AppError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    debug!(status, "request rejected by backend");
    AppError::from_response(status, &body)
}
