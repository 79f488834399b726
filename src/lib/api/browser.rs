//! Browser `fetch` transport. Every request carries `credentials: include` so
//! the backend's `HttpOnly` session cookie travels with it, and is aborted after
//! [`DEFAULT_TIMEOUT_MS`]. The function names match `native::ApiClient`.

use super::{build_url_with_base, DEFAULT_TIMEOUT_MS};
use crate::app_lib::{config::AppConfig, errors::AppError};
use gloo_net::http::{Request, Response};
use gloo_timers::callback::Timeout;
use serde::{de::DeserializeOwned, Serialize};
use web_sys::{AbortController, RequestCredentials};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Method {
    Get,
    Post,
    Put,
}

pub async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, AppError> {
    let response = send(Method::Get, path, None).await?;
    decode(response).await
}

/// POSTs a JSON body and decodes the JSON reply.
pub async fn post_json_response<B: Serialize, T: DeserializeOwned>(
    path: &str,
    body: &B,
) -> Result<T, AppError> {
    let response = send(Method::Post, path, Some(encode(body)?)).await?;
    decode(response).await
}

/// POSTs a JSON body; any 2xx is success and the reply body is ignored.
pub async fn post_json<B: Serialize>(path: &str, body: &B) -> Result<(), AppError> {
    let response = send(Method::Post, path, Some(encode(body)?)).await?;
    expect_success(response).await
}

pub async fn put_json<B: Serialize>(path: &str, body: &B) -> Result<(), AppError> {
    let response = send(Method::Put, path, Some(encode(body)?)).await?;
    expect_success(response).await
}

/// POST without a body, as used by logout.
pub async fn post_empty(path: &str) -> Result<(), AppError> {
    let response = send(Method::Post, path, None).await?;
    expect_success(response).await
}

fn encode<B: Serialize>(body: &B) -> Result<String, AppError> {
    serde_json::to_string(body)
        .map_err(|err| AppError::Serialization(format!("Failed to encode request: {err}")))
}

async fn send(method: Method, path: &str, json: Option<String>) -> Result<Response, AppError> {
    let url = build_url_with_base(&AppConfig::get().api_base_url, path);

    let controller = AbortController::new()
        .map_err(|_| AppError::Config("Failed to initialize request timeout.".to_string()))?;
    let signal = controller.signal();
    // Dropping the timer cancels it, so it must outlive the request.
    let _timer = Timeout::new(DEFAULT_TIMEOUT_MS, move || controller.abort());

    let builder = match method {
        Method::Get => Request::get(&url),
        Method::Post => Request::post(&url),
        Method::Put => Request::put(&url),
    }
    .credentials(RequestCredentials::Include)
    .abort_signal(Some(&signal));

    let request = match (method, json) {
        (_, Some(json)) => builder.header("Content-Type", "application/json").body(json),
        (Method::Get, None) => builder.build(),
        (_, None) => builder.body(""),
    }
    .map_err(|err| AppError::Serialization(format!("Failed to build request: {err}")))?;

    tracing::debug!(?method, path, "sending request");
    request.send().await.map_err(map_request_error)
}

/// The abort from the timer surfaces as an `AbortError` from fetch.
fn map_request_error(err: gloo_net::Error) -> AppError {
    let message = err.to_string();
    if message.to_lowercase().contains("abort") {
        AppError::Timeout("Request timed out. Please try again.".to_string())
    } else {
        AppError::Network(format!("Unable to reach the server: {message}"))
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    if !response.ok() {
        return Err(error_from_response(response).await);
    }
    response
        .json::<T>()
        .await
        .map_err(|err| AppError::Parse(format!("Failed to decode response: {err}")))
}

async fn expect_success(response: Response) -> Result<(), AppError> {
    if response.ok() {
        Ok(())
    } else {
        Err(error_from_response(response).await)
    }
}

async fn error_from_response(response: Response) -> AppError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    AppError::from_response(status, &body)
}
