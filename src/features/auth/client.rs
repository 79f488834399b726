//! Client wrappers for the identity API endpoints. [`IdentityApi`] is the seam
//! between the session state machine and the transport: the browser build
//! implements it with `gloo-net`, the console build with a cookie-jar `reqwest`
//! client, and tests with in-memory fakes.

use crate::{
    app_lib::AppError,
    features::auth::types::{ActivateRequest, RegisterRequest, SignInRequest, UserEnvelope},
};

#[cfg(target_arch = "wasm32")]
use crate::app_lib::api::browser;

pub const REGISTER_PATH: &str = "/api/v1/users/register/";
pub const ACTIVATE_PATH: &str = "/api/v1/users/activate";
pub const LOGIN_PATH: &str = "/api/v1/users/login/";
pub const CURRENT_USER_PATH: &str = "/api/v1/users/current-user";
pub const LOGOUT_PATH: &str = "/api/v1/users/logout";

/// The five identity operations. Every call is credentialed by the backend's
/// session cookie; implementations never store tokens themselves.
#[allow(async_fn_in_trait)]
pub trait IdentityApi {
    /// Creates an account. Field validation is the backend's job.
    async fn register(&self, request: &RegisterRequest) -> Result<(), AppError>;

    /// Activates an account. `token` must already be normalized.
    async fn activate_account(&self, user_id: &str, token: &str) -> Result<(), AppError>;

    /// Signs in and lets the backend set the session cookie.
    async fn sign_in(&self, request: &SignInRequest) -> Result<UserEnvelope, AppError>;

    /// Fetches the user behind the current session cookie.
    async fn fetch_current_user(&self) -> Result<UserEnvelope, AppError>;

    /// Invalidates the backend session.
    async fn sign_out(&self) -> Result<(), AppError>;
}

/// Builds the activation path for a user id, rejecting ids that are empty or
/// would escape the path segment.
pub fn activation_path(user_id: &str) -> Result<String, AppError> {
    let user_id = user_id.trim();
    if user_id.is_empty() {
        return Err(AppError::Validation {
            field: Some("user_id".to_string()),
            message: "must be provided".to_string(),
        });
    }
    if !user_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(AppError::Validation {
            field: Some("user_id".to_string()),
            message: "is invalid".to_string(),
        });
    }

    Ok(format!("{ACTIVATE_PATH}/{user_id}"))
}

/// Browser transport over `fetch` with `credentials: include`.
#[cfg(target_arch = "wasm32")]
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserIdentityClient;

#[cfg(target_arch = "wasm32")]
impl IdentityApi for BrowserIdentityClient {
    async fn register(&self, request: &RegisterRequest) -> Result<(), AppError> {
        browser::post_json(REGISTER_PATH, request).await
    }

    async fn activate_account(&self, user_id: &str, token: &str) -> Result<(), AppError> {
        let path = activation_path(user_id)?;
        let request = ActivateRequest {
            token: token.to_string(),
        };
        browser::put_json(&path, &request).await
    }

    async fn sign_in(&self, request: &SignInRequest) -> Result<UserEnvelope, AppError> {
        browser::post_json_response(LOGIN_PATH, request).await
    }

    async fn fetch_current_user(&self) -> Result<UserEnvelope, AppError> {
        browser::get_json(CURRENT_USER_PATH).await
    }

    async fn sign_out(&self) -> Result<(), AppError> {
        browser::post_empty(LOGOUT_PATH).await
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::NativeIdentityClient;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use super::{
        activation_path, ActivateRequest, AppError, IdentityApi, RegisterRequest, SignInRequest,
        UserEnvelope, CURRENT_USER_PATH, LOGIN_PATH, LOGOUT_PATH, REGISTER_PATH,
    };
    use crate::app_lib::api::native::ApiClient;

    /// Console transport; the wrapped client's cookie jar holds the session.
    #[derive(Clone, Debug)]
    pub struct NativeIdentityClient {
        api: ApiClient,
    }

    impl NativeIdentityClient {
        pub fn new(api: ApiClient) -> Self {
            Self { api }
        }

        pub fn base_url(&self) -> &str {
            self.api.base_url()
        }
    }

    impl IdentityApi for NativeIdentityClient {
        async fn register(&self, request: &RegisterRequest) -> Result<(), AppError> {
            self.api.post_json(REGISTER_PATH, request).await
        }

        async fn activate_account(&self, user_id: &str, token: &str) -> Result<(), AppError> {
            let path = activation_path(user_id)?;
            let request = ActivateRequest {
                token: token.to_string(),
            };
            self.api.put_json(&path, &request).await
        }

        async fn sign_in(&self, request: &SignInRequest) -> Result<UserEnvelope, AppError> {
            self.api.post_json_response(LOGIN_PATH, request).await
        }

        async fn fetch_current_user(&self) -> Result<UserEnvelope, AppError> {
            self.api.get_json(CURRENT_USER_PATH).await
        }

        async fn sign_out(&self) -> Result<(), AppError> {
            self.api.post_empty(LOGOUT_PATH).await
        }
    }
}
