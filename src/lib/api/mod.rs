//! HTTP helpers for JSON APIs with consistent timeouts and error handling. The
//! browser transport rides on `gloo-net` with `credentials: include`; the native
//! transport uses a `reqwest` client with a cookie store. Neither stores tokens;
//! the backend session cookie is the only credential.

#[cfg(target_arch = "wasm32")]
pub mod browser;
#[cfg(not(target_arch = "wasm32"))]
pub mod native;

/// Default request timeout (milliseconds) applied to all HTTP helpers.
pub const DEFAULT_TIMEOUT_MS: u32 = 10_000;

/// Builds a URL from an explicit base URL and the provided path.
pub fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}
