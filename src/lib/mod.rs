//! Shared utilities for API access, configuration, errors, logging, and build
//! metadata.
//!
//! ## Session Flow
//!
//! 1. **Bootstrap:** on load the client GETs `/api/v1/users/current-user` once. A
//!    valid `sessionid` cookie restores the user; anything else leaves the visitor
//!    signed out.
//! 2. **Sign in:** POST `/api/v1/users/login/` sets the cookie, then the client
//!    refreshes the current user through the same endpoint used at bootstrap.
//! 3. **Activation:** the emailed token is normalized into groups of three and
//!    PUT to `/api/v1/users/activate/{id}`.
//! 4. **Sign out:** POST `/api/v1/users/logout` is best effort; local state is
//!    always cleared.
//!
//! These utilities never see a bearer token. Callers must still avoid logging
//! passwords or activation tokens.

pub mod api;
#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}
pub mod config;
pub mod errors;
#[cfg(target_arch = "wasm32")]
pub mod logging;

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub use errors::AppError;
