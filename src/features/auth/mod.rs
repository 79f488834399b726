//! Auth feature module: the identity API seam, the session store, bootstrap
//! sequencing, the route gate and activation token formatting. It keeps
//! authentication logic out of the UI and must stay aligned with the backend's
//! cookie session. Passwords and activation tokens must never be logged.
//!
//! Flow Overview: bootstrap refreshes the current user once; sign-in posts
//! credentials and then refreshes; sign-out clears local state whatever the
//! backend answers; activation normalizes the emailed token before sending it.

pub mod bootstrap;
pub mod client;
pub mod guards;
pub mod session;
#[cfg(target_arch = "wasm32")]
pub mod state;
pub mod token;
pub mod types;

#[cfg(target_arch = "wasm32")]
pub(crate) use guards::RequireAuth;
