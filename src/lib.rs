//! # crossbox
//!
//! Client for the CrossBoxFit identity service. The session state machine
//! (identity API seam, session store, bootstrap sequencing, route gate and
//! activation token formatting) compiles everywhere and is unit tested on the
//! host. The Leptos UI is built for `wasm32` only, and the console front end for
//! native targets only.

#[cfg(target_arch = "wasm32")]
mod app;
#[path = "lib/mod.rs"]
pub mod app_lib;
#[cfg(not(target_arch = "wasm32"))]
pub mod cli;
#[cfg(target_arch = "wasm32")]
mod components;
pub mod features;
pub mod routes;

#[cfg(target_arch = "wasm32")]
pub use crate::app::App;
