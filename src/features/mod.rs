//! Domain-level features and their shared logic. Routes import these modules to
//! keep view code focused while session and API handling live in one place.

pub mod auth;
