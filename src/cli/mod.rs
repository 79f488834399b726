//! Native console front end: argument parsing, logging setup and the
//! interactive session that drives the same state machine as the browser.

pub mod actions;
pub mod commands;
pub mod dispatch;
mod start;

pub use start::start;
