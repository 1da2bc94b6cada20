//! HTTP middleware stack

pub mod logging;

pub use logging::request_logging;
