//! Infrastructure layer providing external service integrations.
//!
//! This module contains the HTTP client that talks to the creature data
//! service and the log file setup.

pub mod http;
pub mod logging;

pub use http::*;
pub use logging::*;
