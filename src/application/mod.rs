//! Application layer managing state and lookup workflows.
//!
//! This module coordinates between the domain layer and presentation layer:
//! it holds the UI state, runs lookups off the UI thread, and pushes state
//! onto a display surface.

pub mod pipeline;
pub mod state;
pub mod surface;

pub use pipeline::*;
pub use state::*;
pub use surface::*;
