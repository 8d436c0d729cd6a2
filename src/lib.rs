//! dexcard - Creature Lookup Library
//!
//! Looks up a creature by name or number against a public data service and
//! renders a summary card in the terminal.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
