//! Core types and utilities for the Life-Grid cellular automaton engine.

pub mod config;
pub mod error;
pub mod types;

pub use config::*;
pub use error::{Error, Result};
pub use types::*;
