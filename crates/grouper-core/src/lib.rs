//! Shared types for the history grouper.
//!
//! Holds the record and grouping models, the error type, run settings,
//! timestamp ordering rules and small formatting helpers used by the data
//! layer and the binary.

pub mod data_processors;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod time_utils;

pub use error::{GrouperError, Result};
