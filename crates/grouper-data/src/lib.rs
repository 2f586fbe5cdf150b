//! Data layer for the history grouper.
//!
//! Responsible for reading the JSONL history, cleaning and grouping its
//! records, computing statistics and writing the grouped document.

pub mod filter;
pub mod grouper;
pub mod pipeline;
pub mod reader;
pub mod summary;
pub mod writer;

pub use grouper_core as core;
