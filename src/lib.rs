//! Scoped vector memory for grounding agent decisions.
//!
//! Text is embedded and stored per scope (`USER`, `AGENT`, `BUSINESS`);
//! queries return the most similar visible entries above a score floor.

pub mod core;
pub mod rag;
pub mod vector_math;

pub use crate::core::errors::{ConfigError, IndexerError, RetrieverError, StoreError};
