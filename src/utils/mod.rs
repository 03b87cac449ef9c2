//! Utility functions shared across layers.
//!
//! - [`code_generator`] - Cryptographically secure alias generation

pub mod code_generator;
