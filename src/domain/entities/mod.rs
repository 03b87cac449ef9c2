//! Core domain entities.
//!
//! - [`Mapping`] - A persisted alias → target URL pair

pub mod mapping;

pub use mapping::Mapping;
