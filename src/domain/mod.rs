//! Domain layer containing business entities and contracts.
//!
//! This module defines the data model of the shortener and the interfaces the
//! application layer depends on. It has no dependencies on infrastructure or
//! transport code.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Storage trait definitions
//! - [`alias`] - Alias alphabet and the generator contract
//!
//! # Allocation Flow
//!
//! 1. A transport adapter (bot or HTTP) receives a target URL
//! 2. [`crate::application::services::ShortenerService`] asks an
//!    [`alias::AliasGenerator`] for a candidate
//! 3. The candidate is claimed through [`repositories::UrlRepository`]
//! 4. On collision, a new candidate is generated until the retry budget runs out

pub mod alias;
pub mod entities;
pub mod repositories;
