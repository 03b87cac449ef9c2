//! # URL Shortener Bot
//!
//! A Telegram bot that turns long URLs into short aliases, plus an Axum
//! server that redirects those aliases back to their targets.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Entities, the store contract and the alias generator contract
//! - **Application Layer** ([`application`]) - Alias allocation and resolution
//! - **Infrastructure Layer** ([`infrastructure`]) - In-memory store
//! - **API Layer** ([`api`]) - Redirect and health handlers, middleware
//! - **Bot Layer** ([`bot`]) - Telegram long-polling transport
//!
//! ## Allocation
//!
//! Aliases are drawn uniformly from 62 alphanumeric symbols (length 4 by
//! default) and claimed atomically in the store. On collision a new alias is
//! drawn, up to a retry budget; when the budget runs out the last candidate
//! overwrites the existing mapping.
//!
//! ## Quick Start
//!
//! ```bash
//! export TELEGRAM_TOKEN="123456:ABC-DEF"
//! export BASE_URL="http://localhost:8080"
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod bot;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;
pub mod telemetry;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{
        AllocationStrategy, ShortenError, ShortenerConfig, ShortenerService,
    };
    pub use crate::domain::alias::{AliasGenerator, GenerationError};
    pub use crate::domain::entities::Mapping;
    pub use crate::domain::repositories::{StoreError, UrlRepository};
    pub use crate::error::AppError;
    pub use crate::infrastructure::persistence::MemoryUrlRepository;
    pub use crate::state::AppState;
    pub use crate::utils::code_generator::RandomAliasGenerator;
}
