//! Application layer services implementing business logic.
//!
//! Services consume the domain traits and provide a small API for the
//! transport adapters (Telegram bot and HTTP redirect endpoint).
//!
//! # Available Services
//!
//! - [`services::shortener_service::ShortenerService`] - Alias allocation and resolution

pub mod services;
