//! Storage implementations of the domain repository traits.

mod memory_url_repository;

pub use memory_url_repository::MemoryUrlRepository;
