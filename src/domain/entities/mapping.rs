//! Mapping entity representing a shortened URL.

/// An alias together with the target URL it resolves to.
///
/// Created once by the allocator after a successful save and never mutated
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapping {
    pub alias: String,
    pub target: String,
}

impl Mapping {
    /// Creates a new Mapping instance.
    pub fn new(alias: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            target: target.into(),
        }
    }

    /// Builds the public short link for this mapping under `base_url`.
    ///
    /// A trailing slash on `base_url` is ignored.
    pub fn short_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.alias)
    }
}
