//! Product handles.

use serde::{Deserialize, Serialize};

/// A URL-safe product slug derived from the title by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Handle(String);

impl Handle {
    /// Wrap a handle string.
    #[must_use]
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    /// Returns the handle as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the handle is non-empty and only uses lowercase ASCII letters,
    /// digits and hyphens (`^[a-z0-9-]+$`).
    #[must_use]
    pub fn is_url_safe(&self) -> bool {
        !self.0.is_empty()
            && self
                .0
                .bytes()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
    }
}

impl std::fmt::Display for Handle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_safe_handles() {
        assert!(Handle::new("test-product-1700000000000-1a2b3c4d").is_url_safe());
        assert!(Handle::new("m").is_url_safe());
    }

    #[test]
    fn test_rejects_unsafe_handles() {
        assert!(!Handle::new("").is_url_safe());
        assert!(!Handle::new("Test-Product").is_url_safe());
        assert!(!Handle::new("with space").is_url_safe());
        assert!(!Handle::new("under_score").is_url_safe());
        assert!(!Handle::new("caf\u{e9}").is_url_safe());
    }
}
