//! Status enums for draft orders.

use serde::{Deserialize, Serialize};

/// Draft order (cart) status.
///
/// Freshly created draft orders report `draft`. A status this crate does not
/// know about is kept verbatim in [`DraftOrderStatus::Other`] so assertions
/// can show what the backend sent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DraftOrderStatus {
    Draft,
    Pending,
    Completed,
    Canceled,
    Other(String),
}

impl DraftOrderStatus {
    /// The wire value of this status.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Draft => "draft",
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Canceled => "canceled",
            Self::Other(status) => status,
        }
    }
}

impl From<String> for DraftOrderStatus {
    fn from(status: String) -> Self {
        match status.as_str() {
            "draft" => Self::Draft,
            "pending" => Self::Pending,
            "completed" => Self::Completed,
            "canceled" => Self::Canceled,
            _ => Self::Other(status),
        }
    }
}

impl From<DraftOrderStatus> for String {
    fn from(status: DraftOrderStatus) -> Self {
        match status {
            DraftOrderStatus::Other(status) => status,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for DraftOrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
