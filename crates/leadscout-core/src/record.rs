//! Canonical business record produced by normalization.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Default sentinel for the name field.
pub const NO_NAME: &str = "No Name";
/// Default sentinel for every other field.
pub const NOT_AVAILABLE: &str = "N/A";

/// A business listing after normalization.
///
/// Every field is always present; fields missing from the upstream listing
/// carry a sentinel (`"No Name"` for the name, `"N/A"` otherwise) rather
/// than being absent or null. `emails` is the one exception: it is only
/// populated on the chat-delivery path and is omitted from JSON when unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessRecord {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub website: String,
    pub rating: String,
    pub reviews: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emails: Option<HashSet<String>>,
}

impl BusinessRecord {
    /// True when the record carries a usable website URL.
    #[must_use]
    pub fn has_website(&self) -> bool {
        self.website != NOT_AVAILABLE && !self.website.is_empty()
    }
}

impl Default for BusinessRecord {
    fn default() -> Self {
        Self {
            name: NO_NAME.to_string(),
            address: NOT_AVAILABLE.to_string(),
            phone: NOT_AVAILABLE.to_string(),
            website: NOT_AVAILABLE.to_string(),
            rating: NOT_AVAILABLE.to_string(),
            reviews: NOT_AVAILABLE.to_string(),
            emails: None,
        }
    }
}
