//! User profile — the interest tags a recommendation request is scoped to.

use serde::{Deserialize, Serialize};

/// The interests a user has subscribed to.
///
/// Supplied directly by the caller or resolved from the `UserStore` at the
/// API boundary; the pipeline never looks it up itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub interests: Vec<String>,
}

impl UserProfile {
    pub fn new(interests: Vec<String>) -> Self {
        Self { interests }
    }

    /// A profile with no interests — tag matching is skipped entirely.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.interests.is_empty()
    }
}
