//! Account domain model

use serde::{Deserialize, Serialize};

/// The account that owns the client credentials
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    /// Only present when the token carries enough permissions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub username: String,
    pub display_name: String,
    /// Avatar image URL
    pub avatar: String,
}
