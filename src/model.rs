//! User profile records
//!
//! A `User` is an immutable snapshot: updates never mutate fields in place,
//! they replace the whole record (optimistic write, server confirmation, or
//! rollback). Differences between snapshots are expressed as JSON patches.

use serde::{Deserialize, Serialize};

/// A user profile snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user ID
    pub id: u64,

    /// Display name
    pub name: String,

    /// Contact email
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Postal address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Phone number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl User {
    /// Create a minimal user snapshot
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: None,
            address: None,
            phone: None,
        }
    }
}

/// Wire shape of the server's update response: `{ "user": { ... } }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserEnvelope {
    pub user: User,
}
