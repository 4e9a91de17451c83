/// User domain type
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Authenticated user as cached in the session store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Numeric user identifier
    pub id: i64,

    /// Login name
    #[serde(default)]
    pub username: String,
}

impl User {
    /// Create a new user
    pub fn new(id: i64, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
        }
    }

    /// Parse a stored user record
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Encode for storage
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
