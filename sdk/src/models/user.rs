use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// `UserId` represents the unique identifier (numeric) of the user.
pub type UserId = u64;

/// `User` represents a single record of the user management services.
/// It consists of the following fields:
/// - `id`: the unique identifier (numeric) of the user.
/// - `name`: the display name of the user.
/// - `email`: the email address of the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// The unique identifier (numeric) of the user.
    pub id: UserId,
    /// The display name of the user.
    pub name: String,
    /// The email address of the user.
    pub email: String,
}

/// `UserCreate` is the payload used to create a new user, the ID is assigned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCreate {
    pub name: String,
    pub email: String,
}

/// `UserUpdate` is the payload used to update an existing user.
/// Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl User {
    pub fn new(id: UserId, name: &str, email: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            email: email.to_string(),
        }
    }

    /// Case-insensitive substring match on the name or the email.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query) || self.email.to_lowercase().contains(&query)
    }
}

impl UserUpdate {
    pub fn new(name: Option<&str>, email: Option<&str>) -> Self {
        Self {
            name: name.filter(|n| !n.is_empty()).map(|n| n.to_string()),
            email: email.filter(|e| !e.is_empty()).map(|e| e.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}

impl Display for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}|{}|{}", self.id, self.name, self.email)
    }
}
