//! User domain entity.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User domain entity.
///
/// A user whose `id` is [`Uuid::nil`] is the empty sentinel returned by
/// repositories when a lookup finds no row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct User {
    /// Unique user identifier
    #[cfg_attr(feature = "openapi", schema(example = "550e8400-e29b-41d4-a716-446655440000"))]
    pub id: Uuid,
    /// User display name
    #[cfg_attr(feature = "openapi", schema(example = "John Doe"))]
    pub name: String,
    /// User email address
    #[cfg_attr(feature = "openapi", schema(example = "john.doe@example.com"))]
    pub email: String,
}

impl User {
    /// Create a user with an already assigned identifier
    pub fn new(id: Uuid, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
        }
    }

    /// The "no such user" sentinel.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check if this is the empty sentinel
    pub fn is_empty(&self) -> bool {
        self.id.is_nil()
    }

    /// Overwrite the mutable fields. The identifier never changes.
    pub fn rename(&mut self, name: String, email: String) {
        self.name = name;
        self.email = email;
    }
}
