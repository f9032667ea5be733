//! User-related entity definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered user.
///
/// `username` and `email` are unique; `email` is stored lowercased. The
/// password hash never leaves the process: it is skipped on serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier.
    pub id: Uuid,
    /// Display handle. Trimmed, at least 3 characters.
    pub username: String,
    /// Login handle, lowercase-normalized.
    pub email: String,
    /// Bcrypt hash of the password.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Recipes this user has saved. No duplicates.
    #[serde(default)]
    pub saved_recipes: Vec<Uuid>,
    /// Users this user follows. No duplicates.
    #[serde(default)]
    pub following: Vec<Uuid>,
    /// When this record was created.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user. Callers pass the username trimmed and the email
    /// lowercased.
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            saved_recipes: Vec::new(),
            following: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Toggles a recipe in the saved set. Returns the new membership state.
    pub fn toggle_saved(&mut self, recipe_id: Uuid) -> bool {
        if let Some(pos) = self.saved_recipes.iter().position(|id| *id == recipe_id) {
            self.saved_recipes.remove(pos);
            false
        } else {
            self.saved_recipes.push(recipe_id);
            true
        }
    }

    /// Toggles a user in the following set. Returns the new membership state.
    pub fn toggle_following(&mut self, user_id: Uuid) -> bool {
        if let Some(pos) = self.following.iter().position(|id| *id == user_id) {
            self.following.remove(pos);
            false
        } else {
            self.following.push(user_id);
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_creation() {
        let user = User::new("alice", "alice@example.com", "hash");

        assert_eq!(user.username, "alice");
        assert_eq!(user.email, "alice@example.com");
        assert!(user.saved_recipes.is_empty());
        assert!(user.following.is_empty());
    }

    #[test]
    fn test_toggle_saved_round_trip() {
        let mut user = User::new("alice", "alice@example.com", "hash");
        let recipe_id = Uuid::new_v4();

        assert!(user.toggle_saved(recipe_id));
        assert_eq!(user.saved_recipes, vec![recipe_id]);

        // Toggling again restores the original membership.
        assert!(!user.toggle_saved(recipe_id));
        assert!(user.saved_recipes.is_empty());
    }

    #[test]
    fn test_toggle_saved_no_duplicates() {
        let mut user = User::new("alice", "alice@example.com", "hash");
        let recipe_id = Uuid::new_v4();

        user.toggle_saved(recipe_id);
        user.toggle_saved(recipe_id);
        user.toggle_saved(recipe_id);
        assert_eq!(user.saved_recipes, vec![recipe_id]);
    }

    #[test]
    fn test_toggle_following() {
        let mut user = User::new("alice", "alice@example.com", "hash");
        let other = Uuid::new_v4();

        assert!(user.toggle_following(other));
        assert!(!user.toggle_following(other));
        assert!(user.following.is_empty());
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let user = User::new("alice", "alice@example.com", "secret-hash");
        let value = serde_json::to_value(&user).unwrap();

        assert!(value.get("passwordHash").is_none());
        assert!(value.get("password_hash").is_none());
        assert_eq!(value["username"], "alice");
    }
}
