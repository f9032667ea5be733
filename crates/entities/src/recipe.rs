//! Recipe entity definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user-authored recipe.
///
/// `ingredients` and `tags` are stored trimmed and lowercased; anything
/// comparing user input against them must apply the same folding first
/// (see `recipe_store::normalize`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Unique identifier.
    pub id: Uuid,
    /// Recipe title.
    pub title: String,
    /// Short description.
    pub description: String,
    /// Ingredient list, normalized.
    pub ingredients: Vec<String>,
    /// Tags, normalized. May be empty.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Preparation instructions.
    pub instructions: String,
    /// Creator reference.
    pub created_by: Uuid,
    /// When this record was created. Never changes after insert.
    pub created_at: DateTime<Utc>,
    /// When this record was last mutated, if ever.
    pub updated_at: Option<DateTime<Utc>>,
}

impl Recipe {
    /// Creates a new recipe. Callers pass ingredients already normalized.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        ingredients: Vec<String>,
        instructions: impl Into<String>,
        created_by: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            ingredients,
            tags: Vec::new(),
            instructions: instructions.into(),
            created_by,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// Sets the tags. Callers pass tags already normalized.
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Stamps the mutation time.
    pub fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipe_creation() {
        let creator = Uuid::new_v4();
        let recipe = Recipe::new(
            "Pancakes",
            "Weekend breakfast",
            vec!["flour".to_string(), "milk".to_string()],
            "Mix and fry.",
            creator,
        )
        .with_tags(vec!["breakfast".to_string()]);

        assert_eq!(recipe.title, "Pancakes");
        assert_eq!(recipe.created_by, creator);
        assert_eq!(recipe.tags, vec!["breakfast"]);
        assert!(recipe.updated_at.is_none());
    }

    #[test]
    fn test_touch_sets_updated_at() {
        let mut recipe = Recipe::new(
            "Toast",
            "d",
            vec!["bread".to_string()],
            "Toast it.",
            Uuid::new_v4(),
        );
        recipe.touch();
        assert!(recipe.updated_at.is_some());
    }

    #[test]
    fn test_recipe_serializes_camel_case() {
        let recipe = Recipe::new(
            "Toast",
            "d",
            vec!["bread".to_string()],
            "Toast it.",
            Uuid::new_v4(),
        );
        let value = serde_json::to_value(&recipe).unwrap();

        assert!(value.get("createdBy").is_some());
        assert!(value.get("createdAt").is_some());
        assert!(value.get("created_by").is_none());
    }
}
