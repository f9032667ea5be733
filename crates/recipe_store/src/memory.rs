//! In-memory recipe store implementation.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use entities::{Recipe, User};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{PagePlan, RecipeFilter, RecipeStore, StoreError, StoreResult};

/// In-memory recipe store. The default backing store and the test double.
#[derive(Debug, Default)]
pub struct MemoryRecipeStore {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
    recipes: Arc<RwLock<HashMap<Uuid, Recipe>>>,
}

impl MemoryRecipeStore {
    /// Creates a new in-memory recipe store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecipeStore for MemoryRecipeStore {
    // =========================================================================
    // User operations
    // =========================================================================

    async fn create_user(&self, user: User) -> StoreResult<User> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.id) {
            return Err(StoreError::already_exists("User", user.id.to_string()));
        }
        // Unique-index stand-in: this check, not any caller-side pre-check,
        // is the authority on email/username uniqueness.
        if users.values().any(|u| u.email == user.email) {
            return Err(StoreError::already_exists("User", user.email.clone()));
        }
        if users.values().any(|u| u.username == user.username) {
            return Err(StoreError::already_exists("User", user.username.clone()));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn get_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn search_users(&self, query: &str) -> StoreResult<Vec<User>> {
        let needle = query.to_lowercase();
        let users = self.users.read().await;
        let mut result: Vec<User> = users
            .values()
            .filter(|u| u.username.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        result.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(result)
    }

    async fn update_user(&self, user: User) -> StoreResult<User> {
        let mut users = self.users.write().await;
        if !users.contains_key(&user.id) {
            return Err(StoreError::not_found("User", user.id.to_string()));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    // =========================================================================
    // Recipe operations
    // =========================================================================

    async fn create_recipe(&self, recipe: Recipe) -> StoreResult<Recipe> {
        let mut recipes = self.recipes.write().await;
        if recipes.contains_key(&recipe.id) {
            return Err(StoreError::already_exists("Recipe", recipe.id.to_string()));
        }
        recipes.insert(recipe.id, recipe.clone());
        Ok(recipe)
    }

    async fn get_recipe(&self, id: Uuid) -> StoreResult<Option<Recipe>> {
        let recipes = self.recipes.read().await;
        Ok(recipes.get(&id).cloned())
    }

    async fn list_recipes(
        &self,
        filter: &RecipeFilter,
        plan: &PagePlan,
    ) -> StoreResult<Vec<Recipe>> {
        let recipes = self.recipes.read().await;
        let mut result: Vec<Recipe> = recipes
            .values()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let page: Vec<Recipe> = result
            .into_iter()
            .skip(plan.offset() as usize)
            .take(plan.limit() as usize)
            .collect();
        tracing::debug!(page = plan.page(), returned = page.len(), "Listed recipes");
        Ok(page)
    }

    async fn count_recipes(&self, filter: &RecipeFilter) -> StoreResult<u64> {
        let recipes = self.recipes.read().await;
        Ok(recipes.values().filter(|r| filter.matches(r)).count() as u64)
    }

    async fn update_recipe(&self, recipe: Recipe) -> StoreResult<Recipe> {
        let mut recipes = self.recipes.write().await;
        if !recipes.contains_key(&recipe.id) {
            return Err(StoreError::not_found("Recipe", recipe.id.to_string()));
        }
        recipes.insert(recipe.id, recipe.clone());
        Ok(recipe)
    }

    async fn delete_recipe(&self, id: Uuid) -> StoreResult<()> {
        let mut recipes = self.recipes.write().await;
        if recipes.remove(&id).is_none() {
            return Err(StoreError::not_found("Recipe", id.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MatchMode;
    use chrono::{Duration, Utc};

    fn recipe(title: &str, ingredients: &[&str], creator: Uuid) -> Recipe {
        Recipe::new(
            title,
            "d",
            ingredients.iter().map(|s| s.to_string()).collect(),
            "i",
            creator,
        )
    }

    #[tokio::test]
    async fn test_user_uniqueness() {
        let store = MemoryRecipeStore::new();

        let alice = User::new("alice", "alice@example.com", "hash");
        store.create_user(alice).await.unwrap();

        // Same email, different username.
        let dup_email = User::new("alice2", "alice@example.com", "hash");
        let err = store.create_user(dup_email).await.unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists { .. }));

        // Same username, different email.
        let dup_username = User::new("alice", "other@example.com", "hash");
        let err = store.create_user(dup_username).await.unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists { .. }));
    }

    #[tokio::test]
    async fn test_user_lookups() {
        let store = MemoryRecipeStore::new();
        let user = store
            .create_user(User::new("bob", "bob@example.com", "hash"))
            .await
            .unwrap();

        assert!(store.get_user(user.id).await.unwrap().is_some());
        assert!(store
            .get_user_by_email("bob@example.com")
            .await
            .unwrap()
            .is_some());
        assert!(store.get_user_by_username("bob").await.unwrap().is_some());
        assert!(store.get_user_by_username("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_search_users_is_case_insensitive_substring() {
        let store = MemoryRecipeStore::new();
        store
            .create_user(User::new("BakerBob", "bob@example.com", "hash"))
            .await
            .unwrap();
        store
            .create_user(User::new("alice", "alice@example.com", "hash"))
            .await
            .unwrap();

        let hits = store.search_users("baker").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].username, "BakerBob");

        assert!(store.search_users("zzz").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_recipe_crud() {
        let store = MemoryRecipeStore::new();
        let creator = Uuid::new_v4();

        let created = store
            .create_recipe(recipe("Cake", &["flour", "sugar"], creator))
            .await
            .unwrap();

        let mut fetched = store.get_recipe(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.title, "Cake");

        fetched.title = "Sponge Cake".to_string();
        fetched.touch();
        let updated = store.update_recipe(fetched).await.unwrap();
        assert!(updated.updated_at.is_some());

        store.delete_recipe(created.id).await.unwrap();
        assert!(store.get_recipe(created.id).await.unwrap().is_none());

        let err = store.delete_recipe(created.id).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_sorts_newest_first_and_paginates() {
        let store = MemoryRecipeStore::new();
        let creator = Uuid::new_v4();

        let mut old = recipe("Old", &["a"], creator);
        old.created_at = Utc::now() - Duration::hours(2);
        let mut mid = recipe("Mid", &["a"], creator);
        mid.created_at = Utc::now() - Duration::hours(1);
        let new = recipe("New", &["a"], creator);

        store.create_recipe(old).await.unwrap();
        store.create_recipe(new).await.unwrap();
        store.create_recipe(mid).await.unwrap();

        let filter = RecipeFilter::new();
        let listed = store
            .list_recipes(&filter, &PagePlan::new(1))
            .await
            .unwrap();
        let titles: Vec<&str> = listed.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["New", "Mid", "Old"]);

        // A page past the end is empty, not an error.
        let empty = store
            .list_recipes(&filter, &PagePlan::new(2))
            .await
            .unwrap();
        assert!(empty.is_empty());
    }

    #[tokio::test]
    async fn test_list_and_count_share_filter_semantics() {
        let store = MemoryRecipeStore::new();
        let creator = Uuid::new_v4();

        store
            .create_recipe(recipe("Cake", &["flour", "sugar"], creator))
            .await
            .unwrap();
        store
            .create_recipe(recipe("Soup", &["water", "salt"], creator))
            .await
            .unwrap();

        let filter = RecipeFilter::new()
            .with_ingredients(vec!["flour".to_string()], MatchMode::All);

        let listed = store
            .list_recipes(&filter, &PagePlan::new(1))
            .await
            .unwrap();
        let total = store.count_recipes(&filter).await.unwrap();

        assert_eq!(listed.len(), 1);
        assert_eq!(total, 1);
        assert_eq!(listed[0].title, "Cake");
    }
}
