//! Recipe store trait definitions.

use async_trait::async_trait;
use entities::{Recipe, User};
use uuid::Uuid;

use crate::{PagePlan, RecipeFilter, StoreResult};

/// Trait for recipe and user storage operations.
///
/// `list_recipes` and `count_recipes` are independent reads with no shared
/// snapshot: a concurrent insert or delete between the two calls can leave
/// a returned page and its total slightly inconsistent. Callers accept
/// this tradeoff rather than requiring a transactional store.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    // =========================================================================
    // User operations
    // =========================================================================

    /// Creates a new user. The store enforces username and email
    /// uniqueness and returns `AlreadyExists` on violation; caller-side
    /// existence pre-checks are a courtesy, not the authority.
    async fn create_user(&self, user: User) -> StoreResult<User>;

    /// Gets a user by ID.
    async fn get_user(&self, id: Uuid) -> StoreResult<Option<User>>;

    /// Gets a user by exact email (callers pass it lowercased).
    async fn get_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// Gets a user by exact username.
    async fn get_user_by_username(&self, username: &str) -> StoreResult<Option<User>>;

    /// Case-insensitive substring search on username.
    async fn search_users(&self, query: &str) -> StoreResult<Vec<User>>;

    /// Updates a user.
    async fn update_user(&self, user: User) -> StoreResult<User>;

    // =========================================================================
    // Recipe operations
    // =========================================================================

    /// Creates a new recipe.
    async fn create_recipe(&self, recipe: Recipe) -> StoreResult<Recipe>;

    /// Gets a recipe by ID.
    async fn get_recipe(&self, id: Uuid) -> StoreResult<Option<Recipe>>;

    /// Lists matching recipes sorted by creation time descending, with the
    /// plan's offset and limit applied.
    async fn list_recipes(
        &self,
        filter: &RecipeFilter,
        plan: &PagePlan,
    ) -> StoreResult<Vec<Recipe>>;

    /// Counts every recipe matching the filter, ignoring pagination.
    async fn count_recipes(&self, filter: &RecipeFilter) -> StoreResult<u64>;

    /// Updates a recipe.
    async fn update_recipe(&self, recipe: Recipe) -> StoreResult<Recipe>;

    /// Deletes a recipe.
    async fn delete_recipe(&self, id: Uuid) -> StoreResult<()>;
}
