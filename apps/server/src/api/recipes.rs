//! Recipe API endpoints.

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use entities::Recipe;
use recipe_store::{RecipeStore, normalize_list};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::error::{ServerError, ServerResult};
use crate::middleware::{AuthenticatedUser, require_user};
use crate::services::ownership;
use crate::services::recipe_query::{self, RecipeListQuery, RecipePage};
use crate::state::AppState;

/// Parses a path segment as a recipe reference. A malformed identifier is
/// a client error, distinct from "not found".
fn parse_recipe_id(raw: &str) -> ServerResult<Uuid> {
    raw.parse()
        .map_err(|_| ServerError::MalformedId(raw.to_string()))
}

/// Lists recipes with filtering and pagination.
pub async fn list_recipes<S: RecipeStore>(
    State(state): State<Arc<AppState<S>>>,
    Query(query): Query<RecipeListQuery>,
) -> ServerResult<Json<RecipePage>> {
    let page = recipe_query::list(&state.store, &query).await?;
    Ok(Json(page))
}

/// Gets a single recipe by ID, instructions included.
pub async fn get_recipe<S: RecipeStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> ServerResult<Json<Recipe>> {
    let id = parse_recipe_id(&id)?;

    let recipe = state
        .store
        .get_recipe(id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Recipe not found".to_string()))?;

    Ok(Json(recipe))
}

/// Request body for creating a recipe.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecipeRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub ingredients: Option<Vec<String>>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub instructions: Option<String>,
}

/// Creates a recipe owned by the caller.
pub async fn create_recipe<S: RecipeStore>(
    State(state): State<Arc<AppState<S>>>,
    user: Option<Extension<AuthenticatedUser>>,
    Json(request): Json<CreateRecipeRequest>,
) -> ServerResult<(StatusCode, Json<Recipe>)> {
    let user = require_user(user)?;

    let title = request
        .title
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ServerError::Validation("Title is required.".to_string()))?;
    let description = request
        .description
        .ok_or_else(|| ServerError::Validation("Description is required.".to_string()))?;
    let instructions = request
        .instructions
        .filter(|i| !i.trim().is_empty())
        .ok_or_else(|| ServerError::Validation("Instructions are required.".to_string()))?;

    let ingredients = normalize_list(&request.ingredients.unwrap_or_default());
    if ingredients.is_empty() {
        return Err(ServerError::Validation(
            "At least one ingredient is required.".to_string(),
        ));
    }
    let tags = normalize_list(&request.tags);

    let recipe = Recipe::new(title, description, ingredients, instructions, user.id)
        .with_tags(tags);
    let recipe = state.store.create_recipe(recipe).await?;

    tracing::info!(recipe_id = %recipe.id, user_id = %user.id, "Recipe created");

    Ok((StatusCode::CREATED, Json(recipe)))
}

/// Request body for partially updating a recipe.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRecipeRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub ingredients: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub instructions: Option<String>,
}

/// Updates a recipe. Owner only.
pub async fn update_recipe<S: RecipeStore>(
    State(state): State<Arc<AppState<S>>>,
    user: Option<Extension<AuthenticatedUser>>,
    Path(id): Path<String>,
    Json(request): Json<UpdateRecipeRequest>,
) -> ServerResult<Json<Recipe>> {
    let user = require_user(user)?;
    let id = parse_recipe_id(&id)?;

    let mut recipe = state
        .store
        .get_recipe(id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Recipe not found".to_string()))?;

    if !ownership::is_owner(&recipe, user.id) {
        return Err(ServerError::Authorization(
            "You do not own this recipe.".to_string(),
        ));
    }

    if let Some(title) = request.title {
        if title.trim().is_empty() {
            return Err(ServerError::Validation(
                "Title must not be empty.".to_string(),
            ));
        }
        recipe.title = title;
    }
    if let Some(description) = request.description {
        recipe.description = description;
    }
    if let Some(ingredients) = request.ingredients {
        let ingredients = normalize_list(&ingredients);
        if ingredients.is_empty() {
            return Err(ServerError::Validation(
                "At least one ingredient is required.".to_string(),
            ));
        }
        recipe.ingredients = ingredients;
    }
    if let Some(tags) = request.tags {
        recipe.tags = normalize_list(&tags);
    }
    if let Some(instructions) = request.instructions {
        if instructions.trim().is_empty() {
            return Err(ServerError::Validation(
                "Instructions must not be empty.".to_string(),
            ));
        }
        recipe.instructions = instructions;
    }
    recipe.touch();

    let recipe = state.store.update_recipe(recipe).await?;

    tracing::info!(recipe_id = %id, user_id = %user.id, "Recipe updated");

    Ok(Json(recipe))
}

/// Deletes a recipe. Owner only.
pub async fn delete_recipe<S: RecipeStore>(
    State(state): State<Arc<AppState<S>>>,
    user: Option<Extension<AuthenticatedUser>>,
    Path(id): Path<String>,
) -> ServerResult<Json<serde_json::Value>> {
    let user = require_user(user)?;
    let id = parse_recipe_id(&id)?;

    let recipe = state
        .store
        .get_recipe(id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Recipe not found".to_string()))?;

    if !ownership::is_owner(&recipe, user.id) {
        return Err(ServerError::Authorization(
            "You do not own this recipe.".to_string(),
        ));
    }

    state.store.delete_recipe(id).await?;

    tracing::info!(recipe_id = %id, user_id = %user.id, "Recipe deleted");

    Ok(Json(json!({ "message": "Recipe deleted" })))
}

/// Response for a save toggle.
#[derive(Debug, Serialize)]
pub struct SaveRecipeResponse {
    /// Whether the recipe is in the caller's saved set after the toggle.
    pub saved: bool,
}

/// Toggles a recipe in the caller's saved set.
pub async fn toggle_save<S: RecipeStore>(
    State(state): State<Arc<AppState<S>>>,
    user: Option<Extension<AuthenticatedUser>>,
    Path(id): Path<String>,
) -> ServerResult<Json<SaveRecipeResponse>> {
    let user = require_user(user)?;
    let id = parse_recipe_id(&id)?;

    // Saving requires the recipe to exist right now; the saved set itself
    // tolerates entries whose recipe is deleted later.
    state
        .store
        .get_recipe(id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Recipe not found".to_string()))?;

    let mut caller = state
        .store
        .get_user(user.id)
        .await?
        .ok_or_else(|| ServerError::NotFound("User not found".to_string()))?;

    let saved = caller.toggle_saved(id);
    state.store.update_user(caller).await?;

    tracing::info!(recipe_id = %id, user_id = %user.id, saved, "Saved set toggled");

    Ok(Json(SaveRecipeResponse { saved }))
}
