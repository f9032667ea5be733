//! API endpoints.

pub mod auth;
pub mod recipes;
pub mod users;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use recipe_store::RecipeStore;

use crate::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router<S: RecipeStore + 'static>() -> Router<Arc<AppState<S>>> {
    Router::new()
        // Recipe endpoints
        .route(
            "/recipes",
            get(recipes::list_recipes).post(recipes::create_recipe),
        )
        .route(
            "/recipes/:id",
            get(recipes::get_recipe)
                .put(recipes::update_recipe)
                .delete(recipes::delete_recipe),
        )
        .route("/recipes/:id/save", post(recipes::toggle_save))
        // User endpoints
        .route("/user/search", get(users::search_users))
        .route("/user/:username", get(users::get_profile))
        .route("/user/:username/follow", post(users::toggle_follow))
        // Auth endpoints
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/me", get(auth::me))
        // Health check
        .route("/health", get(health_check))
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
