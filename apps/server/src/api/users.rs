//! User API endpoints: public profiles, search, and following.

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use chrono::{DateTime, Utc};
use entities::User;
use recipe_store::{PagePlan, PageInfo, RecipeStore};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ServerError, ServerResult};
use crate::middleware::{AuthenticatedUser, require_user};
use crate::services::recipe_query::{self, RecipeListItem};
use crate::state::AppState;

/// User fields safe to expose publicly. Email and password hash stay out.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: Uuid,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            created_at: user.created_at,
        }
    }
}

/// Query parameters for a profile page.
#[derive(Debug, Default, Deserialize)]
pub struct ProfileQuery {
    /// 1-based page number over the user's recipes.
    pub page: Option<String>,
}

/// A public profile with the user's recipes, paginated.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileResponse {
    pub user_info: PublicUser,
    pub user_recipes: Vec<RecipeListItem>,
    pub pagination: PageInfo,
}

/// Gets a user's public profile and their recipes.
pub async fn get_profile<S: RecipeStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(username): Path<String>,
    Query(query): Query<ProfileQuery>,
) -> ServerResult<Json<UserProfileResponse>> {
    let user = state
        .store
        .get_user_by_username(&username)
        .await?
        .ok_or_else(|| ServerError::NotFound("User not found".to_string()))?;

    let plan = PagePlan::from_param(query.page.as_deref());
    let page = recipe_query::list_by_creator(&state.store, user.id, plan).await?;

    Ok(Json(UserProfileResponse {
        user_info: PublicUser::from(&user),
        user_recipes: page.recipes,
        pagination: page.pagination,
    }))
}

/// Query parameters for user search.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// Response for user search.
#[derive(Debug, Serialize)]
pub struct UserSearchResponse {
    pub users: Vec<PublicUser>,
}

/// Case-insensitive substring search on usernames.
pub async fn search_users<S: RecipeStore>(
    State(state): State<Arc<AppState<S>>>,
    Query(query): Query<SearchQuery>,
) -> ServerResult<Json<UserSearchResponse>> {
    let needle = query
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| {
            ServerError::Validation("Query parameter 'q' is required.".to_string())
        })?;

    let users = state.store.search_users(needle).await?;

    Ok(Json(UserSearchResponse {
        users: users.iter().map(PublicUser::from).collect(),
    }))
}

/// Response for a follow toggle.
#[derive(Debug, Serialize)]
pub struct FollowResponse {
    /// Whether the caller follows the target after the toggle.
    pub following: bool,
}

/// Toggles a user in the caller's following set. The path segment is the
/// target user's ID.
pub async fn toggle_follow<S: RecipeStore>(
    State(state): State<Arc<AppState<S>>>,
    user: Option<Extension<AuthenticatedUser>>,
    Path(target): Path<String>,
) -> ServerResult<Json<FollowResponse>> {
    let user = require_user(user)?;
    let target_id: Uuid = target
        .parse()
        .map_err(|_| ServerError::MalformedId(target.clone()))?;

    state
        .store
        .get_user(target_id)
        .await?
        .ok_or_else(|| ServerError::NotFound("User not found".to_string()))?;

    let mut caller = state
        .store
        .get_user(user.id)
        .await?
        .ok_or_else(|| ServerError::NotFound("User not found".to_string()))?;

    let following = caller.toggle_following(target_id);
    state.store.update_user(caller).await?;

    tracing::info!(user_id = %user.id, target_id = %target_id, following, "Following set toggled");

    Ok(Json(FollowResponse { following }))
}
