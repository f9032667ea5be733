//! Recipe query service.
//!
//! Turns raw query parameters into a filter and a page plan, runs the page
//! and count reads against the store, and shapes the response envelope:
//! list items omit the heavy `instructions` field and carry the creator
//! expanded to a display name.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use entities::Recipe;
use recipe_store::{
    MatchMode, PageInfo, PagePlan, RecipeFilter, RecipeStore, tokenize_opt,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ServerResult;

/// Raw, wire-level query parameters for recipe listings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeListQuery {
    /// Comma-separated ingredient list.
    pub ingredients: Option<String>,
    /// "true" switches the ingredient constraint from ALL to ANY.
    pub any: Option<String>,
    /// Comma-separated tag list.
    pub tags: Option<String>,
    /// "true" switches the tag constraint from ALL to ANY.
    pub tags_any: Option<String>,
    /// Creator username.
    pub created_by: Option<String>,
    /// 1-based page number; garbage falls back to page 1.
    pub page: Option<String>,
}

/// The creator reference as expanded in list views.
#[derive(Debug, Clone, Serialize)]
pub struct CreatorRef {
    /// Creator user ID.
    pub id: Uuid,
    /// Creator display name.
    pub username: String,
}

/// A recipe as it appears in list views: `instructions` is omitted and the
/// creator reference is expanded.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeListItem {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub tags: Vec<String>,
    pub created_by: CreatorRef,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// One page of recipes plus its pagination envelope.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipePage {
    pub recipes: Vec<RecipeListItem>,
    pub pagination: PageInfo,
}

/// Interprets a wire-level boolean flag.
fn parse_flag(raw: Option<&str>) -> bool {
    matches!(raw.map(str::trim), Some("true") | Some("1"))
}

/// Lists recipes matching the raw query parameters.
pub async fn list<S: RecipeStore>(store: &S, query: &RecipeListQuery) -> ServerResult<RecipePage> {
    let plan = PagePlan::from_param(query.page.as_deref());

    let mut filter = RecipeFilter::new()
        .with_ingredients(
            tokenize_opt(query.ingredients.as_deref()),
            MatchMode::from_any_flag(parse_flag(query.any.as_deref())),
        )
        .with_tags(
            tokenize_opt(query.tags.as_deref()),
            MatchMode::from_any_flag(parse_flag(query.tags_any.as_deref())),
        );

    if let Some(creator) = query
        .created_by
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
    {
        match store.get_user_by_username(creator).await? {
            Some(user) => filter = filter.with_created_by(user.id),
            // Unknown creator: nothing can match, skip the reads entirely.
            None => {
                return Ok(RecipePage {
                    recipes: Vec::new(),
                    pagination: PageInfo::new(plan, 0, 0),
                });
            }
        }
    }

    run(store, filter, plan).await
}

/// Lists recipes created by one user (profile pages).
pub async fn list_by_creator<S: RecipeStore>(
    store: &S,
    creator: Uuid,
    plan: PagePlan,
) -> ServerResult<RecipePage> {
    run(store, RecipeFilter::new().with_created_by(creator), plan).await
}

async fn run<S: RecipeStore>(
    store: &S,
    filter: RecipeFilter,
    plan: PagePlan,
) -> ServerResult<RecipePage> {
    // Two independent reads; a concurrent writer can skew the total
    // relative to the page (see recipe_store::RecipeStore).
    let items = store.list_recipes(&filter, &plan).await?;
    let total = store.count_recipes(&filter).await?;

    let recipes = expand_creators(store, items).await?;
    let pagination = PageInfo::new(plan, total, recipes.len());

    Ok(RecipePage { recipes, pagination })
}

/// Projects recipes into list items, resolving creator usernames. A
/// creator that no longer exists degrades to its raw ID as display name.
async fn expand_creators<S: RecipeStore>(
    store: &S,
    items: Vec<Recipe>,
) -> ServerResult<Vec<RecipeListItem>> {
    let mut usernames: HashMap<Uuid, String> = HashMap::new();
    for recipe in &items {
        if !usernames.contains_key(&recipe.created_by) {
            let username = store
                .get_user(recipe.created_by)
                .await?
                .map(|u| u.username)
                .unwrap_or_else(|| recipe.created_by.to_string());
            usernames.insert(recipe.created_by, username);
        }
    }

    Ok(items
        .into_iter()
        .map(|recipe| RecipeListItem {
            id: recipe.id,
            title: recipe.title,
            description: recipe.description,
            ingredients: recipe.ingredients,
            tags: recipe.tags,
            created_by: CreatorRef {
                id: recipe.created_by,
                username: usernames[&recipe.created_by].clone(),
            },
            created_at: recipe.created_at,
            updated_at: recipe.updated_at,
        })
        .collect())
}
