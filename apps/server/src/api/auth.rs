//! Authentication API endpoints: registration, login, current user.

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
};
use entities::User;
use recipe_store::{RecipeStore, StoreError};
use serde::{Deserialize, Serialize};

use crate::api::users::PublicUser;
use crate::error::{ServerError, ServerResult};
use crate::middleware::{AuthenticatedUser, require_user};
use crate::state::AppState;

/// Request body for registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Registers a new user.
pub async fn register<S: RecipeStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(request): Json<RegisterRequest>,
) -> ServerResult<(StatusCode, Json<PublicUser>)> {
    let username = request
        .username
        .as_deref()
        .map(str::trim)
        .filter(|u| u.chars().count() >= 3)
        .ok_or_else(|| {
            ServerError::Validation("Username must be at least 3 characters.".to_string())
        })?
        .to_string();

    let email = request
        .email
        .as_deref()
        .map(|e| e.trim().to_lowercase())
        .filter(|e| e.contains('@'))
        .ok_or_else(|| ServerError::Validation("A valid email is required.".to_string()))?;

    let password = request
        .password
        .filter(|p| p.len() >= 8)
        .ok_or_else(|| {
            ServerError::Validation("Password must be at least 8 characters.".to_string())
        })?;

    // Friendly pre-checks. The store's uniqueness enforcement below is the
    // actual authority; a concurrent registration can still slip past these.
    if state.store.get_user_by_email(&email).await?.is_some() {
        return Err(ServerError::Conflict("Email already in use.".to_string()));
    }
    if state
        .store
        .get_user_by_username(&username)
        .await?
        .is_some()
    {
        return Err(ServerError::Conflict("Username already in use.".to_string()));
    }

    let password_hash = auth::hash_password(&password)?;
    let user = User::new(username, email.clone(), password_hash);

    let user = match state.store.create_user(user).await {
        Ok(user) => user,
        // Lost the race: translate to the same message the pre-check gives.
        Err(StoreError::AlreadyExists { id, .. }) => {
            let message = if id == email {
                "Email already in use."
            } else {
                "Username already in use."
            };
            return Err(ServerError::Conflict(message.to_string()));
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(user_id = %user.id, "User registered");

    Ok((StatusCode::CREATED, Json(PublicUser::from(&user))))
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Response for a successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: PublicUser,
}

/// Verifies credentials and issues an access token.
pub async fn login<S: RecipeStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(request): Json<LoginRequest>,
) -> ServerResult<Json<LoginResponse>> {
    let email = request
        .email
        .as_deref()
        .map(|e| e.trim().to_lowercase())
        .filter(|e| !e.is_empty())
        .ok_or_else(|| ServerError::Validation("Email is required.".to_string()))?;
    let password = request
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ServerError::Validation("Password is required.".to_string()))?;

    // One message for both unknown email and wrong password.
    let invalid =
        || ServerError::Authentication("Invalid email or password.".to_string());

    let user = state
        .store
        .get_user_by_email(&email)
        .await?
        .ok_or_else(invalid)?;

    if !auth::verify_password(&password, &user.password_hash)? {
        return Err(invalid());
    }

    let token = state.jwt_manager.generate_token(user.id)?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(LoginResponse {
        token,
        user: PublicUser::from(&user),
    }))
}

/// Gets the caller's own record. The password hash is skipped on
/// serialization; email and social sets are included.
pub async fn me<S: RecipeStore>(
    State(state): State<Arc<AppState<S>>>,
    user: Option<Extension<AuthenticatedUser>>,
) -> ServerResult<Json<User>> {
    let user = require_user(user)?;

    let record = state
        .store
        .get_user(user.id)
        .await?
        .ok_or_else(|| ServerError::NotFound("User not found".to_string()))?;

    Ok(Json(record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use auth::{JwtConfig, JwtManager};
    use recipe_store::MemoryRecipeStore;

    use crate::config::Config;

    fn test_state() -> Arc<AppState<MemoryRecipeStore>> {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 0,
            jwt_secret: "test-secret-long-enough".to_string(),
            jwt_expiration_hours: 1,
            log_level: "info".to_string(),
        };
        let jwt_manager = JwtManager::new(JwtConfig::new(config.jwt_secret.clone()));
        Arc::new(AppState::new(config, MemoryRecipeStore::new(), jwt_manager))
    }

    fn registration(username: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            username: Some(username.to_string()),
            email: Some(email.to_string()),
            password: Some(password.to_string()),
        }
    }

    #[tokio::test]
    async fn test_register_validates_fields() {
        let state = test_state();

        let result = register(
            State(state.clone()),
            Json(registration("ab", "a@example.com", "password123")),
        )
        .await;
        assert!(matches!(result, Err(ServerError::Validation(_))));

        let result = register(
            State(state.clone()),
            Json(registration("alice", "not-an-email", "password123")),
        )
        .await;
        assert!(matches!(result, Err(ServerError::Validation(_))));

        let result = register(
            State(state),
            Json(registration("alice", "a@example.com", "short")),
        )
        .await;
        assert!(matches!(result, Err(ServerError::Validation(_))));
    }

    #[tokio::test]
    async fn test_register_normalizes_email_and_rejects_case_variant_duplicates() {
        let state = test_state();

        let (status, Json(user)) = register(
            State(state.clone()),
            Json(registration("alice", "Alice@Example.COM", "password123")),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(user.username, "alice");

        let stored = state.store.get_user(user.id).await.unwrap().unwrap();
        assert_eq!(stored.email, "alice@example.com");

        // Same email differing only by case: the duplicate-email message,
        // not a generic failure.
        let result = register(
            State(state),
            Json(registration("alice2", "ALICE@example.com", "password123")),
        )
        .await;
        match result {
            Err(ServerError::Conflict(message)) => {
                assert_eq!(message, "Email already in use.")
            }
            other => panic!("expected Conflict, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_username() {
        let state = test_state();

        register(
            State(state.clone()),
            Json(registration("alice", "a@example.com", "password123")),
        )
        .await
        .unwrap();

        let result = register(
            State(state),
            Json(registration("alice", "b@example.com", "password123")),
        )
        .await;
        match result {
            Err(ServerError::Conflict(message)) => {
                assert_eq!(message, "Username already in use.")
            }
            other => panic!("expected Conflict, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_login_round_trip_and_token_subject() {
        let state = test_state();

        let (_, Json(registered)) = register(
            State(state.clone()),
            Json(registration("alice", "a@example.com", "password123")),
        )
        .await
        .unwrap();

        let Json(response) = login(
            State(state.clone()),
            Json(LoginRequest {
                email: Some("A@Example.com".to_string()),
                password: Some("password123".to_string()),
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.user.id, registered.id);
        let claims = state.jwt_manager.validate_token(&response.token).unwrap();
        assert_eq!(claims.user_id().unwrap(), registered.id);
    }

    #[tokio::test]
    async fn test_login_rejects_bad_credentials_uniformly() {
        let state = test_state();

        register(
            State(state.clone()),
            Json(registration("alice", "a@example.com", "password123")),
        )
        .await
        .unwrap();

        let wrong_password = login(
            State(state.clone()),
            Json(LoginRequest {
                email: Some("a@example.com".to_string()),
                password: Some("wrong-password".to_string()),
            }),
        )
        .await;
        let unknown_email = login(
            State(state),
            Json(LoginRequest {
                email: Some("nobody@example.com".to_string()),
                password: Some("password123".to_string()),
            }),
        )
        .await;

        for result in [wrong_password, unknown_email] {
            match result {
                Err(ServerError::Authentication(message)) => {
                    assert_eq!(message, "Invalid email or password.")
                }
                other => panic!("expected Authentication, got {other:?}"),
            }
        }
    }
}
