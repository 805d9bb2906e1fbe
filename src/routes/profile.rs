use axum::extract::State;
use axum::Json;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::extract::JsonBody;
use crate::middleware::audit;
use crate::models::User;
use crate::routes::users::ProfilePatch;
use crate::state::SharedState;

/// Customers maintain their own address and reference account.
pub async fn update(
    auth: AuthUser,
    State(state): State<SharedState>,
    JsonBody(patch): JsonBody<ProfilePatch>,
) -> Result<Json<User>, AppError> {
    let user = db::users::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;

    let profile = patch.apply(user.profile())?;
    let user = db::users::update_profile(&state.pool, user.id, &profile).await?;

    audit::log_event(&state.pool, Some(user.id), "profile.updated", "user", user.id, None).await;

    Ok(Json(user))
}
