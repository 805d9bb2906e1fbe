use axum::extract::State;
use axum::Json;
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use crate::accounts;
use crate::auth::password;
use crate::db;
use crate::error::AppError;
use crate::extract::JsonBody;
use crate::middleware::audit;
use crate::models::{KycStatus, Role, UserProfile};
use crate::routes::auth::{issue_session, AuthResponse};
use crate::seed;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct SetupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub demo: bool,
}

#[derive(Serialize)]
pub struct SetupStatus {
    pub ready: bool,
    pub users: i64,
    pub deposits: i64,
}

pub async fn status(State(state): State<SharedState>) -> Result<Json<SetupStatus>, AppError> {
    let users = db::users::count_all(&state.pool).await?;
    let deposits = db::deposits::count_all(&state.pool).await?;
    Ok(Json(SetupStatus {
        ready: users > 0,
        users,
        deposits,
    }))
}

/// Create the first administrator. Only allowed while the database has no
/// users at all.
pub async fn bootstrap(
    State(state): State<SharedState>,
    JsonBody(req): JsonBody<SetupRequest>,
) -> Result<(CookieJar, Json<AuthResponse>), AppError> {
    let name = req.name.trim();
    let email = req.email.trim().to_lowercase();
    if name.is_empty() || email.is_empty() || req.password.is_empty() {
        return Err(AppError::BadRequest("All fields are required".to_string()));
    }
    password::check_length(&req.password).map_err(AppError::BadRequest)?;

    let pw_hash = password::hash(&req.password).map_err(AppError::Internal)?;

    // Advisory lock prevents concurrent bootstrap requests
    let mut tx = state.pool.begin().await?;
    db::users::lock_admin_set(&mut *tx).await?;

    if db::users::count_all(&mut *tx).await? > 0 {
        return Err(AppError::Forbidden("Setup has already been completed".to_string()));
    }

    let profile = UserProfile {
        country: Some(state.config.default_country.clone()),
        ..UserProfile::default()
    };
    let account_number = accounts::generate_account_number();
    let admin = db::users::create(
        &mut *tx,
        &db::users::NewUser {
            name,
            email: &email,
            password_hash: &pw_hash,
            role: Role::Admin,
            account_number: &account_number,
            kyc_status: KycStatus::Verified,
            profile: &profile,
        },
    )
    .await?;

    if req.demo {
        seed::demo_data(&mut tx).await?;
    }

    tx.commit().await?;

    tracing::info!("Setup completed by {}", admin.id);
    audit::log_event(
        &state.pool,
        Some(admin.id),
        "setup.completed",
        "user",
        admin.id,
        Some(serde_json::json!({ "demo": req.demo })),
    )
    .await;

    issue_session(&state, admin).await
}
