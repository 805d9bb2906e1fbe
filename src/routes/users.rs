use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::accounts;
use crate::auth::extractor::AuthUser;
use crate::auth::password;
use crate::db;
use crate::error::AppError;
use crate::extract::JsonBody;
use crate::middleware::audit;
use crate::models::{KycStatus, Role, User, UserProfile};
use crate::service;
use crate::state::SharedState;

const ACCOUNT_NUMBER_ATTEMPTS: usize = 3;

/// Changes to the address and reference account. An absent field keeps its
/// value and an empty string clears it.
#[derive(Debug, Default, Deserialize)]
pub struct ProfilePatch {
    pub street: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub reference_iban: Option<String>,
    pub reference_bic: Option<String>,
    pub reference_bank_name: Option<String>,
}

impl ProfilePatch {
    pub fn apply(self, mut profile: UserProfile) -> Result<UserProfile, AppError> {
        fn merge(slot: &mut Option<String>, value: Option<String>) {
            if let Some(v) = value {
                let v = v.trim();
                *slot = (!v.is_empty()).then(|| v.to_string());
            }
        }

        merge(&mut profile.street, self.street);
        merge(&mut profile.postal_code, self.postal_code);
        merge(&mut profile.city, self.city);
        merge(&mut profile.country, self.country);
        merge(&mut profile.reference_iban, self.reference_iban);
        merge(&mut profile.reference_bic, self.reference_bic);
        merge(&mut profile.reference_bank_name, self.reference_bank_name);

        profile.reference_iban = profile
            .reference_iban
            .as_deref()
            .map(accounts::normalize_iban)
            .transpose()
            .map_err(AppError::BadRequest)?;
        profile.reference_bic = profile
            .reference_bic
            .as_deref()
            .map(accounts::normalize_bic)
            .transpose()
            .map_err(AppError::BadRequest)?;

        Ok(profile)
    }
}

#[derive(Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password: Option<String>,
    pub role: Option<Role>,
    pub account_number: Option<String>,
    pub kyc_status: Option<KycStatus>,
    #[serde(flatten)]
    pub profile: ProfilePatch,
}

#[derive(Deserialize)]
pub struct UpdateUser {
    pub name: String,
    pub email: String,
    pub password: Option<String>,
    pub role: Option<Role>,
    pub account_number: Option<String>,
    pub kyc_status: Option<KycStatus>,
    #[serde(flatten)]
    pub profile: ProfilePatch,
}

#[derive(Serialize)]
pub struct CreatedUser {
    #[serde(flatten)]
    pub user: User,
    /// Only present when the password was generated by the server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_password: Option<String>,
}

#[derive(Serialize)]
pub struct UserStats {
    pub deposits: i64,
    pub transactions: i64,
}

#[derive(Serialize)]
pub struct UserDetail {
    #[serde(flatten)]
    pub user: User,
    pub stats: UserStats,
}

fn required_identity(name: &str, email: &str) -> Result<(String, String), AppError> {
    let name = name.trim();
    let email = email.trim().to_lowercase();
    if name.is_empty() || email.is_empty() {
        return Err(AppError::BadRequest("Name and email are required".to_string()));
    }
    if !email.contains('@') {
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    }
    Ok((name.to_string(), email))
}

pub async fn list(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Vec<User>>, AppError> {
    auth.require_admin()?;
    let users = db::users::list_all(&state.pool).await?;
    Ok(Json(users))
}

pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    JsonBody(req): JsonBody<CreateUser>,
) -> Result<Json<CreatedUser>, AppError> {
    auth.require_admin()?;

    let (name, email) = required_identity(&req.name, &req.email)?;

    let initial_password = match &req.password {
        Some(pw) => {
            password::check_length(pw).map_err(AppError::BadRequest)?;
            None
        }
        None => Some(accounts::generate_initial_password()),
    };
    let plain = req
        .password
        .as_deref()
        .or(initial_password.as_deref())
        .unwrap_or_default();
    let pw_hash = password::hash(plain).map_err(AppError::Internal)?;

    let defaults = UserProfile {
        country: Some(state.config.default_country.clone()),
        ..UserProfile::default()
    };
    let profile = req.profile.apply(defaults)?;

    let explicit_number = req
        .account_number
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty());

    let mut attempt = 0;
    let user = loop {
        attempt += 1;
        let account_number = explicit_number
            .map(str::to_string)
            .unwrap_or_else(accounts::generate_account_number);

        let result = db::users::create(
            &state.pool,
            &db::users::NewUser {
                name: &name,
                email: &email,
                password_hash: &pw_hash,
                role: req.role.unwrap_or(Role::User),
                account_number: &account_number,
                kyc_status: req.kyc_status.unwrap_or(KycStatus::Pending),
                profile: &profile,
            },
        )
        .await;

        match result {
            Ok(user) => break user,
            Err(sqlx::Error::Database(ref db_err))
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some("users_account_number_key")
                    && explicit_number.is_none()
                    && attempt < ACCOUNT_NUMBER_ATTEMPTS =>
            {
                tracing::debug!("Generated account number collided, retrying");
            }
            Err(sqlx::Error::Database(ref db_err))
                if db_err.constraint() == Some("users_account_number_key") =>
            {
                return Err(AppError::Conflict(
                    "A user with this account number already exists".to_string(),
                ));
            }
            Err(e) => {
                return Err(AppError::unique_as_conflict(
                    e,
                    "A user with this email already exists",
                ));
            }
        }
    };

    audit::log_event(&state.pool, Some(auth.user_id), "user.created", "user", user.id, None).await;

    Ok(Json(CreatedUser {
        user,
        initial_password,
    }))
}

pub async fn get(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserDetail>, AppError> {
    auth.require_admin()?;

    let user = db::users::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
    let (deposits, transactions) = db::stats::user_counts(&state.pool, id).await?;

    Ok(Json(UserDetail {
        user,
        stats: UserStats {
            deposits,
            transactions,
        },
    }))
}

pub async fn update(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    JsonBody(req): JsonBody<UpdateUser>,
) -> Result<Json<User>, AppError> {
    auth.require_admin()?;

    let (name, email) = required_identity(&req.name, &req.email)?;

    let pw_hash = match req.password.as_deref().filter(|p| !p.is_empty()) {
        Some(pw) => {
            password::check_length(pw).map_err(AppError::BadRequest)?;
            Some(password::hash(pw).map_err(AppError::Internal)?)
        }
        None => None,
    };

    if db::users::email_taken_by_other(&state.pool, &email, id).await? {
        return Err(AppError::Conflict("This email is already in use".to_string()));
    }

    let mut tx = state.pool.begin().await?;
    let existing = service::users::lock_for_edit(&mut *tx, id, req.role).await?;

    let profile = req.profile.apply(existing.profile())?;
    let account_number = req
        .account_number
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(&existing.account_number)
        .to_string();

    let user = db::users::update(
        &mut *tx,
        id,
        &db::users::UserChanges {
            name: &name,
            email: &email,
            role: req.role.unwrap_or(existing.role),
            account_number: &account_number,
            kyc_status: req.kyc_status.unwrap_or(existing.kyc_status),
            profile: &profile,
            password_hash: pw_hash.as_deref(),
        },
    )
    .await
    .map_err(|e| AppError::unique_as_conflict(e, "Email or account number already in use"))?;

    tx.commit().await?;

    if pw_hash.is_some() {
        db::refresh_tokens::delete_all_for_user(&state.pool, id).await?;
    }

    audit::log_event(
        &state.pool,
        Some(auth.user_id),
        "user.updated",
        "user",
        id,
        Some(serde_json::json!({
            "role": user.role,
            "kyc_status": user.kyc_status,
            "password_changed": pw_hash.is_some(),
        })),
    )
    .await;

    Ok(Json(user))
}

pub async fn delete(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    auth.require_admin()?;

    let mut tx = state.pool.begin().await?;
    let removed = service::users::remove(&mut *tx, id).await?;
    tx.commit().await?;

    tracing::info!("User {} deleted by {}", removed.id, auth.user_id);
    audit::log_event(
        &state.pool,
        Some(auth.user_id),
        "user.deleted",
        "user",
        id,
        Some(serde_json::json!({ "email": removed.email })),
    )
    .await;

    Ok(Json(serde_json::json!({ "message": "Deleted" })))
}
