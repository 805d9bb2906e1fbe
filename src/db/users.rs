use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{KycStatus, Role, User, UserProfile};

pub struct NewUser<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub role: Role,
    pub account_number: &'a str,
    pub kyc_status: KycStatus,
    pub profile: &'a UserProfile,
}

/// Full replacement of the admin-editable fields of a user.
pub struct UserChanges<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub role: Role,
    pub account_number: &'a str,
    pub kyc_status: KycStatus,
    pub profile: &'a UserProfile,
    /// `None` keeps the current password.
    pub password_hash: Option<&'a str>,
}

pub async fn create<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    user: &NewUser<'_>,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "INSERT INTO users (name, email, password_hash, role, account_number, kyc_status,
                            street, postal_code, city, country,
                            reference_iban, reference_bic, reference_bank_name)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) RETURNING *",
    )
    .bind(user.name)
    .bind(user.email)
    .bind(user.password_hash)
    .bind(user.role)
    .bind(user.account_number)
    .bind(user.kyc_status)
    .bind(&user.profile.street)
    .bind(&user.profile.postal_code)
    .bind(&user.profile.city)
    .bind(&user.profile.country)
    .bind(&user.profile.reference_iban)
    .bind(&user.profile.reference_bic)
    .bind(&user.profile.reference_bank_name)
    .fetch_one(executor)
    .await
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = lower($1)")
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_id<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    id: Uuid,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(executor)
        .await
}

pub async fn find_by_id_for_update<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    id: Uuid,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1 FOR UPDATE")
        .bind(id)
        .fetch_optional(executor)
        .await
}

pub async fn email_taken_by_other(
    pool: &PgPool,
    email: &str,
    id: Uuid,
) -> Result<bool, sqlx::Error> {
    let row: (bool,) =
        sqlx::query_as("SELECT EXISTS (SELECT 1 FROM users WHERE email = lower($1) AND id <> $2)")
            .bind(email)
            .bind(id)
            .fetch_one(pool)
            .await?;
    Ok(row.0)
}

pub async fn count_all<'e, E: sqlx::PgExecutor<'e>>(executor: E) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(executor)
        .await?;
    Ok(row.0)
}

pub async fn count_admins<'e, E: sqlx::PgExecutor<'e>>(executor: E) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE role = 'admin'")
        .fetch_one(executor)
        .await?;
    Ok(row.0)
}

/// Serializes checks on the number of admins for the rest of the transaction.
pub async fn lock_admin_set<'e, E: sqlx::PgExecutor<'e>>(executor: E) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT pg_advisory_xact_lock(1)")
        .execute(executor)
        .await?;
    Ok(())
}

pub async fn list_all(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at DESC")
        .fetch_all(pool)
        .await
}

pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at DESC LIMIT $1")
        .bind(limit)
        .fetch_all(pool)
        .await
}

pub async fn update<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    id: Uuid,
    changes: &UserChanges<'_>,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "UPDATE users SET name = $2, email = $3, role = $4, account_number = $5, kyc_status = $6,
                street = $7, postal_code = $8, city = $9, country = $10,
                reference_iban = $11, reference_bic = $12, reference_bank_name = $13,
                password_hash = COALESCE($14, password_hash), updated_at = now()
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(changes.name)
    .bind(changes.email)
    .bind(changes.role)
    .bind(changes.account_number)
    .bind(changes.kyc_status)
    .bind(&changes.profile.street)
    .bind(&changes.profile.postal_code)
    .bind(&changes.profile.city)
    .bind(&changes.profile.country)
    .bind(&changes.profile.reference_iban)
    .bind(&changes.profile.reference_bic)
    .bind(&changes.profile.reference_bank_name)
    .bind(changes.password_hash)
    .fetch_one(executor)
    .await
}

pub async fn update_profile(
    pool: &PgPool,
    id: Uuid,
    profile: &UserProfile,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "UPDATE users SET street = $2, postal_code = $3, city = $4, country = $5,
                reference_iban = $6, reference_bic = $7, reference_bank_name = $8,
                updated_at = now()
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(&profile.street)
    .bind(&profile.postal_code)
    .bind(&profile.city)
    .bind(&profile.country)
    .bind(&profile.reference_iban)
    .bind(&profile.reference_bic)
    .bind(&profile.reference_bank_name)
    .fetch_one(pool)
    .await
}

pub async fn update_password(
    pool: &PgPool,
    id: Uuid,
    password_hash: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET password_hash = $2, updated_at = now() WHERE id = $1")
        .bind(id)
        .bind(password_hash)
        .execute(pool)
        .await?;
    Ok(())
}

/// Deposits and ledger entries of the user go with it.
pub async fn delete<'e, E: sqlx::PgExecutor<'e>>(executor: E, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(())
}
