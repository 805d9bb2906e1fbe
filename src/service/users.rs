use sqlx::PgConnection;
use uuid::Uuid;

use crate::db;
use crate::error::AppError;
use crate::models::{Role, User};

/// Reject changes that would leave the system without an administrator.
/// `user` is the current state of the account being changed.
async fn ensure_other_admin_exists(conn: &mut PgConnection, user: &User) -> Result<(), AppError> {
    if !user.is_admin() {
        return Ok(());
    }

    db::users::lock_admin_set(&mut *conn).await?;
    if db::users::count_admins(&mut *conn).await? <= 1 {
        return Err(AppError::Conflict(
            "The last administrator cannot be removed".to_string(),
        ));
    }
    Ok(())
}

/// Lock and load the user about to be edited, checking that a role change
/// does not demote the last administrator.
pub async fn lock_for_edit(
    conn: &mut PgConnection,
    id: Uuid,
    new_role: Option<Role>,
) -> Result<User, AppError> {
    let user = db::users::find_by_id_for_update(&mut *conn, id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    if new_role == Some(Role::User) {
        ensure_other_admin_exists(&mut *conn, &user).await?;
    }

    Ok(user)
}

/// Delete a user together with their deposits and ledger entries. Fails while
/// the user is the last admin or still owns an `aktiv` deposit.
pub async fn remove(conn: &mut PgConnection, id: Uuid) -> Result<User, AppError> {
    let user = db::users::find_by_id_for_update(&mut *conn, id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    ensure_other_admin_exists(&mut *conn, &user).await?;

    if db::deposits::count_active_for_user(&mut *conn, id).await? > 0 {
        return Err(AppError::Conflict(
            "Users with active deposits cannot be deleted".to_string(),
        ));
    }

    db::users::delete(&mut *conn, id).await?;
    Ok(user)
}
