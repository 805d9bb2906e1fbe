use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;
use uuid::Uuid;

use crate::auth::jwt;
use crate::error::AppError;
use crate::models::Role;
use crate::state::SharedState;

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub role: Role,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Forbidden("Admin access required".to_string()))
        }
    }

    /// Admins may act on any user's data, everyone else only on their own.
    pub fn can_access(&self, owner_id: Uuid) -> bool {
        self.is_admin() || self.user_id == owner_id
    }

    /// The user filter to apply to a listing. Non-admins are pinned to
    /// themselves regardless of what they asked for.
    pub fn scope(&self, requested: Option<Uuid>) -> Option<Uuid> {
        if self.is_admin() {
            requested
        } else {
            Some(self.user_id)
        }
    }
}

impl FromRequestParts<SharedState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        // Bearer token first, then the access_token cookie
        let token = if let Some(auth_header) = parts.headers.get("authorization") {
            let auth_str = auth_header
                .to_str()
                .map_err(|_| AppError::Unauthorized("Invalid authorization header".to_string()))?;
            auth_str
                .strip_prefix("Bearer ")
                .map(str::to_string)
                .ok_or_else(|| AppError::Unauthorized("Unsupported authorization scheme".to_string()))?
        } else {
            CookieJar::from_headers(&parts.headers)
                .get("access_token")
                .map(|c| c.value().to_string())
                .ok_or_else(|| AppError::Unauthorized("Missing authentication token".to_string()))?
        };

        let claims = jwt::decode_token(&token, &state.config.jwt_secret)
            .map_err(|_| AppError::Unauthorized("Invalid or expired token".to_string()))?;

        Ok(AuthUser {
            user_id: claims.sub,
            role: claims.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn users_are_scoped_to_themselves() {
        let me = Uuid::now_v7();
        let other = Uuid::now_v7();
        let user = AuthUser { user_id: me, role: Role::User };
        assert_eq!(user.scope(Some(other)), Some(me));
        assert_eq!(user.scope(None), Some(me));
        assert!(user.can_access(me));
        assert!(!user.can_access(other));
        assert!(user.require_admin().is_err());
    }

    #[test]
    fn admins_see_what_they_ask_for() {
        let admin = AuthUser { user_id: Uuid::now_v7(), role: Role::Admin };
        let other = Uuid::now_v7();
        assert_eq!(admin.scope(Some(other)), Some(other));
        assert_eq!(admin.scope(None), None);
        assert!(admin.can_access(other));
        assert!(admin.require_admin().is_ok());
    }
}
