use sqlx::PgPool;
use uuid::Uuid;

/// Record an audit event. Called explicitly in handlers after a mutation has
/// been committed; failures are logged and never fail the request.
pub async fn log_event(
    pool: &PgPool,
    user_id: Option<Uuid>,
    action: &str,
    resource_type: &str,
    resource_id: impl ToString,
    details: Option<serde_json::Value>,
) {
    let resource_id = resource_id.to_string();
    if let Err(e) = crate::db::audit::log_event(
        pool,
        user_id,
        action,
        resource_type,
        Some(resource_id.as_str()),
        details,
    )
    .await
    {
        tracing::error!("Failed to log audit event {action}: {e}");
    }
}
