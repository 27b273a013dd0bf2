use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use wedplan_core::error::CoreError;
use wedplan_core::seating::planner::PlannerError;
use wedplan_core::seating::store::StoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `wedplan_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A rejected or failed seating operation, carrying the user notice.
    #[error(transparent)]
    Planner(#[from] PlannerError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Core(CoreError::Validation(errors.to_string()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Seating planner ---
            AppError::Planner(err) => classify_planner_error(err),

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Map a planner error to status and code. The message starts with the
/// translated notice, followed by the store's detail where it is safe to show.
fn classify_planner_error(err: &PlannerError) -> (StatusCode, &'static str, String) {
    let message = err.notice().message.clone();
    match err {
        PlannerError::Permission(_) => (StatusCode::FORBIDDEN, "FORBIDDEN", message),
        PlannerError::SeatOccupied(_) => (StatusCode::CONFLICT, "SEAT_OCCUPIED", message),
        PlannerError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND", message),
        PlannerError::Invalid { detail, .. } => (
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            format!("{message} {detail}"),
        ),
        PlannerError::Persistence { source, .. } => match source {
            StoreError::NotFound { .. } => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("{message} {source}"),
            ),
            StoreError::Conflict(_) => (
                StatusCode::CONFLICT,
                "CONFLICT",
                format!("{message} {source}"),
            ),
            // Backend text is raw driver output; it is logged, not returned.
            StoreError::Backend(detail) => {
                tracing::error!(error = %detail, "Seating store failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "SAVE_FAILED", message)
            }
        },
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Foreign key violations (constraint name starting with `fk_`) map to 400.
/// - Check constraint violations (constraint name starting with `ck_`) map to 400.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            let constraint = db_err.constraint().unwrap_or("unknown");
            match db_err.code().as_deref() {
                // PostgreSQL unique constraint violation
                Some("23505") if constraint.starts_with("uq_") => {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
                // Foreign key violation
                Some("23503") if constraint.starts_with("fk_") => {
                    return (
                        StatusCode::BAD_REQUEST,
                        "VALIDATION_ERROR",
                        format!("Referenced record does not exist: {constraint}"),
                    );
                }
                // Check constraint violation
                Some("23514") if constraint.starts_with("ck_") => {
                    return (
                        StatusCode::BAD_REQUEST,
                        "VALIDATION_ERROR",
                        format!("Value violates check constraint: {constraint}"),
                    );
                }
                _ => {}
            }
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wedplan_core::seating::planner::Notice;

    fn save_failed(source: StoreError) -> PlannerError {
        PlannerError::Persistence {
            notice: Notice {
                key: "save_failed",
                message: "Saving failed.".into(),
            },
            source,
        }
    }

    async fn body_of(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn conflict_carries_store_detail() {
        let err = save_failed(StoreError::Conflict("seat 4 already taken".into()));
        let (status, body) = body_of(AppError::Planner(err)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "Saving failed. Conflict: seat 4 already taken");
    }

    #[tokio::test]
    async fn backend_failure_returns_notice_only() {
        let err = save_failed(StoreError::Backend("connection reset by peer".into()));
        let (status, body) = body_of(AppError::Planner(err)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], "SAVE_FAILED");
        assert_eq!(body["error"], "Saving failed.");
    }
}
