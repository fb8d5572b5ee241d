use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde_json::json;

pub type ApiResult<T, E = ApiError> = std::result::Result<T, E>;

/// HTTP error taxonomy. Everything that is not explicitly client caused
/// collapses into [ApiError::Internal], whose detail is logged but never
/// serialized to the caller.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("not found")]
    NotFound,

    #[error("{0} already exists")]
    Conflict(&'static str),

    #[error("author not found")]
    AuthorNotFound,

    #[error("author has dependent news")]
    AuthorInUse,

    #[error("internal error")]
    Internal(#[source] newsroom_dal::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_)
            | ApiError::Conflict(_)
            | ApiError::AuthorNotFound
            | ApiError::AuthorInUse => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(source) = &self {
            tracing::error!("Internal error: {source}");
        }
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<newsroom_dal::Error> for ApiError {
    fn from(error: newsroom_dal::Error) -> Self {
        use newsroom_dal::Error as DalError;
        match error {
            DalError::RecordNotFound(_) => ApiError::NotFound,
            DalError::AlreadyExists(field) => ApiError::Conflict(field),
            DalError::AuthorNotFound(_) => ApiError::AuthorNotFound,
            DalError::AuthorInUse(_) => ApiError::AuthorInUse,
            error @ DalError::Database(_) => ApiError::Internal(error),
        }
    }
}

impl From<garde::Report> for ApiError {
    fn from(report: garde::Report) -> Self {
        ApiError::InvalidRequest(report.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::InvalidRequest(rejection.body_text())
    }
}
