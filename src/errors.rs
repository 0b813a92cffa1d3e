use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use thiserror::Error;
use tracing::error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Argon 2 Error: {0}")]
    Argon2Error(#[from] argon2::password_hash::Error),

    #[error("Jason web token Error: {0}")]
    JwTError(#[from] jsonwebtoken::errors::Error),

    #[error("SurrealDb Error: {0}")]
    SurrealError(#[from] surrealdb::Error),

    #[error("Io Error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Axum Error: {0}")]
    AxumError(#[from] axum::Error),

    #[error("Http Error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Validator Error: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Json Rejection Error: {0}")]
    AxumJsonRejection(#[from] axum::extract::rejection::JsonRejection),

    #[error("Config Error: {0}")]
    ConfigError(String),

    #[error("Invalid login detail")]
    InvalidLoginDetails,

    #[error("User with email `{0}` already exists!")]
    EmailExist(String),

    #[error("User not found")]
    UserNotFound,

    #[error("Group not found")]
    GroupNotFound,

    #[error("Leader FCM token not found")]
    LeaderTokenNotFound,

    #[error("No matching approval request found")]
    ApprovalRequestNotFound,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("User is not authorized as a leader")]
    NotLeader,

    #[error("User is already a member of this group")]
    AlreadyMember,

    #[error("An invitation has already been sent to this user")]
    AlreadyInvited,

    #[error("Notification dispatch failed: {0}")]
    NotificationFailed(String),

    #[error("Internal Server Error")]
    InternalServerError,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    status: &'static str,
    code: &'static str,
    message: String,
}

impl Error {
    /// Stable machine-readable code surfaced to callers in place of internal
    /// error text.
    pub fn code(&self) -> &'static str {
        match self {
            Error::Argon2Error(_)
            | Error::JwTError(_)
            | Error::SurrealError(_)
            | Error::IoError(_)
            | Error::AxumError(_)
            | Error::HttpError(_)
            | Error::ConfigError(_)
            | Error::NotificationFailed(_)
            | Error::InternalServerError => "internal_error",
            Error::ValidationError(_) | Error::AxumJsonRejection(_) => "validation_error",
            Error::InvalidLoginDetails => "invalid_login",
            Error::EmailExist(_) => "email_taken",
            Error::UserNotFound => "user_not_found",
            Error::GroupNotFound => "group_not_found",
            Error::LeaderTokenNotFound => "leader_token_not_found",
            Error::ApprovalRequestNotFound => "approval_request_not_found",
            Error::Unauthorized => "unauthorized",
            Error::NotLeader => "not_leader",
            Error::AlreadyMember => "already_member",
            Error::AlreadyInvited => "already_invited",
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            Error::Argon2Error(error) => {
                error!("Argon 2 Error:{:#?}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Error".to_string(),
                )
            }
            Error::JwTError(error) => {
                error!("JWT Error:{:#?}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Error".to_string(),
                )
            }
            Error::SurrealError(error) => {
                error!("Surreal Error:{:#?}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Error".to_string(),
                )
            }
            Error::IoError(error) => {
                error!("Io Error:{:#?}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Error".to_string(),
                )
            }
            Error::AxumError(error) => {
                error!("Axum Error:{:#?}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Error".to_string(),
                )
            }
            Error::HttpError(error) => {
                error!("Http Error:{:#?}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Error".to_string(),
                )
            }
            Error::ConfigError(error) => {
                error!("Config Error:{:#?}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Error".to_string(),
                )
            }
            Error::NotificationFailed(error) => {
                error!("Notification Error:{:#?}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error sending notification".to_string(),
                )
            }
            Error::InternalServerError => {
                error!("Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Error".to_string(),
                )
            }
            Error::ValidationError(error) => {
                let message = format!("Input validation error: [{}]", error).replace('\n', ", ");
                error!("Validation Error:{:#?}", error);
                (StatusCode::BAD_REQUEST, message)
            }
            Error::AxumJsonRejection(error) => {
                error!("Axum Json Rejection Error:{:#?}", error);
                (StatusCode::BAD_REQUEST, error.to_string())
            }
            Error::InvalidLoginDetails => {
                (StatusCode::BAD_REQUEST, "Invalid login details".to_string())
            }
            Error::EmailExist(_) => (
                StatusCode::BAD_REQUEST,
                "Email is already registered".to_string(),
            ),
            Error::UserNotFound => (StatusCode::NOT_FOUND, "User not found".to_string()),
            Error::GroupNotFound => (StatusCode::NOT_FOUND, "Group not found".to_string()),
            Error::LeaderTokenNotFound => (
                StatusCode::NOT_FOUND,
                "Leader FCM token not found".to_string(),
            ),
            Error::ApprovalRequestNotFound => (
                StatusCode::NOT_FOUND,
                "No pending approval requests found".to_string(),
            ),
            Error::Unauthorized => (StatusCode::FORBIDDEN, "Unauthorized".to_string()),
            Error::NotLeader => (
                StatusCode::FORBIDDEN,
                "User is not authorized as a leader".to_string(),
            ),
            Error::AlreadyMember => (
                StatusCode::CONFLICT,
                "User is already a member of this group".to_string(),
            ),
            Error::AlreadyInvited => (
                StatusCode::CONFLICT,
                "An invitation has already been sent to this user".to_string(),
            ),
        };
        let body = ErrorBody {
            status: "error",
            code: self.code(),
            message,
        };
        (status, Json(body)).into_response()
    }
}
