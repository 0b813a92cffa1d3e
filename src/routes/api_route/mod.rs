use axum::{Router, routing::post};
use serde::Serialize;

use crate::state::AppState;

pub mod group;
pub mod invitation;
pub mod notification;
pub mod request;
pub mod user;

// Route names mirror the serverless functions this service replaced, so
// existing clients keep working unchanged.
pub fn api_router(config: AppState) -> Router<AppState> {
    Router::new()
        .route("/RegisterUser", post(user::register_user))
        .route("/LoginUser", post(user::login_user))
        .route("/FetchUserEmail", post(user::fetch_user_email))
        .route(
            "/CreateGroupInvitation",
            post(invitation::create_group_invitation),
        )
        .route("/DeleteGroup", post(group::delete_group))
        .route("/KickMember", post(group::kick_member))
        .route("/FetchGroupMembers", post(group::fetch_group_members))
        .route("/FetchGroupRequests", post(request::fetch_group_requests))
        .route(
            "/UpdateRequestStatus",
            post(request::update_request_status),
        )
        .route(
            "/SendApprovalNotification",
            post(notification::send_approval_notification),
        )
        .with_state(config)
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub message: String,
}

impl StatusResponse {
    pub fn success(message: &str) -> Self {
        Self {
            status: "success",
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
