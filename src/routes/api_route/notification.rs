use std::collections::HashMap;

use axum::{Json, extract::State, http::StatusCode};
use tracing::info;

use crate::{
    consts::app_const::{GROUP_TABLE, INSTALL_REQUEST_TABLE, USER_TABLE},
    errors::{Error, Result},
    models::{group::Group, install_request::InstallRequest, user::User},
    notify::Notification,
    routes::api_route::MessageResponse,
    state::AppState,
    utils::{record::record_id, validated_json::ValidatedJson},
};

#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, validator::Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendApprovalNotificationRequest {
    #[validate(length(min = 1))]
    pub user_id: String,
    pub apk_file_name: Option<String>,
    #[validate(length(min = 1))]
    pub apk_hash: String,
    #[validate(length(min = 1))]
    pub group_id: String,
    #[validate(length(min = 1))]
    pub status: String,
}

pub async fn send_approval_notification(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<SendApprovalNotificationRequest>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    let group: Option<Group> = state
        .sdb
        .select(record_id(GROUP_TABLE, &input.group_id))
        .await?;
    let group = group.ok_or(Error::GroupNotFound)?;

    let leader: Option<User> = state.sdb.select(group.leader_id.clone()).await?;
    let leader_token = leader
        .and_then(|leader| leader.fcm_token)
        .filter(|token| !token.is_empty())
        .ok_or(Error::LeaderTokenNotFound)?;

    let user: Option<User> = state.sdb.select(record_id(USER_TABLE, &input.user_id)).await?;
    let user = user.ok_or(Error::UserNotFound)?;

    let matching: Vec<InstallRequest> = state
        .sdb
        .query("SELECT * FROM type::table($table) WHERE apkHash = $apk_hash AND groupId = $group_id AND userId = $user_id AND status = $status;")
        .bind(("table", INSTALL_REQUEST_TABLE))
        .bind(("apk_hash", input.apk_hash.clone()))
        .bind(("group_id", group.id.clone()))
        .bind(("user_id", user.id.clone()))
        .bind(("status", input.status.clone()))
        .await?
        .take(0)?;
    let request = matching
        .into_iter()
        .next()
        .ok_or(Error::ApprovalRequestNotFound)?;

    let apk_file_name = request
        .apk_file_name
        .unwrap_or_else(|| "Unknown APK".to_string());

    let notification = Notification {
        title: format!("New Installation Request from {}", user.email),
        body: format!("Request to install {apk_file_name}."),
    };
    let data = HashMap::from([
        ("navigateTo".to_string(), "AdminApprovalScreen".to_string()),
        ("userId".to_string(), input.user_id.clone()),
        ("userName".to_string(), user.email.clone()),
        ("apkFileName".to_string(), apk_file_name),
    ]);

    state.fcm.send(&leader_token, &notification, &data).await?;

    info!("Approval notification delivered to leader of {}", input.group_id);

    Ok((
        StatusCode::OK,
        Json(MessageResponse {
            message: "Notification sent successfully".to_string(),
        }),
    ))
}
