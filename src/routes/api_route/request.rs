use axum::{Json, extract::State, http::StatusCode};
use tracing::info;

use crate::{
    consts::app_const::{INSTALL_REQUEST_TABLE, PENDING_STATUS, USER_TABLE},
    errors::{Error, Result},
    models::{
        group::Group,
        install_request::InstallRequest,
        user::{Role, User},
    },
    routes::api_route::MessageResponse,
    state::AppState,
    utils::{
        record::{record_id, record_key},
        validated_json::ValidatedJson,
    },
};

#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, validator::Validate)]
#[serde(rename_all = "camelCase")]
pub struct FetchGroupRequestsRequest {
    #[validate(length(min = 1))]
    pub user_id: String,
}

#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupInstallRequest {
    pub id: String,
    pub group_id: String,
    pub group_name: String,
    pub user_email: Option<String>,
    pub apk_file_name: Option<String>,
}

pub async fn fetch_group_requests(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<FetchGroupRequestsRequest>,
) -> Result<(StatusCode, Json<Vec<GroupInstallRequest>>)> {
    let user: Option<User> = state.sdb.select(record_id(USER_TABLE, &input.user_id)).await?;
    let user = user.ok_or(Error::UserNotFound)?;

    if user.role != Role::Leader {
        return Err(Error::NotLeader);
    }

    let mut requests = Vec::new();
    for group_id in user.groups {
        let group: Option<Group> = state.sdb.select(group_id.clone()).await?;
        let group_name = group
            .map(|g| g.name)
            .unwrap_or_else(|| "Unknown Group".to_string());

        let pending: Vec<InstallRequest> = state
            .sdb
            .query("SELECT * FROM type::table($table) WHERE status = $status AND groupId = $group_id;")
            .bind(("table", INSTALL_REQUEST_TABLE))
            .bind(("status", PENDING_STATUS))
            .bind(("group_id", group_id.clone()))
            .await?
            .take(0)?;

        for request in pending {
            // the denormalized email is preferred; fall back to the live user doc
            let user_email = match request.user_email {
                Some(email) => Some(email),
                None => state
                    .sdb
                    .select::<Option<User>>(request.user_id.clone())
                    .await?
                    .map(|u| u.email),
            };

            requests.push(GroupInstallRequest {
                id: record_key(&request.id),
                group_id: record_key(&group_id),
                group_name: group_name.clone(),
                user_email,
                apk_file_name: request.apk_file_name,
            });
        }
    }

    Ok((StatusCode::OK, Json(requests)))
}

#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, validator::Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequestStatusRequest {
    #[validate(length(min = 1))]
    pub request_id: String,
    #[validate(length(min = 1))]
    pub new_status: String,
    #[validate(length(min = 1))]
    pub user_id: String,
}

#[derive(serde::Serialize)]
struct StatusPatch {
    status: String,
}

pub async fn update_request_status(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<UpdateRequestStatusRequest>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    // an unknown caller falls into the same class as a non-leader
    let user: Option<User> = state.sdb.select(record_id(USER_TABLE, &input.user_id)).await?;
    match user {
        Some(user) if user.role == Role::Leader => {}
        _ => return Err(Error::NotLeader),
    }

    let updated: Option<InstallRequest> = state
        .sdb
        .update(record_id(INSTALL_REQUEST_TABLE, &input.request_id))
        .merge(StatusPatch {
            status: input.new_status.clone(),
        })
        .await?;
    updated.ok_or(Error::InternalServerError)?;

    info!(
        "Request {} set to {} by {}",
        input.request_id, input.new_status, input.user_id
    );

    Ok((
        StatusCode::OK,
        Json(MessageResponse {
            message: "Request status updated successfully".to_string(),
        }),
    ))
}
