use axum::{Json, extract::State, http::StatusCode};

use crate::{
    consts::app_const::{GROUP_TABLE, INSTALL_REQUEST_TABLE, PENDING_STATUS},
    errors::{Error, Result},
    models::{group::Group, install_request::InstallRequest, user::{Role, User}},
    routes::api_route::StatusResponse,
    state::AppState,
    utils::{
        record::{record_id, record_key},
        validated_json::ValidatedJson,
    },
    workflow,
};

#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, validator::Validate)]
#[serde(rename_all = "camelCase")]
pub struct DeleteGroupRequest {
    #[validate(length(min = 1))]
    pub leader_id: String,
    #[validate(length(min = 1))]
    pub group_id: String,
}

pub async fn delete_group(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<DeleteGroupRequest>,
) -> Result<(StatusCode, Json<StatusResponse>)> {
    match workflow::delete_group(&state.sdb, &input.leader_id, &input.group_id).await {
        Ok(()) => Ok((
            StatusCode::OK,
            Json(StatusResponse::success(
                "Group and related data deleted successfully",
            )),
        )),
        // a missing group and a foreign leader are indistinguishable to callers
        Err(Error::GroupNotFound) => Err(Error::Unauthorized),
        Err(e) => Err(e),
    }
}

#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, validator::Validate)]
#[serde(rename_all = "camelCase")]
pub struct KickMemberRequest {
    #[validate(length(min = 1))]
    pub leader_id: String,
    #[validate(length(min = 1))]
    pub member_email: String,
    #[validate(length(min = 1))]
    pub group_id: String,
}

pub async fn kick_member(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<KickMemberRequest>,
) -> Result<(StatusCode, Json<StatusResponse>)> {
    match workflow::remove_member(
        &state.sdb,
        &input.leader_id,
        &input.group_id,
        &input.member_email,
    )
    .await
    {
        Ok(()) => Ok((
            StatusCode::OK,
            Json(StatusResponse::success(
                "Member removed from group successfully",
            )),
        )),
        Err(Error::GroupNotFound) => Err(Error::Unauthorized),
        Err(e) => Err(e),
    }
}

#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, validator::Validate)]
#[serde(rename_all = "camelCase")]
pub struct FetchGroupMembersRequest {
    #[validate(length(min = 1))]
    pub group_id: String,
}

#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberInstallRequest {
    pub id: String,
    pub apk_file_name: Option<String>,
    pub status: String,
}

#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupMember {
    pub id: String,
    pub email: String,
    pub role: Role,
    pub install_requests: Vec<MemberInstallRequest>,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct FetchGroupMembersResponse {
    pub members: Vec<GroupMember>,
}

pub async fn fetch_group_members(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<FetchGroupMembersRequest>,
) -> Result<(StatusCode, Json<FetchGroupMembersResponse>)> {
    let group: Option<Group> = state
        .sdb
        .select(record_id(GROUP_TABLE, &input.group_id))
        .await?;
    let group = group.ok_or(Error::GroupNotFound)?;

    let mut members = Vec::new();
    for member_id in group.member_ids {
        let Some(user) = state.sdb.select::<Option<User>>(member_id).await? else {
            // dangling member ids have nothing to show
            continue;
        };

        let pending: Vec<InstallRequest> = state
            .sdb
            .query("SELECT * FROM type::table($table) WHERE userId = $user_id AND groupId = $group_id AND status = $status;")
            .bind(("table", INSTALL_REQUEST_TABLE))
            .bind(("user_id", user.id.clone()))
            .bind(("group_id", group.id.clone()))
            .bind(("status", PENDING_STATUS))
            .await?
            .take(0)?;

        members.push(GroupMember {
            id: record_key(&user.id),
            email: user.email,
            role: user.role,
            install_requests: pending
                .into_iter()
                .map(|request| MemberInstallRequest {
                    id: record_key(&request.id),
                    apk_file_name: request.apk_file_name,
                    status: request.status,
                })
                .collect(),
        });
    }

    Ok((StatusCode::OK, Json(FetchGroupMembersResponse { members })))
}
