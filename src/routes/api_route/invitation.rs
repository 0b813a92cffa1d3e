use axum::{Json, extract::State, http::StatusCode};
use tracing::info;

use crate::{
    consts::app_const::{GROUP_TABLE, INVITATION_TABLE, USER_TABLE},
    errors::{Error, Result},
    models::{
        group::Group,
        invitation::{CreateInvitation, Invitation, InvitationStatus},
        user::User,
    },
    routes::api_route::StatusResponse,
    state::AppState,
    utils::{record::record_id, time::time_now, validated_json::ValidatedJson},
};

#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, validator::Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupInvitationRequest {
    #[validate(length(min = 1))]
    pub leader_id: String,
    #[validate(length(min = 1))]
    pub member_email: String,
    #[validate(length(min = 1))]
    pub group_id: String,
    #[validate(length(min = 1))]
    pub group_name: String,
}

pub async fn create_group_invitation(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateGroupInvitationRequest>,
) -> Result<(StatusCode, Json<StatusResponse>)> {
    let member: Vec<User> = state
        .sdb
        .query("SELECT * FROM type::table($table) WHERE email = $email;")
        .bind(("table", USER_TABLE))
        .bind(("email", input.member_email.clone()))
        .await?
        .take(0)?;
    let member = member.into_iter().next().ok_or(Error::UserNotFound)?;

    // a missing group and a foreign leader are indistinguishable to callers
    let group: Option<Group> = state
        .sdb
        .select(record_id(GROUP_TABLE, &input.group_id))
        .await?;
    let group = group.ok_or(Error::Unauthorized)?;
    if group.leader_id != record_id(USER_TABLE, &input.leader_id) {
        return Err(Error::Unauthorized);
    }

    if group.member_ids.contains(&member.id) {
        return Err(Error::AlreadyMember);
    }

    let pending: Vec<Invitation> = state
        .sdb
        .query("SELECT * FROM type::table($table) WHERE userId = $user_id AND groupId = $group_id AND status = $status;")
        .bind(("table", INVITATION_TABLE))
        .bind(("user_id", member.id.clone()))
        .bind(("group_id", group.id.clone()))
        .bind(("status", InvitationStatus::Pending))
        .await?
        .take(0)?;
    if !pending.is_empty() {
        return Err(Error::AlreadyInvited);
    }

    let invitation_data = CreateInvitation {
        user_id: member.id,
        group_id: group.id,
        group_name: input.group_name,
        status: InvitationStatus::Pending,
        created_at: time_now(),
    };
    let _ = state
        .sdb
        .create::<Option<Invitation>>(INVITATION_TABLE)
        .content(invitation_data)
        .await?
        .ok_or(Error::InternalServerError)?;

    info!(
        "Invitation created for {} in group {}",
        input.member_email, input.group_id
    );

    Ok((
        StatusCode::OK,
        Json(StatusResponse::success("Invitation created successfully")),
    ))
}
