use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Rejected,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Invitation {
    pub id: RecordId,
    pub user_id: RecordId,
    pub group_id: RecordId,
    pub group_name: String, // denormalized copy, not re-validated against the group
    pub status: InvitationStatus,
    pub created_at: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvitation {
    pub user_id: RecordId,
    pub group_id: RecordId,
    pub group_name: String,
    pub status: InvitationStatus,
    pub created_at: String,
}
