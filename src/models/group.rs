use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: RecordId,
    pub name: String,
    pub leader_id: RecordId, // sole authorizer for mutating operations
    #[serde(default)]
    pub member_ids: Vec<RecordId>, // excludes the leader
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroup {
    pub name: String,
    pub leader_id: RecordId,
    pub member_ids: Vec<RecordId>,
}
