use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Leader,
    Member,
}

impl Role {
    pub fn parse(val: &str) -> Option<Self> {
        match val {
            "leader" => Some(Role::Leader),
            "member" => Some(Role::Member),
            _ => None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: RecordId,
    #[serde(default)]
    pub email: String, // ! unique, enforced at registration; may be absent on externally created docs
    pub role: Role,
    #[serde(default)]
    pub groups: Vec<RecordId>,
    pub fcm_token: Option<String>,
    pub created_at: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    pub email: String,
    pub role: Role,
    pub groups: Vec<RecordId>,
    pub fcm_token: Option<String>,
    pub created_at: String,
}

// Password material lives beside the user document, never inside it.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AuthPassword {
    pub id: RecordId,
    pub user_id: RecordId,
    pub password_hash: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreateAuthPassword {
    pub user_id: RecordId,
    pub password_hash: String,
}
