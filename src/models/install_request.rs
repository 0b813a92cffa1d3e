use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InstallRequest {
    pub id: RecordId,
    pub user_id: RecordId,
    pub group_id: RecordId,
    pub apk_file_name: Option<String>,
    pub apk_hash: Option<String>,
    pub status: String, // free-form; "pending" is the only value ever queried
    pub user_email: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreateInstallRequest {
    pub user_id: RecordId,
    pub group_id: RecordId,
    pub apk_file_name: Option<String>,
    pub apk_hash: Option<String>,
    pub status: String,
    pub user_email: Option<String>,
}
