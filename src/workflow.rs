//! The two group-scoped mutations that touch several documents at once.
//! Both compute their full write set from reads first, then apply it through
//! a single [`WriteBatch`] commit so related changes land together or not at
//! all.

use surrealdb::{Surreal, engine::any::Any};

use crate::consts::app_const::{GROUP_TABLE, INSTALL_REQUEST_TABLE, USER_TABLE};
use crate::db::WriteBatch;
use crate::errors::{Error, Result};
use crate::models::group::Group;
use crate::models::install_request::InstallRequest;
use crate::models::user::User;
use crate::utils::record::record_id;

async fn authorized_group(sdb: &Surreal<Any>, leader_id: &str, group_id: &str) -> Result<Group> {
    let group: Option<Group> = sdb.select(record_id(GROUP_TABLE, group_id)).await?;
    let group = group.ok_or(Error::GroupNotFound)?;

    if group.leader_id != record_id(USER_TABLE, leader_id) {
        return Err(Error::Unauthorized);
    }

    Ok(group)
}

/// Deletes the group and every install request that references it, as one
/// atomic unit. Only the group's leader may do this.
pub async fn delete_group(sdb: &Surreal<Any>, leader_id: &str, group_id: &str) -> Result<()> {
    let group = authorized_group(sdb, leader_id, group_id).await?;

    let requests: Vec<InstallRequest> = sdb
        .query("SELECT * FROM type::table($table) WHERE groupId = $group_id;")
        .bind(("table", INSTALL_REQUEST_TABLE))
        .bind(("group_id", group.id.clone()))
        .await?
        .take(0)?;

    let mut batch = WriteBatch::new();
    batch.delete(group.id);
    for request in requests {
        batch.delete(request.id);
    }
    batch.commit(sdb).await
}

/// Removes one member from a group: the member id leaves the group's
/// `memberIds`, the group id leaves the member's `groups`, and the member's
/// install requests for this group are deleted, all in one atomic unit.
/// Removing someone who is not in the group is a no-op, not an error.
pub async fn remove_member(
    sdb: &Surreal<Any>,
    leader_id: &str,
    group_id: &str,
    member_email: &str,
) -> Result<()> {
    let group = authorized_group(sdb, leader_id, group_id).await?;

    // exact-match lookup; first match wins if duplicates exist
    let member: Option<User> = sdb
        .query("SELECT * FROM type::table($table) WHERE email = $email;")
        .bind(("table", USER_TABLE))
        .bind(("email", member_email.to_string()))
        .await?
        .take::<Vec<User>>(0)?
        .into_iter()
        .next();
    let member = member.ok_or(Error::UserNotFound)?;

    let requests: Vec<InstallRequest> = sdb
        .query("SELECT * FROM type::table($table) WHERE userId = $user_id AND groupId = $group_id;")
        .bind(("table", INSTALL_REQUEST_TABLE))
        .bind(("user_id", member.id.clone()))
        .bind(("group_id", group.id.clone()))
        .await?
        .take(0)?;

    let mut batch = WriteBatch::new();
    batch.array_remove(group.id.clone(), "memberIds", member.id.clone());
    batch.array_remove(member.id, "groups", group.id);
    for request in requests {
        batch.delete(request.id);
    }
    batch.commit(sdb).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use surrealdb::RecordId;
    use surrealdb::engine::any::connect;

    use crate::models::group::CreateGroup;
    use crate::models::install_request::CreateInstallRequest;
    use crate::models::user::{CreateUser, Role};
    use crate::utils::time::time_now;

    async fn test_db() -> Surreal<Any> {
        let sdb = connect("mem://").await.expect("mem engine");
        sdb.use_ns("test").use_db("test").await.expect("ns/db");
        sdb
    }

    async fn seed_user(sdb: &Surreal<Any>, key: &str, role: Role, groups: Vec<RecordId>) -> User {
        sdb.create((USER_TABLE, key))
            .content(CreateUser {
                email: format!("{key}@gmail.com"),
                role,
                groups,
                fcm_token: None,
                created_at: time_now(),
            })
            .await
            .expect("create user")
            .expect("user record")
    }

    async fn seed_group(
        sdb: &Surreal<Any>,
        key: &str,
        leader_id: RecordId,
        member_ids: Vec<RecordId>,
    ) -> Group {
        sdb.create((GROUP_TABLE, key))
            .content(CreateGroup {
                name: format!("group {key}"),
                leader_id,
                member_ids,
            })
            .await
            .expect("create group")
            .expect("group record")
    }

    async fn seed_request(
        sdb: &Surreal<Any>,
        key: &str,
        user_id: RecordId,
        group_id: RecordId,
    ) -> InstallRequest {
        sdb.create((INSTALL_REQUEST_TABLE, key))
            .content(CreateInstallRequest {
                user_id,
                group_id,
                apk_file_name: Some("app.apk".to_string()),
                apk_hash: Some("deadbeef".to_string()),
                status: "pending".to_string(),
                user_email: None,
            })
            .await
            .expect("create request")
            .expect("request record")
    }

    async fn requests_for_group(sdb: &Surreal<Any>, group_id: RecordId) -> Vec<InstallRequest> {
        sdb.query("SELECT * FROM type::table($table) WHERE groupId = $group_id;")
            .bind(("table", INSTALL_REQUEST_TABLE))
            .bind(("group_id", group_id))
            .await
            .expect("query")
            .take(0)
            .expect("take")
    }

    #[tokio::test]
    async fn delete_group_cascades_to_install_requests() {
        let sdb = test_db().await;
        let leader = seed_user(&sdb, "leader", Role::Leader, Vec::new()).await;
        let member = seed_user(&sdb, "member", Role::Member, Vec::new()).await;
        let group = seed_group(&sdb, "g1", leader.id.clone(), vec![member.id.clone()]).await;
        let other = seed_group(&sdb, "g2", leader.id.clone(), Vec::new()).await;
        seed_request(&sdb, "r1", member.id.clone(), group.id.clone()).await;
        seed_request(&sdb, "r2", member.id.clone(), group.id.clone()).await;
        let unrelated = seed_request(&sdb, "r3", member.id.clone(), other.id.clone()).await;

        delete_group(&sdb, "leader", "g1").await.expect("delete");

        let gone: Option<Group> = sdb.select(group.id.clone()).await.expect("select");
        assert!(gone.is_none());
        assert!(requests_for_group(&sdb, group.id).await.is_empty());

        // requests for other groups are untouched
        let kept: Option<InstallRequest> = sdb.select(unrelated.id).await.expect("select");
        assert!(kept.is_some());
    }

    #[tokio::test]
    async fn delete_group_rejects_wrong_leader_without_mutating() {
        let sdb = test_db().await;
        let leader = seed_user(&sdb, "leader", Role::Leader, Vec::new()).await;
        let intruder = seed_user(&sdb, "intruder", Role::Leader, Vec::new()).await;
        let group = seed_group(&sdb, "g1", leader.id.clone(), Vec::new()).await;
        seed_request(&sdb, "r1", intruder.id, group.id.clone()).await;

        let result = delete_group(&sdb, "intruder", "g1").await;
        assert!(matches!(result, Err(Error::Unauthorized)));

        let kept: Option<Group> = sdb.select(group.id.clone()).await.expect("select");
        assert!(kept.is_some());
        assert_eq!(requests_for_group(&sdb, group.id).await.len(), 1);
    }

    #[tokio::test]
    async fn delete_group_reports_missing_group() {
        let sdb = test_db().await;
        seed_user(&sdb, "leader", Role::Leader, Vec::new()).await;

        let result = delete_group(&sdb, "leader", "nope").await;
        assert!(matches!(result, Err(Error::GroupNotFound)));
    }

    #[tokio::test]
    async fn remove_member_updates_group_user_and_requests_together() {
        let sdb = test_db().await;
        let leader = seed_user(&sdb, "leader", Role::Leader, Vec::new()).await;
        let group_id = record_id(GROUP_TABLE, "g1");
        let other_group = record_id(GROUP_TABLE, "g2");
        let member = seed_user(
            &sdb,
            "member",
            Role::Member,
            vec![group_id.clone(), other_group.clone()],
        )
        .await;
        let group = seed_group(&sdb, "g1", leader.id.clone(), vec![member.id.clone()]).await;
        seed_request(&sdb, "r1", member.id.clone(), group.id.clone()).await;
        let unrelated = seed_request(&sdb, "r2", member.id.clone(), other_group.clone()).await;

        remove_member(&sdb, "leader", "g1", "member@gmail.com")
            .await
            .expect("remove");

        let group: Group = sdb
            .select(group.id)
            .await
            .expect("select")
            .expect("group record");
        assert!(group.member_ids.is_empty());

        let member: User = sdb
            .select(member.id)
            .await
            .expect("select")
            .expect("user record");
        assert_eq!(member.groups, vec![other_group]);

        assert!(requests_for_group(&sdb, group_id).await.is_empty());
        let kept: Option<InstallRequest> = sdb.select(unrelated.id).await.expect("select");
        assert!(kept.is_some());
    }

    #[tokio::test]
    async fn remove_member_twice_is_idempotent() {
        let sdb = test_db().await;
        let leader = seed_user(&sdb, "leader", Role::Leader, Vec::new()).await;
        let group_id = record_id(GROUP_TABLE, "g1");
        let member = seed_user(&sdb, "member", Role::Member, vec![group_id.clone()]).await;
        seed_group(&sdb, "g1", leader.id.clone(), vec![member.id.clone()]).await;

        remove_member(&sdb, "leader", "g1", "member@gmail.com")
            .await
            .expect("first removal");
        remove_member(&sdb, "leader", "g1", "member@gmail.com")
            .await
            .expect("second removal");

        let group: Group = sdb
            .select(group_id)
            .await
            .expect("select")
            .expect("group record");
        assert!(group.member_ids.is_empty());
    }

    #[tokio::test]
    async fn remove_member_requires_known_email() {
        let sdb = test_db().await;
        let leader = seed_user(&sdb, "leader", Role::Leader, Vec::new()).await;
        seed_group(&sdb, "g1", leader.id, Vec::new()).await;

        let result = remove_member(&sdb, "leader", "g1", "ghost@gmail.com").await;
        assert!(matches!(result, Err(Error::UserNotFound)));
    }
}
