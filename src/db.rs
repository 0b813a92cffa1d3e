use surrealdb::{RecordId, Surreal, engine::any::Any};

use crate::errors::Result;

#[derive(Debug)]
enum BatchOp {
    Delete(RecordId),
    ArrayRemove {
        target: RecordId,
        field: &'static str,
        value: RecordId,
    },
    #[cfg(test)]
    Abort,
}

/// An ordered set of document writes applied as one unit: after `commit`,
/// either every write is visible to readers or none is. Reads that decide
/// what goes into the batch happen before `commit` and are not isolated from
/// concurrent writers.
#[derive(Debug, Default)]
pub struct WriteBatch {
    ops: Vec<BatchOp>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self { ops: Vec::new() }
    }

    pub fn delete(&mut self, record: RecordId) {
        self.ops.push(BatchOp::Delete(record));
    }

    /// Removes `value` from the array field of `target`. Removing an element
    /// that is not present is a no-op, not an error.
    pub fn array_remove(&mut self, target: RecordId, field: &'static str, value: RecordId) {
        self.ops.push(BatchOp::ArrayRemove {
            target,
            field,
            value,
        });
    }

    #[cfg(test)]
    pub(crate) fn abort(&mut self) {
        self.ops.push(BatchOp::Abort);
    }

    pub async fn commit(self, sdb: &Surreal<Any>) -> Result<()> {
        if self.ops.is_empty() {
            return Ok(());
        }

        let mut statements = vec!["BEGIN TRANSACTION".to_string()];
        for (i, op) in self.ops.iter().enumerate() {
            match op {
                BatchOp::Delete(_) => statements.push(format!("DELETE $rec_{i}")),
                BatchOp::ArrayRemove { field, .. } => {
                    statements.push(format!("UPDATE $rec_{i} SET {field} -= $val_{i}"))
                }
                #[cfg(test)]
                BatchOp::Abort => statements.push("THROW 'batch aborted'".to_string()),
            }
        }
        statements.push("COMMIT TRANSACTION".to_string());
        let statements = statements.join(";\n") + ";";

        let mut query = sdb.query(statements);
        for (i, op) in self.ops.into_iter().enumerate() {
            match op {
                BatchOp::Delete(record) => {
                    query = query.bind((format!("rec_{i}"), record));
                }
                BatchOp::ArrayRemove { target, value, .. } => {
                    query = query
                        .bind((format!("rec_{i}"), target))
                        .bind((format!("val_{i}"), value));
                }
                #[cfg(test)]
                BatchOp::Abort => {}
            }
        }

        query.await?.check()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use surrealdb::engine::any::connect;

    use crate::consts::app_const::{GROUP_TABLE, USER_TABLE};
    use crate::models::group::{CreateGroup, Group};
    use crate::models::user::{CreateUser, Role, User};
    use crate::utils::record::record_id;
    use crate::utils::time::time_now;

    async fn test_db() -> Surreal<Any> {
        let sdb = connect("mem://").await.expect("mem engine");
        sdb.use_ns("test").use_db("test").await.expect("ns/db");
        sdb
    }

    async fn seed_user(sdb: &Surreal<Any>, key: &str, groups: Vec<RecordId>) -> User {
        sdb.create((USER_TABLE, key))
            .content(CreateUser {
                email: format!("{key}@gmail.com"),
                role: Role::Member,
                groups,
                fcm_token: None,
                created_at: time_now(),
            })
            .await
            .expect("create user")
            .expect("user record")
    }

    async fn seed_group(sdb: &Surreal<Any>, key: &str, member_ids: Vec<RecordId>) -> Group {
        sdb.create((GROUP_TABLE, key))
            .content(CreateGroup {
                name: format!("group {key}"),
                leader_id: record_id(USER_TABLE, "leader"),
                member_ids,
            })
            .await
            .expect("create group")
            .expect("group record")
    }

    #[tokio::test]
    async fn commit_applies_every_write() {
        let sdb = test_db().await;
        let user = seed_user(&sdb, "u1", Vec::new()).await;
        let group = seed_group(&sdb, "g1", Vec::new()).await;

        let mut batch = WriteBatch::new();
        batch.delete(group.id.clone());
        batch.delete(user.id.clone());
        batch.commit(&sdb).await.expect("commit");

        let group: Option<Group> = sdb.select(group.id).await.expect("select");
        let user: Option<User> = sdb.select(user.id).await.expect("select");
        assert!(group.is_none());
        assert!(user.is_none());
    }

    #[tokio::test]
    async fn failed_commit_leaves_no_partial_state() {
        let sdb = test_db().await;
        let user = seed_user(&sdb, "u1", Vec::new()).await;
        let group = seed_group(&sdb, "g1", vec![user.id.clone()]).await;

        let mut batch = WriteBatch::new();
        batch.delete(group.id.clone());
        batch.abort();
        batch.delete(user.id.clone());
        assert!(batch.commit(&sdb).await.is_err());

        let group: Option<Group> = sdb.select(group.id).await.expect("select");
        let user: Option<User> = sdb.select(user.id).await.expect("select");
        assert!(group.is_some(), "aborted batch must not delete the group");
        assert!(user.is_some(), "aborted batch must not delete the user");
    }

    #[tokio::test]
    async fn array_remove_is_idempotent() {
        let sdb = test_db().await;
        let user = seed_user(&sdb, "u1", Vec::new()).await;
        let group = seed_group(&sdb, "g1", vec![user.id.clone()]).await;

        let mut batch = WriteBatch::new();
        batch.array_remove(group.id.clone(), "memberIds", user.id.clone());
        batch.commit(&sdb).await.expect("first removal");

        let fetched: Option<Group> = sdb.select(group.id.clone()).await.expect("select");
        assert!(fetched.expect("group").member_ids.is_empty());

        // removing an element that is already gone succeeds and changes nothing
        let mut batch = WriteBatch::new();
        batch.array_remove(group.id.clone(), "memberIds", user.id);
        batch.commit(&sdb).await.expect("second removal");

        let fetched: Option<Group> = sdb.select(group.id).await.expect("select");
        assert!(fetched.expect("group").member_ids.is_empty());
    }

    #[tokio::test]
    async fn empty_batch_is_a_no_op() {
        let sdb = test_db().await;
        WriteBatch::new().commit(&sdb).await.expect("empty commit");
    }
}
