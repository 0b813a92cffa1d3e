use surrealdb::RecordId;

/// Clients address documents by bare key; the table is ours to supply.
pub fn record_id(table: &str, key: &str) -> RecordId {
    RecordId::from_table_key(table, key)
}

pub fn record_key(id: &RecordId) -> String {
    id.key().to_string()
}
