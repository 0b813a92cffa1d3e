use chrono::{DateTime, FixedOffset, Local};

pub fn time_now() -> String {
    let created_at = Local::now();
    let created_at: DateTime<FixedOffset> = created_at.with_timezone(created_at.offset());
    created_at.to_rfc3339()
}
