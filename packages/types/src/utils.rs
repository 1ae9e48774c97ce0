/// Short random identifier used for log entries.
pub fn create_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
