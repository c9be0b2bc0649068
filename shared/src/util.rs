/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate an opaque identifier for a table, zone or fixture.
///
/// Random v4 UUIDs, so ids stay unique across scan imports and documents
/// produced on different devices.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
