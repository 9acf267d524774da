/// Entity identifiers are opaque strings (generated ids are UUID v4 in simple form).
pub type EntityId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Generate a fresh random entity identifier.
pub fn new_id() -> EntityId {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Current UTC time.
pub fn now() -> Timestamp {
    chrono::Utc::now()
}
