/// Row id type; every table keys on a PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Timestamps are stored and exchanged in UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
