use rusqlite::Connection;

const UP_SQL: &str = r#"
-- One row per key; the forum keeps its whole state under a single key
CREATE TABLE IF NOT EXISTS kv_store (
    key        TEXT PRIMARY KEY NOT NULL,
    value      TEXT NOT NULL,              -- JSON document
    updated_at TEXT NOT NULL               -- ISO-8601
);
"#;

pub fn up(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(UP_SQL)
}
