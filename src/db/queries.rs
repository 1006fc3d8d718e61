use rusqlite::{Connection, OptionalExtension, Result, Row, params};

/// One line of the audit trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRow {
    pub id: i64,
    pub date: String,
    pub operation: String,
    pub target: String,
    pub message: String,
}

fn map_log_row(row: &Row) -> Result<LogRow> {
    Ok(LogRow {
        id: row.get("id")?,
        date: row.get("date")?,
        operation: row.get("operation")?,
        target: row.get::<_, Option<String>>("target")?.unwrap_or_default(),
        message: row.get("message")?,
    })
}

pub fn kv_get(conn: &Connection, key: &str) -> Result<Option<String>> {
    conn.query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
        row.get::<_, String>(0)
    })
    .optional()
}

pub fn kv_set(conn: &Connection, key: &str, value: &str) -> Result<()> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
    )?;
    stmt.execute(params![key, value, chrono::Local::now().to_rfc3339()])?;
    Ok(())
}

pub fn load_log(conn: &Connection) -> Result<Vec<LogRow>> {
    let mut stmt =
        conn.prepare("SELECT id, date, operation, target, message FROM log ORDER BY id ASC")?;
    let rows = stmt.query_map([], map_log_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
