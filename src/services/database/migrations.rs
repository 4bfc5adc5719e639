use anyhow::{Context, Result};
use rusqlite::Connection;

/// Checks whether a column exists on a table.
pub fn column_exists(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let query = format!(
        "SELECT COUNT(*) FROM pragma_table_info('{}') WHERE name='{}'",
        table, column
    );

    let exists: i32 = conn
        .query_row(&query, [], |row| row.get(0))
        .context("Failed to inspect table info")?;

    Ok(exists > 0)
}

/// Adds a column if it does not already exist.
pub fn ensure_column(conn: &Connection, table: &str, column: &str, ddl: &str) -> Result<()> {
    if column_exists(conn, table, column)? {
        return Ok(());
    }

    conn.execute(ddl, [])
        .with_context(|| format!("Failed to add {}.{}", table, column))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute("CREATE TABLE sample (id INTEGER PRIMARY KEY)", [])
            .unwrap();
        conn
    }

    #[test]
    fn test_column_exists() {
        let conn = table_conn();
        assert!(column_exists(&conn, "sample", "id").unwrap());
        assert!(!column_exists(&conn, "sample", "missing").unwrap());
    }

    #[test]
    fn test_ensure_column_adds_once() {
        let conn = table_conn();
        let ddl = "ALTER TABLE sample ADD COLUMN note TEXT";

        ensure_column(&conn, "sample", "note", ddl).unwrap();
        assert!(column_exists(&conn, "sample", "note").unwrap());

        // Second call is a no-op rather than a duplicate-column error
        ensure_column(&conn, "sample", "note", ddl).unwrap();
    }
}
