use rusqlite::Connection;

/// Run all database migrations
pub fn run_migrations(conn: &Connection) -> anyhow::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;

    // Create contacts table
    conn.execute(
        "CREATE TABLE IF NOT EXISTS contacts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name VARCHAR NOT NULL,
            email VARCHAR,
            phone VARCHAR,
            created_at BIGINT NOT NULL
        )",
        [],
    )?;

    // Create deals table; unassign deals when their contact is deleted
    conn.execute(
        "CREATE TABLE IF NOT EXISTS deals (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name VARCHAR NOT NULL,
            value REAL NOT NULL DEFAULT 0,
            stage VARCHAR NOT NULL DEFAULT 'Lead',
            contact_id INTEGER,
            created_at BIGINT NOT NULL,
            FOREIGN KEY (contact_id) REFERENCES contacts (id) ON DELETE SET NULL
        )",
        [],
    )?;

    // Create tasks table
    conn.execute(
        "CREATE TABLE IF NOT EXISTS tasks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            task VARCHAR NOT NULL,
            status VARCHAR NOT NULL DEFAULT 'To Do',
            priority VARCHAR NOT NULL DEFAULT 'Medium',
            due_date VARCHAR NOT NULL,
            created_at BIGINT NOT NULL
        )",
        [],
    )?;

    // Indexes for the newest-first list queries
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_contacts_created ON contacts(created_at)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_deals_created ON deals(created_at)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_deals_contact ON deals(contact_id)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_tasks_created ON tasks(created_at)",
        [],
    )?;

    Ok(())
}
