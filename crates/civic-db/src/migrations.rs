use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);")?;

    let version: i64 =
        conn.query_row("SELECT COALESCE(MAX(version), 0) FROM schema_version", [], |r| r.get(0))?;

    if version < 1 {
        info!("Running migration v1 (initial schema)");
        conn.execute_batch(
            "
            CREATE TABLE users (
                id          TEXT PRIMARY KEY,
                email       TEXT NOT NULL UNIQUE,
                name        TEXT NOT NULL,
                phone       TEXT,
                address     TEXT,
                avatar      TEXT,
                joined_at   TEXT NOT NULL
            );

            CREATE TABLE reports (
                id              TEXT PRIMARY KEY,
                user_id         TEXT NOT NULL REFERENCES users(id),
                title           TEXT NOT NULL,
                description     TEXT NOT NULL,
                category        TEXT NOT NULL,
                status          TEXT NOT NULL DEFAULT 'pending',
                priority        TEXT NOT NULL,
                lat             REAL NOT NULL DEFAULT 0,
                lng             REAL NOT NULL DEFAULT 0,
                address         TEXT NOT NULL,
                upvotes         INTEGER NOT NULL DEFAULT 0 CHECK (upvotes >= 0),
                comments_count  INTEGER NOT NULL DEFAULT 0 CHECK (comments_count >= 0),
                created_at      TEXT NOT NULL,
                updated_at      TEXT NOT NULL
            );

            CREATE INDEX idx_reports_user
                ON reports(user_id, created_at);

            CREATE TABLE report_images (
                report_id   TEXT NOT NULL REFERENCES reports(id) ON DELETE CASCADE,
                position    INTEGER NOT NULL,
                reference   TEXT NOT NULL,
                PRIMARY KEY (report_id, position)
            );

            CREATE TABLE votes (
                report_id   TEXT NOT NULL REFERENCES reports(id) ON DELETE CASCADE,
                user_id     TEXT NOT NULL REFERENCES users(id),
                voted_at    TEXT NOT NULL,
                PRIMARY KEY (report_id, user_id)
            );

            INSERT INTO schema_version (version) VALUES (1);
            ",
        )?;
    }

    info!("Database migrations complete");
    Ok(())
}
