use sqlx::PgConnection;

use super::Database;
use crate::Result;

pub(super) const CREATE_SESSIONS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS sessions (
        id SERIAL PRIMARY KEY,
        session_id VARCHAR(255),
        query TEXT,
        response TEXT,
        sources TEXT,
        created_at TIMESTAMP WITH TIME ZONE DEFAULT NOW()
    )
";

pub(super) async fn ensure_sessions_table(conn: &mut PgConnection) -> Result<()> {
    sqlx::query(CREATE_SESSIONS_TABLE).execute(conn).await?;
    Ok(())
}

impl Database {
    /// Initialize database schema
    pub async fn init_schema(&self) -> Result<()> {
        let mut conn = self.conn.lock().await;
        ensure_sessions_table(&mut conn).await?;
        tracing::info!("Database schema initialized");
        Ok(())
    }
}
