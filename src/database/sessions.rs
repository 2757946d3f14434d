use async_trait::async_trait;
use sqlx::Connection;
use sqlx::PgConnection;
use tracing::debug;
use tracing::error;
use tracing::warn;

use super::schema::ensure_sessions_table;
use super::Database;
use super::SessionStore;
use crate::models::SessionRecord;
use crate::models::Source;
use crate::Result;

#[async_trait]
impl SessionStore for Database {
    async fn append(
        &self,
        session_id: &str,
        query: &str,
        answer: &str,
        sources: &[Source],
    ) -> Result<()> {
        let sources_json = serde_json::to_string(sources)?;

        let mut conn = self.conn.lock().await;
        let mut tx = conn.begin().await?;

        match insert_session(&mut tx, session_id, query, answer, &sources_json).await {
            Ok(()) => {
                tx.commit().await?;
                debug!("Stored session record for {}", session_id);
                Ok(())
            }
            Err(e) => {
                error!("Error storing session data: {}", e);
                if let Err(rollback_err) = tx.rollback().await {
                    warn!("Rollback of session insert failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }

    async fn list(&self, session_id: &str) -> Result<Vec<SessionRecord>> {
        let mut conn = self.conn.lock().await;
        ensure_sessions_table(&mut conn).await?;

        let records = sqlx::query_as::<_, SessionRecord>(
            r"
            SELECT id,
                   COALESCE(session_id, '') AS session_id,
                   COALESCE(query, '') AS query,
                   COALESCE(response, '') AS response,
                   COALESCE(sources, '[]') AS sources,
                   COALESCE(created_at, NOW()) AS created_at
            FROM sessions
            WHERE session_id = $1
            ORDER BY id
            ",
        )
        .bind(session_id)
        .fetch_all(&mut *conn)
        .await?;

        Ok(records)
    }
}

async fn insert_session(
    conn: &mut PgConnection,
    session_id: &str,
    query: &str,
    answer: &str,
    sources_json: &str,
) -> Result<()> {
    ensure_sessions_table(&mut *conn).await?;

    sqlx::query(
        r"
        INSERT INTO sessions (session_id, query, response, sources, created_at)
        VALUES ($1, $2, $3, $4, NOW())
        ",
    )
    .bind(session_id)
    .bind(query)
    .bind(answer)
    .bind(sources_json)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup_test_db() -> Result<Database> {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let conn = PgConnection::connect(&url).await?;
        let db = Database::new(conn);
        db.init_schema().await?;
        Ok(db)
    }

    #[tokio::test]
    #[ignore = "Requires a PostgreSQL instance in DATABASE_URL"]
    async fn test_append_then_list_round_trip() -> Result<()> {
        let db = setup_test_db().await?;
        let session_id = format!("session_{}", uuid::Uuid::new_v4());

        db.append(&session_id, "What is ZMP?", "The zero moment point.", &[])
            .await?;
        db.append(&session_id, "And CoM?", "Center of mass.", &[])
            .await?;

        let records = db.list(&session_id).await?;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].session_id, session_id);
        assert_eq!(records[0].query, "What is ZMP?");
        assert_eq!(records[0].response, "The zero moment point.");
        assert_eq!(records[0].sources, "[]");
        assert_eq!(records[1].query, "And CoM?");

        Ok(())
    }
}
