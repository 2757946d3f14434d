use async_trait::async_trait;
use sqlx::Connection;
use sqlx::PgConnection;
use tokio::sync::Mutex;

use crate::models::SessionRecord;
use crate::models::Source;
use crate::Result;

mod schema;
mod sessions;

/// Append-only log of query/answer exchanges
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Record one exchange; repeated session ids append new rows
    async fn append(
        &self,
        session_id: &str,
        query: &str,
        answer: &str,
        sources: &[Source],
    ) -> Result<()>;

    /// Every exchange logged under `session_id`, oldest first
    async fn list(&self, session_id: &str) -> Result<Vec<SessionRecord>>;
}

/// Single PostgreSQL connection opened at startup and shared for the process lifetime
#[derive(Debug)]
pub struct Database {
    conn: Mutex<PgConnection>,
}

impl Database {
    #[must_use]
    pub fn new(conn: PgConnection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Open the connection named by `database.url`
    pub async fn from_config(config: &crate::config::AppConfig) -> Result<Self> {
        let conn = PgConnection::connect(&config.database.url).await?;
        tracing::info!("Connected to PostgreSQL");
        Ok(Self::new(conn))
    }
}
