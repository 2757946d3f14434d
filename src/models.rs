use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// A textbook chunk as produced by the ingestion pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub title: String,
    pub module: String,
    pub chapter: String,
    pub content: String,
    pub chunk_id: String,
    pub chunk_index: i64,
    pub token_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

/// Payload stored on every vector point; makes a search hit self-describing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkPayload {
    pub document_id: String,
    pub title: String,
    pub module: String,
    pub chapter: String,
    pub content: String,
    pub chunk_id: String,
    pub chunk_index: i64,
}

impl From<&Document> for ChunkPayload {
    fn from(document: &Document) -> Self {
        Self {
            document_id: document.id.clone(),
            title: document.title.clone(),
            module: document.module.clone(),
            chapter: document.chapter.clone(),
            content: document.content.clone(),
            chunk_id: document.chunk_id.clone(),
            chunk_index: document.chunk_index,
        }
    }
}

/// One vector search hit
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredChunk {
    pub payload: ChunkPayload,
    pub score: f32,
}

/// Grounding mode selected by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroundingMode {
    /// Answer from a similarity search over the whole indexed book
    #[default]
    FullBook,
    /// Answer from a passage the reader highlighted
    SelectedText,
}

impl GroundingMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FullBook => "full_book",
            Self::SelectedText => "selected_text",
        }
    }
}

impl std::str::FromStr for GroundingMode {
    type Err = crate::BookRagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full_book" => Ok(Self::FullBook),
            "selected_text" => Ok(Self::SelectedText),
            other => Err(crate::BookRagError::Validation(format!(
                "unknown grounding mode '{other}', expected 'full_book' or 'selected_text'"
            ))),
        }
    }
}

/// Source attribution returned with an answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
    pub title: String,
    pub module: String,
    pub chapter: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk_index: Option<i64>,
    pub similarity_score: f32,
}

impl From<ScoredChunk> for Source {
    fn from(hit: ScoredChunk) -> Self {
        let ScoredChunk { payload, score } = hit;
        Self {
            document_id: Some(payload.document_id),
            title: payload.title,
            module: payload.module,
            chapter: payload.chapter,
            content: payload.content,
            chunk_id: Some(payload.chunk_id),
            chunk_index: Some(payload.chunk_index),
            similarity_score: score,
        }
    }
}

/// Logged query/answer exchange
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct SessionRecord {
    pub id: i32,
    pub session_id: String,
    pub query: String,
    pub response: String,
    pub sources: String,
    pub created_at: DateTime<Utc>,
}

/// Acknowledgement for one indexed document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexAck {
    pub status: String,
    pub document_id: String,
}

impl IndexAck {
    #[must_use]
    pub fn indexed(document_id: impl Into<String>) -> Self {
        Self {
            status: "indexed".to_string(),
            document_id: document_id.into(),
        }
    }
}
