//! RAG (Retrieval-Augmented Generation) module
//!
//! Answers reader questions about the textbook:
//! - Semantic retrieval of indexed chunks, or a reader-selected passage
//! - Context assembly and grounded prompt construction
//! - LLM-based answer generation with source attribution
//!
//! # Examples
//!
//! ```rust,no_run
//! use bookrag::config::AppConfig;
//! use bookrag::models::GroundingMode;
//! use bookrag::services::ServiceSet;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?;
//!     let services = ServiceSet::from_config(&config).await?;
//!
//!     let response = services
//!         .rag
//!         .process_query("What is a humanoid robot?", GroundingMode::FullBook, None)
//!         .await?;
//!     println!("Answer: {}", response.answer);
//!     println!("Sources: {} chunks", response.sources.len());
//!
//!     Ok(())
//! }
//! ```

pub mod context;
pub mod pipeline;
pub mod prompts;

pub use context::ContextAssembler;
pub use pipeline::RagAnswer;
pub use pipeline::RagOptions;
pub use pipeline::RagService;
