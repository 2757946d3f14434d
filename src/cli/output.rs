//! CLI output formatting utilities

use crate::models::SessionRecord;
use crate::models::Source;
use crate::rag::context::truncate_chars;
use crate::rag::RagAnswer;
use crate::AppConfig;

/// Print an answer followed by its sources
pub fn print_answer(answer: &RagAnswer) {
    println!("💡 Answer:");
    println!("{}", answer.answer);
    println!();
    print_sources(&answer.sources);
}

pub fn print_sources(sources: &[Source]) {
    if sources.is_empty() {
        println!("📚 No sources");
        return;
    }
    println!("📚 Sources ({}):", sources.len());
    for (i, source) in sources.iter().enumerate() {
        println!(
            "  {}. {} | {} | {} (score: {:.3})",
            i + 1,
            source.title,
            source.module,
            source.chapter,
            source.similarity_score
        );
        println!("     {}", truncate_chars(&source.content, 120));
    }
}

pub fn print_session_records(session_id: &str, records: &[SessionRecord]) {
    if records.is_empty() {
        println!("No exchanges logged for {session_id}");
        return;
    }
    println!("🗂️  Session {session_id} ({} exchanges):", records.len());
    for record in records {
        println!();
        println!("[{}] #{}", record.created_at.to_rfc3339(), record.id);
        println!("  Q: {}", record.query);
        println!("  A: {}", truncate_chars(&record.response, 300));
    }
}

/// Print configuration with secrets masked
pub fn print_config(config: &AppConfig) {
    let config = config.redacted();
    println!("📋 BookRAG Configuration:");
    println!();

    println!("🌐 Server:");
    println!("  Bind: {}", config.bind_address());
    println!("  CORS: {}", config.server.cors);
    println!();

    println!("🧠 OpenAI:");
    println!("  Base URL: {}", config.openai.base_url);
    println!("  API key: {}", config.openai.api_key);
    println!("  Embedding model: {}", config.embedding_model());
    println!("  Chat model: {}", config.openai.chat_model);
    println!("  Timeout: {}s", config.openai.timeout_secs);
    println!();

    println!("📐 Qdrant:");
    println!("  URL: {}", config.qdrant.url);
    println!(
        "  API key: {}",
        config.qdrant.api_key.as_deref().unwrap_or("(none)")
    );
    println!("  Collection: {}", config.qdrant.collection);
    println!("  Vector size: {}", config.embedding_dimension());
    println!();

    println!("🗄️  Database:");
    println!("  URL: {}", config.database.url);
    println!();

    println!("📝 Logging:");
    println!("  Level: {}", config.logging.level);
    println!("  Directory: {}", config.logging.directory);
    println!();

    println!("🔎 RAG:");
    println!("  Context limit: {}", config.rag.context_limit);
    println!("  Source limit: {}", config.rag.source_limit);
    println!("  Max tokens: {}", config.rag.max_tokens);
    println!("  Temperature: {}", config.rag.temperature);
    println!("  Concurrent search: {}", config.rag.concurrent_search);
}
