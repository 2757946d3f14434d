use bookrag::cli::*;
use bookrag::config::AppConfig;
use bookrag::Result;
use clap::Parser;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let config = AppConfig::load()?;

    // Keep the guard alive so the file writer flushes on exit
    let _log_guard = if cli.verbose {
        bookrag::logging::init_logging_with_level(&config.logging, "debug")?
    } else {
        bookrag::logging::init_logging(&config.logging)?
    };

    info!("BookRAG starting");

    match cli.command {
        Commands::Serve {
            host,
            port,
            no_cors,
        } => handle_serve(&config, host, port, no_cors).await?,
        Commands::Index { path } => handle_index(&config, &path).await?,
        Commands::Query {
            question,
            mode,
            selected_text,
        } => handle_query(&config, &question, mode.into(), selected_text.as_deref()).await?,
        Commands::Sessions { session_id } => handle_sessions(&config, &session_id).await?,
        Commands::Config => handle_config(&config),
    }

    Ok(())
}
