use std::io::{self, BufRead, Write};

use ragchat_core::config::{expand_path, Config};
use ragchat_core::error::Error;
use ragchat_engine::RagEngine;
use ragchat_providers::{default_embedding_provider, OllamaClient};

fn print_help() {
    println!("\n--- Commands ---");
    println!("help     - Show this help");
    println!("status   - Show index info (files, chunks, last build)");
    println!("rebuild  - Rebuild the index (after adding new files)");
    println!("exit     - Quit");
    println!("Anything else is treated as a question.\n");
}

fn print_status(engine: &RagEngine) {
    match engine.status() {
        Ok(Some(status)) => {
            println!("\nFiles:      {}", status.documents);
            println!("Chunks:     {}", status.chunks);
            println!("Last build: {}\n", status.built_at.format("%Y-%m-%d %H:%M"));
        }
        Ok(None) => println!("\nNo index found. Type 'rebuild' to build one.\n"),
        Err(e) => println!("\nCould not read status: {e}\n"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::load()?;
    let mut settings = config.settings()?;
    settings.corpus_dir = expand_path(settings.corpus_dir.to_string_lossy());
    settings.index_path = expand_path(settings.index_path.to_string_lossy());
    settings.status_path = expand_path(settings.status_path.to_string_lossy());

    let embedder = default_embedding_provider(&settings.ollama_url, &settings.embedding_model);
    let llm = OllamaClient::new(&settings.ollama_url, &settings.completion_model);
    if !llm.is_available().await {
        tracing::warn!(
            url = %settings.ollama_url,
            "ollama is not reachable; questions will fail until it is up"
        );
    }

    let mut engine = RagEngine::new(settings, embedder, Box::new(llm));
    match engine.ensure_index().await {
        Ok(()) => {}
        Err(Error::IncompatibleIndex(reason)) => {
            tracing::warn!(%reason, "persisted index is incompatible, rebuilding");
            let status = engine.rebuild().await?;
            println!(
                "Index rebuilt: {} files, {} chunks.",
                status.documents, status.chunks
            );
        }
        Err(e) => return Err(e.into()),
    }

    println!("RAG chatbot ready. Type 'help' for commands.\n");
    let stdin = io::stdin();
    loop {
        print!("Your question: ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            // stdin closed
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        match input.to_lowercase().as_str() {
            "exit" | "quit" => {
                println!("Goodbye!");
                break;
            }
            "help" => {
                print_help();
                continue;
            }
            "status" => {
                print_status(&engine);
                continue;
            }
            "rebuild" => {
                println!("Reloading documents...");
                match engine.rebuild().await {
                    Ok(status) => println!(
                        "Index rebuilt: {} files, {} chunks.\n",
                        status.documents, status.chunks
                    ),
                    Err(e) => println!("Rebuild failed: {e}\n"),
                }
                continue;
            }
            _ => {}
        }
        match engine.answer(input).await {
            Ok(answer) => {
                println!("\nAnswer: {}", answer.text);
                if answer.sources.is_empty() {
                    println!("Sources: (none)\n");
                } else {
                    println!("Sources: {}\n", answer.sources.join(", "));
                }
            }
            Err(e) => println!("\nCould not answer: {e}\n"),
        }
    }
    Ok(())
}
