use std::env;
use std::fs;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::Context;
use serde_json::json;

use rag_memory::core::config::{AppPaths, ConfigService};
use rag_memory::core::logging;
use rag_memory::rag::{HashingEmbedder, IndexerInput, MemoryService, RetrievalQuery};

fn main() -> anyhow::Result<()> {
    let paths = Arc::new(AppPaths::new());
    logging::init(&paths);

    let config_service = ConfigService::new(paths.clone());
    let config = config_service
        .load_rag_config()
        .context("Failed to load configuration")?;

    let embedder = Arc::new(HashingEmbedder::new(config.embedding_dimensions)?);
    let service = MemoryService::new(&config, embedder);

    if let Some(seed_path) = env::args().nth(1) {
        let raw = fs::read_to_string(&seed_path)
            .with_context(|| format!("Failed to read seed file {}", seed_path))?;
        let inputs: Vec<IndexerInput> = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse seed file {}", seed_path))?;

        let result = service.indexer().index_batch(&inputs);
        tracing::info!(
            "Indexed {} of {} seed records from {}",
            result.indexed,
            inputs.len(),
            seed_path
        );
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read query from stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<RetrievalQuery>(&line) {
            Ok(query) => match service.retrieve(&query) {
                Ok(results) => serde_json::to_value(results)?,
                Err(err) => {
                    tracing::warn!("Retrieval failed: {}", err);
                    json!({ "error": err.to_string() })
                }
            },
            Err(err) => {
                tracing::warn!("Ignoring malformed query: {}", err);
                json!({ "error": format!("malformed query: {}", err) })
            }
        };

        writeln!(stdout, "{}", response)?;
        stdout.flush()?;
    }

    tracing::info!("Memory stats at exit: {:?}", service.stats());
    Ok(())
}
