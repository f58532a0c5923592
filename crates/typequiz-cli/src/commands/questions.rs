//! The `typequiz questions` command.

use std::path::PathBuf;

use anyhow::Result;

use typequiz_client::{create_backend, load_config_from};
use typequiz_core::traits::QuizBackend;

use crate::render::question_table;

pub async fn execute(
    config_path: Option<PathBuf>,
    base_url: Option<String>,
    format: String,
) -> Result<()> {
    let mut config = load_config_from(config_path.as_deref())?;
    if let Some(url) = base_url {
        config.base_url = url;
    }
    let backend = create_backend(&config)?;

    let questions = backend.fetch_questions().await.map_err(|e| {
        anyhow::anyhow!("failed to fetch questions from {}: {e}", config.base_url)
    })?;

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&questions)?),
        "table" => {
            println!("{} questions", questions.len());
            println!("{}", question_table(&questions));
        }
        other => anyhow::bail!("unknown format: {other} (expected table or json)"),
    }

    Ok(())
}
