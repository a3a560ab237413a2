//! Ask the assistant a question

use crate::app::AskArgs;
use anyhow::Result;
use placemate_core::{Chatbot, Config, Database, HttpEmbedder, OllamaClient};
use std::sync::Arc;

pub async fn run(args: AskArgs, db: &Database, config: &Config) -> Result<()> {
    let query = args.query.join(" ");

    let client = Arc::new(OllamaClient::new(config.llm_service.clone())?);
    let embedder = Arc::new(HttpEmbedder::new(client.clone()));
    let bot = Chatbot::new(db.clone(), client, embedder, config);

    let response = bot.answer(&query).await?;

    println!("{}", response.answer);
    if args.show_source {
        println!("\n[source: {}]", response.source);
    }

    Ok(())
}
