use clap::Parser;
use legacy_leads::analyzer::WebsiteAnalyzer;
use legacy_leads::config::ServerConfig;
use legacy_leads::pipeline;
use legacy_leads::places::PlacesAggregator;
use legacy_leads::server::{self, AppState};
use std::error::Error;
use std::sync::Arc;

mod args;
use args::{Args, Command};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ServerConfig::from_file(path)?,
        None => ServerConfig::default(),
    }
    .with_env();

    match args.command {
        Command::Serve { bind } => {
            let bind = bind.unwrap_or_else(|| config.bind_addr.clone());
            let state = Arc::new(AppState::from_config(&config));
            server::start(&bind, state).await?;
        }
        Command::Analyze { url } => {
            let analyzer = WebsiteAnalyzer::from_config(&config);
            let result = analyzer.analyze(&url).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::Search(location) => {
            let query = location.to_query().ok_or("lat and lng are required")?;
            let aggregator = PlacesAggregator::from_config(&config);
            let page = aggregator.search(&query).await?;
            println!("{}", serde_json::to_string_pretty(&page)?);
        }
        Command::Prospect {
            location,
            concurrency,
        } => {
            let query = location.to_query().ok_or("lat and lng are required")?;
            let aggregator = PlacesAggregator::from_config(&config);
            let analyzer = WebsiteAnalyzer::from_config(&config);
            let concurrency = concurrency.unwrap_or_else(|| config.concurrency());

            let start_time = std::time::Instant::now();
            let (mut rx, next_page_token) =
                pipeline::prospect(&aggregator, analyzer, &query, concurrency).await?;

            let mut leads = 0;
            while let Some(lead) = rx.recv().await {
                leads += 1;
                println!("{}", serde_json::to_string(&lead)?);
            }

            ::log::info!(
                "Prospecting complete - {} leads in {:.2} seconds",
                leads,
                start_time.elapsed().as_secs_f64()
            );
            if let Some(token) = next_page_token {
                eprintln!("More results available: --page-token {token}");
            }
        }
    }

    Ok(())
}
