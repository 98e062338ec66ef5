//! `prospector` — discover product pages on e-commerce domains.

use anyhow::Result;
use clap::Parser;
use prospector::acquisition::http_client::HttpClient;
use prospector::config::Settings;
use prospector::crawler::Crawler;
use prospector::dispatch::pool::{Dispatcher, WorkerPool};
use prospector::store::ResultStore;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Domains to crawl (origin URLs, e.g. https://shop.example.com)
    #[arg(required = true)]
    domains: Vec<String>,

    /// Path of the persisted result store
    #[arg(long, default_value = "results.json")]
    out: PathBuf,

    /// Number of classification workers
    #[arg(long, default_value_t = 4)]
    workers: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let settings = Settings {
        timeout_secs: args.timeout,
        workers: args.workers,
        store_path: args.out,
        ..Settings::default()
    };

    let fetcher = Arc::new(HttpClient::new(&settings)?);
    let pool = WorkerPool::new(settings.workers);
    let crawler = Crawler::new(fetcher, Dispatcher::new(pool, settings.chunk_size));

    let results = crawler.run(&args.domains).await?;

    let store = ResultStore::new(&settings.store_path);
    store.save(&results)?;

    for (domain, urls) in &results {
        println!("{domain}: {} product pages found", urls.len());
    }

    Ok(())
}
