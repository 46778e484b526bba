mod server;

use bookhive_core::{
    GoogleBooksCatalog, RecommendationRequest, Recommender, RecommenderOptions,
    GOOGLE_BOOKS_VOLUMES_URL,
};
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "bookhive", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Book catalog volumes search URL
    #[arg(long, env = "BOOKHIVE_CATALOG_URL", default_value = GOOGLE_BOOKS_VOLUMES_URL)]
    catalog_url: String,

    /// Catalog API key; omitted from requests when unset
    #[arg(long, env = "BOOKHIVE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Number of candidates fetched from the catalog per request
    #[arg(long, env = "BOOKHIVE_MAX_RESULTS", default_value = "20")]
    max_results: usize,

    /// Number of ranked books returned per request
    #[arg(long, env = "BOOKHIVE_TOP_K", default_value = "10")]
    top_k: usize,

    /// Per-request catalog timeout in seconds
    #[arg(long, env = "BOOKHIVE_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the recommendation endpoint over HTTP.
    Serve {
        /// Address to listen on.
        #[arg(long, env = "BOOKHIVE_BIND", default_value = "127.0.0.1:5000")]
        bind: SocketAddr,
    },
    /// Run one recommendation and print the ranked books.
    Search {
        /// Search query
        #[arg(long)]
        query: String,
        /// Genre filter, repeatable.
        #[arg(long = "genre")]
        genres: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app_version = env!("CARGO_PKG_VERSION");

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();

    let cli = Cli::parse();

    let catalog = GoogleBooksCatalog::new(&cli.catalog_url, cli.api_key.clone())?
        .with_timeout(cli.timeout_secs.map(Duration::from_secs));
    let options = RecommenderOptions {
        max_results: cli.max_results,
        top_k: cli.top_k,
    };
    let recommender = Recommender::new(catalog, options)?;

    info!(
        version = app_version,
        started_at = %Utc::now().to_rfc3339(),
        catalog = %cli.catalog_url,
        max_results = recommender.options().max_results,
        top_k = recommender.options().top_k,
        "bookhive boot"
    );

    match cli.command {
        Command::Serve { bind } => {
            server::serve(bind, recommender).await?;
        }
        Command::Search { query, genres } => {
            let request = RecommendationRequest { query, genres };
            let recommendations = recommender.recommend(&request).await?;

            println!("query: {}", request.query);
            for (position, book) in recommendations.iter().enumerate() {
                println!(
                    "[{}] score={:.2} title={} author={} rating={}",
                    position + 1,
                    book.score,
                    book.title,
                    book.author,
                    book.rating
                );
                println!("  link={}", book.info_link);
            }
        }
    }

    Ok(())
}
