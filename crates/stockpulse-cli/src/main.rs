mod inspect;
mod pipeline;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use stockpulse_feed::FeedClient;
use stockpulse_sentiment::SentimentClassifier;

use crate::pipeline::PipelineOutcome;

#[derive(Debug, Parser)]
#[command(name = "stockpulse-cli")]
#[command(about = "Forum headline sentiment pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Collect, classify, and persist one batch of headlines.
    Run,
    /// Initialize the store schema. Safe to invoke when already ready.
    InitDb,
    /// Print persisted rows and the per-sentiment breakdown. Read-only.
    Inspect {
        /// Maximum rows to print; omit for all.
        #[arg(long)]
        limit: Option<i64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = stockpulse_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    let pool_config = stockpulse_db::PoolConfig::from_app_config(&config);
    let pool = stockpulse_db::connect_pool(&config.database_url, pool_config).await?;

    match cli.command {
        Commands::Run => {
            stockpulse_db::run_migrations(&pool).await?;

            // Model weights and the HTTP client are loaded once per process
            // and passed down by reference.
            let classifier = SentimentClassifier::from_file(&config.model_path)?;
            let client = FeedClient::new(
                &config.feed_base_url,
                config.feed_request_timeout_secs,
                &config.feed_user_agent,
            )?;

            match pipeline::run_pipeline(&pool, &client, &classifier, &config).await? {
                PipelineOutcome::NoData => println!("no headlines collected from any source"),
                PipelineOutcome::Stored { rows } => {
                    println!("stored {rows} classified headlines");
                }
            }
        }
        Commands::InitDb => {
            stockpulse_db::run_migrations(&pool).await?;
            println!("headline_sentiment schema is ready");
        }
        Commands::Inspect { limit } => inspect::run_inspect(&pool, limit).await?,
    }

    pool.close().await;
    Ok(())
}
