mod commands;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "creaft-cli")]
#[command(about = "CREAFT content analytics command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch the trending chart and print the pattern analysis
    Trending {
        /// Region code (defaults to the configured region)
        #[arg(long)]
        region: Option<String>,
        /// Restrict to a single category id
        #[arg(long)]
        category: Option<String>,
        /// Number of videos to fetch (1-50)
        #[arg(long, default_value = "50")]
        max_results: u32,
    },
    /// Assess the viral potential of a single video
    Viral {
        /// Video id to assess
        video_id: String,
    },
    /// Fetch the trending chart and persist contents and snapshots
    Collect {
        /// Region code (defaults to the configured region)
        #[arg(long)]
        region: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = creaft_core::load_app_config()?;
    let cli = Cli::parse();

    match cli.command {
        Commands::Trending {
            region,
            category,
            max_results,
        } => {
            commands::run_trending(
                &config,
                region.as_deref(),
                category.as_deref(),
                max_results,
            )
            .await
        }
        Commands::Viral { video_id } => commands::run_viral(&config, &video_id).await,
        Commands::Collect { region } => commands::run_collect(&config, region.as_deref()).await,
    }
}
