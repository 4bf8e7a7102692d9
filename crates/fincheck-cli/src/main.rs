mod analyze;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "fincheck-cli")]
#[command(about = "fincheck command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
    /// Print every stored analysis as JSON, newest first
    Results,
    /// Extract, analyze and store a local PDF
    Analyze {
        /// Path to the PDF to analyze
        path: PathBuf,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Apply pending migrations
    Migrate,
    /// Check database connectivity
    Ping,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("fincheck-cli: no command given, see --help");
        return Ok(());
    };

    let config = fincheck_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let pool_config = fincheck_db::PoolConfig::from_app_config(&config);
    let pool = fincheck_db::connect_pool(&config.database_url, pool_config).await?;

    match command {
        Commands::Db {
            command: DbCommands::Migrate,
        } => {
            let applied = fincheck_db::run_migrations(&pool).await?;
            println!("migrations applied: {applied}");
        }
        Commands::Db {
            command: DbCommands::Ping,
        } => {
            fincheck_db::ping(&pool).await?;
            println!("database ok");
        }
        Commands::Results => {
            fincheck_db::run_migrations(&pool).await?;
            println!("{}", analyze::render_results(&pool).await?);
        }
        Commands::Analyze { path } => {
            fincheck_db::run_migrations(&pool).await?;
            analyze::run_analyze(&pool, &config, &path).await?;
        }
    }

    pool.close().await;
    Ok(())
}
