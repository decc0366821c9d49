use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use copydesk::{AppState, OpenAiClient, OpenAiConfig};

#[derive(Parser)]
#[command(name = "copydesk")]
#[command(author, version, about = "Brand content studio with LLM generation pipelines", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the three studio apps
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1:8080")]
        addr: SocketAddr,

        /// Directory holding the audit logs and tone memory
        #[arg(long, default_value = ".")]
        data_dir: PathBuf,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            addr,
            data_dir,
            verbose,
        } => {
            setup_logging(verbose);
            run_server(addr, data_dir).await
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

async fn run_server(addr: SocketAddr, data_dir: PathBuf) -> Result<()> {
    let api_config = OpenAiConfig::from_env()?;
    let client = Arc::new(OpenAiClient::new(api_config));

    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create data dir {:?}", data_dir))?;
    info!("audit logs under {:?}", data_dir);

    let state = AppState::file_backed(client.clone(), client, &data_dir);
    copydesk::web::serve(addr, state).await
}
