use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chlog::{api, store};

#[derive(Parser)]
#[command(name = "chlog")]
#[command(about = "Self-hosted changelog publishing server")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the changelog server
    Serve {
        /// Port for the HTTP API
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Data directory (defaults to the platform data dir)
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
    },
    /// Snapshot changelog.json into the backups directory
    Backup {
        /// Data directory (defaults to the platform data dir)
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "chlog=debug,tower_http=debug".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn open_store(data_dir: Option<PathBuf>) -> anyhow::Result<store::Store> {
    match data_dir {
        Some(dir) => store::Store::open(dir),
        None => store::Store::open_default(),
    }
}

async fn serve(port: u16, data_dir: Option<PathBuf>) -> anyhow::Result<()> {
    let store = open_store(data_dir)?;
    tracing::info!("Using data directory {}", store.data_dir().display());

    let app = api::create_router(store);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
    tracing::info!("Changelog server listening on http://127.0.0.1:{}", port);

    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Some(Commands::Serve { port, data_dir }) => serve(port, data_dir).await?,
        Some(Commands::Backup { data_dir }) => {
            let store = open_store(data_dir)?;
            let path = store.backup()?;
            println!("Backup written to {}", path.display());
        }
        None => serve(3000, None).await?,
    }

    Ok(())
}
