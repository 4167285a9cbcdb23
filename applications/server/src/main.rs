/// Sterophile Server - read-only song catalog service
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use sterophile_core::Catalog;
use sterophile_server::{config::ServerConfig, router, state::AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "sterophile-server")]
#[command(about = "Sterophile song catalog service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Port to listen on (overrides the configuration)
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,
    },
    /// Validate a catalog file and print a summary
    Check {
        /// Catalog JSON file
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sterophile_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config, port } => {
            serve(config.as_deref(), port).await?;
        }
        Commands::Check { path } => {
            check_catalog(&path)?;
        }
    }

    Ok(())
}

async fn serve(config_path: Option<&Path>, port: Option<u16>) -> anyhow::Result<()> {
    // Load configuration
    let mut config = ServerConfig::load_from(config_path)?;
    if let Some(port) = port {
        config.server.port = port;
    }
    config.validate()?;

    tracing::info!("Starting Sterophile Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    let catalog = Catalog::from_json_file(&config.catalog.path).with_context(|| {
        format!(
            "failed to load catalog from {}",
            config.catalog.path.display()
        )
    })?;
    tracing::info!(
        "Catalog loaded: {} songs from {}",
        catalog.len(),
        config.catalog.path.display()
    );

    let app = router(AppState::from_catalog(catalog));

    let addr = config.bind_addr()?;
    tracing::info!("Server started on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

fn check_catalog(path: &Path) -> anyhow::Result<()> {
    let catalog = Catalog::from_json_file(path)
        .with_context(|| format!("invalid catalog {}", path.display()))?;

    println!("{}: {} songs", path.display(), catalog.len());
    for track in &catalog {
        println!("  {:>3}  {} - {}", track.id.index(), track.title, track.artist);
    }

    Ok(())
}
