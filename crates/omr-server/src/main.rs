//! OMR sheet server
//!
//! Serves printable OMR answer sheets as PDF:
//!
//! - `GET /generate-omr` renders a sheet from query parameters
//! - `GET /health` reports liveness and whether Bangla glyphs are available

use std::net::SocketAddr;
use std::path::PathBuf;

use axum::{Router, routing::get};
use clap::Parser;
use omr_sheet::{DEFAULT_BANGLA_FONT_PATH, FontRegistry, SheetLayout};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod artifact;
mod error;
mod query;
mod state;
#[cfg(test)]
mod tests;

use api::{handle_generate_omr, handle_health};
use artifact::ScratchDir;
use state::AppState;

/// Command-line arguments for the OMR server
#[derive(Parser, Debug)]
#[command(name = "omr-server")]
#[command(about = "HTTP service that renders printable OMR answer sheets")]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "OMR_PORT", default_value = "8000")]
    port: u16,

    /// Host address to bind to
    #[arg(long, env = "OMR_HOST", default_value = "0.0.0.0")]
    host: String,

    /// TrueType font with Bengali glyphs (optional)
    #[arg(long, env = "OMR_BANGLA_FONT", default_value = DEFAULT_BANGLA_FONT_PATH)]
    bangla_font: PathBuf,

    /// Directory for temporary sheets (defaults to a folder in the system temp dir)
    #[arg(long, env = "OMR_SCRATCH_DIR")]
    scratch_dir: Option<PathBuf>,

    /// JSON file overriding the default sheet layout
    #[arg(long, env = "OMR_LAYOUT")]
    layout: Option<PathBuf>,

    /// Keep generated files instead of deleting them after sending
    #[arg(long, env = "OMR_KEEP_ARTIFACTS")]
    keep_artifacts: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Build the router with all routes and middleware
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health))
        .route("/generate-omr", get(handle_generate_omr))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let fonts = FontRegistry::with_bangla(&args.bangla_font);

    let layout = match &args.layout {
        Some(path) => {
            info!("Loading sheet layout from {}", path.display());
            SheetLayout::load(path).await?
        }
        None => SheetLayout::default(),
    };

    let scratch_root = args
        .scratch_dir
        .unwrap_or_else(|| std::env::temp_dir().join("omr-server"));
    let scratch = ScratchDir::new(scratch_root, !args.keep_artifacts);
    scratch.prepare().await?;

    info!("Paper: {}", layout.paper.name());
    info!("Bangla glyphs: {}", fonts.bangla_available());
    info!("Scratch directory: {}", scratch.root().display());

    let state = AppState::new(fonts, layout, scratch);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app(state)).await?;

    Ok(())
}
