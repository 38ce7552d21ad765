use clap::Parser;
use pigment_api::{PaintService, RestApi};
use pigment_storage::CatalogStore;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Paint catalog search service
#[derive(Parser, Debug)]
#[command(name = "pigment")]
#[command(about = "Faceted and color-similarity search over a paint catalog", long_about = None)]
struct Args {
    /// Path to the catalog snapshot (JSON)
    #[arg(short, long, default_value = "./data/catalog.sample.json")]
    catalog: PathBuf,

    /// Address to bind the HTTP API to
    #[arg(long, default_value = "0.0.0.0")]
    bind: String,

    /// HTTP API port
    #[arg(long, default_value_t = 8080)]
    http_port: u16,

    /// Log level, overridden by RUST_LOG when set
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting Pigment v{}", env!("CARGO_PKG_VERSION"));
    info!("Catalog: {:?}", args.catalog);

    let store = Arc::new(CatalogStore::open(&args.catalog)?);
    let service = Arc::new(PaintService::new(store.clone()));

    let bind = args.bind.clone();
    let http_port = args.http_port;
    let http_handle = std::thread::spawn(move || {
        let sys = actix_web::rt::System::new();
        sys.block_on(async {
            if let Err(e) = RestApi::start(service, bind, http_port).await {
                error!("HTTP server error: {}", e);
            }
        })
    });

    #[cfg(unix)]
    spawn_reload_on_hangup(store);

    info!("HTTP API: http://{}:{}/", args.bind, args.http_port);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        _ = tokio::task::spawn_blocking(move || {
            http_handle.join().ok();
        }) => {
            info!("HTTP server stopped");
        }
    }

    info!("Shutting down...");
    Ok(())
}

/// Reload the catalog file whenever the process receives SIGHUP
#[cfg(unix)]
fn spawn_reload_on_hangup(store: Arc<CatalogStore>) {
    use tokio::signal::unix::{signal, SignalKind};

    tokio::spawn(async move {
        let mut hangup = match signal(SignalKind::hangup()) {
            Ok(s) => s,
            Err(e) => {
                error!("Cannot listen for SIGHUP: {}", e);
                return;
            }
        };
        while hangup.recv().await.is_some() {
            info!("SIGHUP received, reloading catalog");
            // failures are logged by the store and the old snapshot stays live
            let _ = store.reload();
        }
    });
}
