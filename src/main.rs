use anyhow::Context;
use pl_simulator::config::{Config, LedgerLocation};
use pl_simulator::{api, load_simulator, FileSource, HttpSource, LedgerSource};
use std::net::SocketAddr;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(config).await {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(config: Config) -> anyhow::Result<()> {
    let source: Box<dyn LedgerSource> = match &config.ledger_source {
        LedgerLocation::Path(path) => Box::new(FileSource::new(path)),
        LedgerLocation::Url(url) => Box::new(HttpSource::new(url.clone())),
    };

    let simulator = load_simulator(source.as_ref(), config.cascade_params(), config.tolerances())
        .await
        .context("Failed to load indicators document")?;

    let app = api::create_router(api::AppState::new(simulator));

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
