use roll_quote::api::{AppState, router};
use roll_quote::catalog::Catalog;
use roll_quote::config::ServerConfig;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

fn main() {
    // Load .env if present.
    dotenvy::dotenv().ok();

    let config = ServerConfig::from_env().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    // Sentry must be initialised before the async runtime starts.
    let _sentry = config.sentry_dsn.as_deref().map(|dsn| {
        sentry::init((
            dsn,
            sentry::ClientOptions {
                release: sentry::release_name!(),
                ..Default::default()
            },
        ))
    });

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .unwrap_or_else(|e| {
            eprintln!("Error: failed to open {}: {}", config.log_file, e);
            std::process::exit(1);
        });

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_max_level(Level::INFO)
        .init();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .unwrap_or_else(|e| {
            eprintln!("Error: failed to start runtime: {}", e);
            std::process::exit(1);
        });

    if let Err(e) = runtime.block_on(serve(config)) {
        tracing::error!("server error: {e}");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn serve(config: ServerConfig) -> std::io::Result<()> {
    let addr = format!("0.0.0.0:{}", config.port);

    let state = AppState {
        catalog: Catalog::seed(),
        rolls: config.rolls,
        order_email: config.order_email,
    };

    let app = router(state).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    );

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    eprintln!("Listening on {addr}");
    tracing::info!(%addr, "listening");
    axum::serve(listener, app).await
}
