use std::{fs::OpenOptions, net::SocketAddr, sync::Arc};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware,
};
use axum_server::Handle;
use clap::Parser;
use rusqlite::Connection;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use sales_stats::{
    AppState, DEFAULT_SEED_URL, PaginationConfig, build_router, count_sales, graceful_shutdown,
    logging_middleware, seed_database,
};

/// The REST API server for sales_stats.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long)]
    db_path: String,

    /// The port to serve the API from.
    #[arg(short, long, default_value_t = 5007)]
    port: u16,

    /// The URL of the JSON array of sales used to seed the database.
    #[arg(long, default_value = DEFAULT_SEED_URL)]
    seed_url: String,

    /// The number of sales per page when a request does not specify one.
    #[arg(long, default_value_t = 10)]
    page_size: u64,

    /// Seed the database before serving if it has no sales yet.
    #[arg(long)]
    seed_on_start: bool,
}

#[tokio::main]
async fn main() {
    setup_logging();

    let args = Args::parse();

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));

    let conn = Connection::open(&args.db_path).expect("Could not open the database.");
    let pagination_config = PaginationConfig {
        default_page_size: args.page_size,
        ..Default::default()
    };
    let state = AppState::new(conn, pagination_config, &args.seed_url)
        .expect("Could not initialize the database.");

    if args.seed_on_start {
        seed_if_empty(&state).await;
    }

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = add_tracing_layer(build_router(state))
        .layer(middleware::from_fn(logging_middleware));

    tracing::info!("HTTP server listening on {}", addr);
    axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
        .expect("The server stopped unexpectedly.");
}

async fn seed_if_empty(state: &AppState) {
    let sale_count = {
        let connection = state
            .db_connection
            .lock()
            .expect("Could not acquire the database lock.");
        count_sales(&connection).expect("Could not count sales.")
    };

    if sale_count > 0 {
        tracing::info!("Skipping seeding, the database already has {sale_count} sales");
        return;
    }

    if let Err(error) =
        seed_database(&state.http_client, &state.seed_url, &state.db_connection).await
    {
        tracing::error!("Could not seed the database: {error}");
    }
}

fn setup_logging() {
    let stdout_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")));

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open("debug.log")
        .expect("Could not create log file");

    let debug_log = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(Arc::new(log_file))
        .with_filter(filter::LevelFilter::DEBUG);

    tracing_subscriber::registry()
        .with(stdout_log)
        .with(debug_log)
        .init();
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // By default, `TraceLayer` will log 5xx responses but we're doing our specific
        // logging of errors so disable that
        .on_failure(());

    router.layer(tracing_layer)
}
