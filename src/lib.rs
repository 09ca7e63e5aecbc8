//! Sales stats is a small JSON API for exploring product sales.
//!
//! It stores sales in a SQLite database and answers questions about them for a
//! given month of any year:
//! - a paged list of sales, searchable by exact price or by text in the title
//!   or description,
//! - the total amount and the number of sold and not sold items,
//! - the number of sales per price range (bar chart),
//! - the number of sales per category (pie chart),
//! - and all three statistics in one response.
//!
//! The database is filled once from a remote JSON file, see [seed_database].

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod app_state;
mod db;
mod endpoints;
mod error;
mod logging;
mod month;
mod pagination;
mod routing;
mod sale;
mod search;
mod seed;
mod statistics;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use error::{Error, ErrorBody};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use month::{MonthFilter, resolve_month};
pub use pagination::{Page, PaginationConfig};
pub use routing::{Health, build_router};
pub use sale::{
    ListSalesQuery, NewSale, Sale, SaleFilter, SaleId, SalePage, count_matching_sales,
    count_sales, create_sale, insert_sales, list_sales,
};
pub use search::SearchPredicate;
pub use seed::{DEFAULT_SEED_URL, SeedSummary, fetch_seed_sales, seed_database};
pub use statistics::{
    CategoryCount, CombinedStatistics, MonthQuery, PRICE_BUCKETS, PriceBucket, PriceRangeCount,
    Statistics, get_category_breakdown, get_combined, get_price_histogram, get_statistics,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
