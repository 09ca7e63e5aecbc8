//! Fetches sales from a remote JSON file and bulk inserts them into the database.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    sale::{NewSale, insert_sales},
};

/// Where the seed data is fetched from when no other URL is configured.
pub const DEFAULT_SEED_URL: &str = "https://s3.amazonaws.com/roxiler.com/product_transaction.json";

/// The state needed for seeding the database.
#[derive(Debug, Clone)]
pub struct SeedState {
    /// The database connection the sales are inserted into.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The HTTP client used to fetch the seed data.
    pub http_client: reqwest::Client,
    /// The URL of the JSON array of sales.
    pub seed_url: String,
}

impl FromRef<AppState> for SeedState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            http_client: state.http_client.clone(),
            seed_url: state.seed_url.clone(),
        }
    }
}

/// The outcome of seeding the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedSummary {
    /// How many sales were inserted.
    pub inserted: usize,
}

/// Fetch the JSON array of sales at `url`.
///
/// # Errors
/// Returns [Error::SeedSource] if the request fails, the server responds with
/// an error status, or the body is not a JSON array of sales.
pub async fn fetch_seed_sales(
    http_client: &reqwest::Client,
    url: &str,
) -> Result<Vec<NewSale>, Error> {
    let response = http_client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::SeedSource(format!(
            "{url} responded with status {status}"
        )));
    }

    let new_sales: Vec<NewSale> = response.json().await?;
    tracing::debug!("Fetched {} sales from {url}", new_sales.len());

    Ok(new_sales)
}

/// Fetch the seed data at `url` and insert every sale into the database.
///
/// The database lock is only held while inserting, not while waiting for the
/// remote server. Sales are inserted as they are, without checking for
/// duplicates, so seeding twice stores every sale twice.
///
/// # Errors
/// Returns [Error::SeedSource] if the seed data could not be fetched, and
/// [Error::SqlError] or [Error::DatabaseLockError] if it could not be stored.
/// Nothing is inserted when an error is returned.
pub async fn seed_database(
    http_client: &reqwest::Client,
    url: &str,
    db_connection: &Mutex<Connection>,
) -> Result<SeedSummary, Error> {
    let new_sales = fetch_seed_sales(http_client, url).await?;

    let connection = db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let inserted = insert_sales(new_sales, &connection)?;
    tracing::info!("Seeded the database with {inserted} sales from {url}");

    Ok(SeedSummary { inserted })
}

/// Seed the database from the configured seed URL.
pub async fn seed_endpoint(State(state): State<SeedState>) -> Result<Json<SeedSummary>, Error> {
    seed_database(&state.http_client, &state.seed_url, &state.db_connection)
        .await
        .map(Json)
}
