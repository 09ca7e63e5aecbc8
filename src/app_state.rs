//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{Error, db::initialize, pagination::PaginationConfig};

/// The state of the REST server.
///
/// Created once at startup and shared with every route handler, which each
/// take the parts they need through [axum::extract::FromRef].
#[derive(Debug, Clone)]
pub struct AppState {
    /// The config that controls how to display pages of data.
    pub pagination_config: PaginationConfig,

    /// The database connection
    pub db_connection: Arc<Mutex<Connection>>,

    /// The HTTP client used to fetch the seed data.
    pub http_client: reqwest::Client,

    /// The URL of the JSON array of sales used to seed the database.
    pub seed_url: String,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for the domain models.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(
        db_connection: Connection,
        pagination_config: PaginationConfig,
        seed_url: &str,
    ) -> Result<Self, Error> {
        initialize(&db_connection)?;

        let connection = Arc::new(Mutex::new(db_connection));

        Ok(Self {
            pagination_config,
            db_connection: connection,
            http_client: reqwest::Client::new(),
            seed_url: seed_url.to_owned(),
        })
    }
}
