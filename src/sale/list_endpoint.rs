//! Defines the route handler for the paged, searchable list of sales.
use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    month::resolve_month,
    pagination::{Page, PaginationConfig},
    search::SearchPredicate,
};

use super::{
    filter::SaleFilter,
    query::{SalePage, list_sales},
};

/// The state needed for listing sales.
#[derive(Debug, Clone)]
pub struct ListSalesState {
    /// The database connection for reading sales.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The config that controls the default page and page size.
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for ListSalesState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            pagination_config: state.pagination_config,
        }
    }
}

/// The query parameters for listing sales.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSalesQuery {
    /// Only list sales made in this month of any year.
    pub month: Option<String>,
    /// A price to match exactly, or text to find in the title or description.
    pub search: Option<String>,
    /// The one-based page number.
    pub page: Option<u64>,
    /// The number of sales per page.
    pub per_page: Option<u64>,
}

/// List the sales that match the month and search term, one page at a time.
pub async fn list_sales_endpoint(
    State(state): State<ListSalesState>,
    Query(query): Query<ListSalesQuery>,
) -> Result<Json<SalePage>, Error> {
    let month = resolve_month(query.month.as_deref())?;
    let page = Page::new(query.page, query.per_page, &state.pagination_config)?;
    let filter = SaleFilter::by_month(month)
        .with_search(SearchPredicate::parse(query.search.as_deref().unwrap_or_default()));

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    list_sales(&filter, page, &connection).map(Json)
}
