//! Database queries for the paged, searchable list of sales.

use rusqlite::{Connection, params_from_iter, types::Value};
use serde::{Deserialize, Serialize};

use crate::{Error, pagination::Page};

use super::{
    core::{SALE_COLUMNS, Sale, map_sale_row},
    filter::SaleFilter,
};

/// One page of the sales that match a [SaleFilter].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalePage {
    /// The number of sales that match the filter across all pages.
    pub total: u64,
    /// The one-based page number.
    pub page: u64,
    /// The maximum number of sales per page.
    pub per_page: u64,
    /// The sales on this page in insertion order.
    pub transactions: Vec<Sale>,
}

/// Get one page of the sales that match `filter`.
///
/// Sales are returned in the order they were inserted (by ID). A page past the
/// end of the results is empty, `total` still counts every match.
///
/// # Errors
/// Returns [Error::SqlError] if:
/// - SQL query preparation or execution fails
/// - Sale row mapping fails
pub fn list_sales(
    filter: &SaleFilter,
    page: Page,
    connection: &Connection,
) -> Result<SalePage, Error> {
    let where_clause = filter.where_clause();

    let total = count_matching_sales(filter, connection)?;

    let mut params = where_clause.params;
    params.push(Value::Integer(to_sql_integer(page.size())));
    let limit_index = params.len();
    params.push(Value::Integer(to_sql_integer(page.offset())));
    let offset_index = params.len();

    let query = format!(
        "SELECT {SALE_COLUMNS} FROM sale {} ORDER BY id ASC LIMIT ?{limit_index} OFFSET ?{offset_index}",
        where_clause.sql
    );

    let transactions = connection
        .prepare(&query)?
        .query_map(params_from_iter(params.iter()), map_sale_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SalePage {
        total,
        page: page.number(),
        per_page: page.size(),
        transactions,
    })
}

/// Count the sales that match `filter`.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn count_matching_sales(filter: &SaleFilter, connection: &Connection) -> Result<u64, Error> {
    let where_clause = filter.where_clause();
    let query = format!("SELECT COUNT(id) FROM sale {}", where_clause.sql);

    connection
        .query_row(&query, params_from_iter(where_clause.params.iter()), |row| {
            row.get(0)
        })
        .map_err(|error| error.into())
}

/// SQLite integers are signed, so huge page sizes are clamped to the largest
/// value SQLite accepts.
fn to_sql_integer(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
