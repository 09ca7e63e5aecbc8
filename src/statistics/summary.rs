//! Total revenue and sold/not sold counts for a month.

use rusqlite::{Connection, params_from_iter};
use serde::{Deserialize, Serialize};

use crate::{Error, month::MonthFilter, sale::SaleFilter};

/// Summary statistics for the sales in a month.
///
/// Note that `total_sold` and `total_not_sold` do not add up to the number of
/// sales: every sale counts as sold, and sales with a price of zero also
/// count as not sold.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// The sum of the prices of the sales.
    pub total_amount: f64,
    /// The number of sales.
    pub total_sold: u64,
    /// The number of sales with a price of zero.
    pub total_not_sold: u64,
}

/// Compute the [Statistics] for the sales in `month`, or all sales if `month`
/// is `None`.
///
/// No matching sales gives zero for every field.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn get_statistics(
    month: Option<MonthFilter>,
    connection: &Connection,
) -> Result<Statistics, Error> {
    let where_clause = SaleFilter::by_month(month).where_clause();
    let query = format!(
        "SELECT COALESCE(SUM(price), 0.0), \
        COUNT(id), \
        COALESCE(SUM(CASE WHEN price > 0 THEN 0 ELSE 1 END), 0) \
        FROM sale {}",
        where_clause.sql
    );

    connection
        .query_row(&query, params_from_iter(where_clause.params.iter()), |row| {
            Ok(Statistics {
                total_amount: row.get(0)?,
                total_sold: row.get(1)?,
                total_not_sold: row.get(2)?,
            })
        })
        .map_err(|error| error.into())
}
