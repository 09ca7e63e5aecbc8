//! Number of sales per category (pie chart).

use rusqlite::{Connection, params_from_iter};
use serde::{Deserialize, Serialize};

use crate::{Error, month::MonthFilter, sale::SaleFilter};

/// The number of sales in one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    /// The category name.
    pub category: String,
    /// The number of sales in the category.
    pub count: u64,
}

/// Count the sales in `month` per category.
///
/// Only categories with at least one sale are included, sorted by name.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn get_category_breakdown(
    month: Option<MonthFilter>,
    connection: &Connection,
) -> Result<Vec<CategoryCount>, Error> {
    let where_clause = SaleFilter::by_month(month).where_clause();
    let query = format!(
        "SELECT category, COUNT(id) FROM sale {} GROUP BY category ORDER BY category ASC",
        where_clause.sql
    );

    connection
        .prepare(&query)?
        .query_map(params_from_iter(where_clause.params.iter()), |row| {
            Ok(CategoryCount {
                category: row.get(0)?,
                count: row.get(1)?,
            })
        })?
        .map(|category_result| category_result.map_err(Error::SqlError))
        .collect()
}
