//! Statistics, histogram and category breakdown in a single response.

use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{Error, month::MonthFilter};

use super::{
    category::{CategoryCount, get_category_breakdown},
    price_range::{PriceRangeCount, get_price_histogram},
    summary::{Statistics, get_statistics},
};

/// Every view of the sales in a month, computed from the same data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedStatistics {
    /// Totals for the month.
    pub statistics: Statistics,
    /// The price histogram.
    pub bar_chart_data: Vec<PriceRangeCount>,
    /// The category breakdown.
    pub pie_chart_data: Vec<CategoryCount>,
}

/// Compute the statistics, price histogram and category breakdown for `month`.
///
/// The three queries run in one read transaction so they see the same
/// snapshot of the sale table, even if another connection writes to the
/// database in between. If any query fails, the whole call fails.
///
/// # Errors
/// Returns [Error::SqlError] if the transaction or any query fails.
pub fn get_combined(
    month: Option<MonthFilter>,
    connection: &Connection,
) -> Result<CombinedStatistics, Error> {
    let tx = connection.unchecked_transaction()?;

    let statistics = get_statistics(month, &tx)?;
    let bar_chart_data = get_price_histogram(month, &tx)?;
    let pie_chart_data = get_category_breakdown(month, &tx)?;

    tx.commit()?;

    Ok(CombinedStatistics {
        statistics,
        bar_chart_data,
        pie_chart_data,
    })
}

#[cfg(test)]
mod tests {
    use time::{Month, macros::datetime};

    use crate::{
        month::MonthFilter,
        sale::{Sale, create_sale},
        statistics::{get_category_breakdown, get_price_histogram, get_statistics},
        test_utils::get_test_connection,
    };

    use super::get_combined;

    #[test]
    fn matches_individual_views() {
        let conn = get_test_connection();
        for (price, category, date) in [
            (150.0, "A", datetime!(2024-03-15 00:00:00 UTC)),
            (0.0, "B", datetime!(2023-03-10 00:00:00 UTC)),
            (950.0, "A", datetime!(2022-03-20 00:00:00 UTC)),
            (45.0, "C", datetime!(2024-05-01 00:00:00 UTC)),
        ] {
            create_sale(Sale::build("item", price, category, date), &conn).unwrap();
        }
        let month = Some(MonthFilter::new(Month::March));

        let got = get_combined(month, &conn).unwrap();

        assert_eq!(got.statistics, get_statistics(month, &conn).unwrap());
        assert_eq!(got.bar_chart_data, get_price_histogram(month, &conn).unwrap());
        assert_eq!(got.pie_chart_data, get_category_breakdown(month, &conn).unwrap());
        assert_eq!(got.statistics.total_sold, 3);
        assert_eq!(got.statistics.total_not_sold, 1);
        assert_eq!(got.bar_chart_data.len(), 10);
        assert_eq!(got.pie_chart_data.len(), 2);
    }

    #[test]
    fn empty_database_gives_zeroed_views() {
        let conn = get_test_connection();

        let got = get_combined(None, &conn).unwrap();

        assert_eq!(got.statistics.total_sold, 0);
        assert_eq!(got.statistics.total_amount, 0.0);
        assert_eq!(got.bar_chart_data.len(), 10);
        assert!(got.pie_chart_data.is_empty());
    }

    #[test]
    fn fails_when_any_query_fails() {
        let conn = get_test_connection();
        conn.execute("DROP TABLE sale", ()).unwrap();

        let got = get_combined(None, &conn);

        assert!(got.is_err(), "want error, got {got:?}");
    }
}
