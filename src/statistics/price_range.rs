//! The fixed price ranges used for the price histogram (bar chart).

use rusqlite::{Connection, params_from_iter};
use serde::{Deserialize, Serialize};

use crate::{Error, month::MonthFilter, sale::SaleFilter};

/// A price interval in the histogram.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBucket {
    /// The smallest price shown in the label.
    pub lower_bound: f64,
    /// The largest price in the bucket (inclusive), or `None` for no limit.
    pub upper_bound: Option<f64>,
    /// How the bucket is labelled in responses, e.g. "101 - 200".
    pub label: &'static str,
}

/// The ten histogram buckets in ascending order.
///
/// The first bucket holds prices from 0 to 100 inclusive. Every other bucket
/// holds prices above the previous bucket's upper bound up to its own upper
/// bound, so whole-number prices match the labels exactly and fractional
/// prices such as 100.5 still land in exactly one bucket.
pub const PRICE_BUCKETS: [PriceBucket; 10] = [
    PriceBucket { lower_bound: 0.0, upper_bound: Some(100.0), label: "0 - 100" },
    PriceBucket { lower_bound: 101.0, upper_bound: Some(200.0), label: "101 - 200" },
    PriceBucket { lower_bound: 201.0, upper_bound: Some(300.0), label: "201 - 300" },
    PriceBucket { lower_bound: 301.0, upper_bound: Some(400.0), label: "301 - 400" },
    PriceBucket { lower_bound: 401.0, upper_bound: Some(500.0), label: "401 - 500" },
    PriceBucket { lower_bound: 501.0, upper_bound: Some(600.0), label: "501 - 600" },
    PriceBucket { lower_bound: 601.0, upper_bound: Some(700.0), label: "601 - 700" },
    PriceBucket { lower_bound: 701.0, upper_bound: Some(800.0), label: "701 - 800" },
    PriceBucket { lower_bound: 801.0, upper_bound: Some(900.0), label: "801 - 900" },
    PriceBucket { lower_bound: 901.0, upper_bound: None, label: "901 - Infinity" },
];

/// The number of sales in one price bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRangeCount {
    /// The bucket label, e.g. "101 - 200".
    pub range: String,
    /// The number of sales with a price in the bucket.
    pub count: u64,
}

/// Count the sales in `month` per price bucket.
///
/// Always returns one entry per bucket in [PRICE_BUCKETS] order, buckets
/// without sales have a count of zero.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn get_price_histogram(
    month: Option<MonthFilter>,
    connection: &Connection,
) -> Result<Vec<PriceRangeCount>, Error> {
    let where_clause = SaleFilter::by_month(month).where_clause();
    let query = format!(
        "SELECT {} AS bucket, COUNT(id) FROM sale {} GROUP BY bucket",
        bucket_index_expression(),
        where_clause.sql
    );

    let mut counts = [0u64; PRICE_BUCKETS.len()];

    let rows = connection
        .prepare(&query)?
        .query_map(params_from_iter(where_clause.params.iter()), |row| {
            Ok((row.get::<_, usize>(0)?, row.get::<_, u64>(1)?))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    for (bucket_index, count) in rows {
        if let Some(bucket_count) = counts.get_mut(bucket_index) {
            *bucket_count = count;
        }
    }

    Ok(PRICE_BUCKETS
        .iter()
        .zip(counts)
        .map(|(bucket, count)| PriceRangeCount {
            range: bucket.label.to_owned(),
            count,
        })
        .collect())
}

/// A SQL `CASE` expression that maps a sale's price to its index in
/// [PRICE_BUCKETS].
fn bucket_index_expression() -> String {
    let mut expression = String::from("CASE");

    for (index, bucket) in PRICE_BUCKETS.iter().enumerate() {
        match bucket.upper_bound {
            Some(upper_bound) => {
                expression.push_str(&format!(" WHEN price <= {upper_bound:.2} THEN {index}"))
            }
            None => expression.push_str(&format!(" ELSE {index}")),
        }
    }

    expression.push_str(" END");
    expression
}

#[cfg(test)]
mod tests {
    use time::{Month, macros::datetime};

    use crate::{
        month::MonthFilter,
        sale::{Sale, create_sale},
        statistics::get_statistics,
        test_utils::get_test_connection,
    };

    use super::{PRICE_BUCKETS, bucket_index_expression, get_price_histogram};

    fn march() -> Option<MonthFilter> {
        Some(MonthFilter::new(Month::March))
    }

    fn insert_prices(prices: &[f64], conn: &rusqlite::Connection) {
        for price in prices {
            create_sale(
                Sale::build("item", *price, "A", datetime!(2024-03-15 00:00:00 UTC)),
                conn,
            )
            .unwrap();
        }
    }

    #[test]
    fn bucket_expression_covers_every_bucket() {
        assert_eq!(
            bucket_index_expression(),
            "CASE WHEN price <= 100.00 THEN 0 WHEN price <= 200.00 THEN 1 \
            WHEN price <= 300.00 THEN 2 WHEN price <= 400.00 THEN 3 \
            WHEN price <= 500.00 THEN 4 WHEN price <= 600.00 THEN 5 \
            WHEN price <= 700.00 THEN 6 WHEN price <= 800.00 THEN 7 \
            WHEN price <= 900.00 THEN 8 ELSE 9 END"
        );
    }

    #[test]
    fn empty_month_has_ten_zero_buckets() {
        let conn = get_test_connection();

        let got = get_price_histogram(march(), &conn).unwrap();

        assert_eq!(got.len(), 10);
        assert!(got.iter().all(|bucket| bucket.count == 0));
        let labels: Vec<_> = got.iter().map(|bucket| bucket.range.as_str()).collect();
        let want: Vec<_> = PRICE_BUCKETS.iter().map(|bucket| bucket.label).collect();
        assert_eq!(labels, want);
    }

    #[test]
    fn labels_are_min_dash_max() {
        let conn = get_test_connection();

        let got = get_price_histogram(march(), &conn).unwrap();

        assert_eq!(got[0].range, "0 - 100");
        assert_eq!(got[8].range, "801 - 900");
        assert_eq!(got[9].range, "901 - Infinity");
    }

    #[test]
    fn single_sale_lands_in_its_bucket() {
        let conn = get_test_connection();
        insert_prices(&[150.0], &conn);

        let got = get_price_histogram(march(), &conn).unwrap();

        for (index, bucket) in got.iter().enumerate() {
            let want = if index == 1 { 1 } else { 0 };
            assert_eq!(bucket.count, want, "wrong count for {}", bucket.range);
        }
        assert_eq!(got[1].range, "101 - 200");
    }

    #[test]
    fn bucket_bounds_are_inclusive() {
        let conn = get_test_connection();
        insert_prices(&[0.0, 100.0, 101.0, 200.0, 900.0, 901.0, 25_000.0], &conn);

        let got = get_price_histogram(march(), &conn).unwrap();
        let counts: Vec<_> = got.iter().map(|bucket| bucket.count).collect();

        assert_eq!(counts, vec![2, 2, 0, 0, 0, 0, 0, 0, 1, 2]);
    }

    #[test]
    fn counts_add_up_to_total_sold() {
        let conn = get_test_connection();
        insert_prices(&[0.0, 99.99, 100.5, 200.01, 450.0, 899.5, 900.5, 1200.0], &conn);

        let histogram = get_price_histogram(march(), &conn).unwrap();
        let statistics = get_statistics(march(), &conn).unwrap();

        let histogram_total: u64 = histogram.iter().map(|bucket| bucket.count).sum();
        assert_eq!(histogram_total, statistics.total_sold);
        assert_eq!(histogram[1].count, 1, "100.5 should be in 101 - 200");
        assert_eq!(histogram[9].count, 2, "900.5 should be in 901 - Infinity");
    }

    #[test]
    fn ignores_sales_in_other_months() {
        let conn = get_test_connection();
        create_sale(
            Sale::build("item", 50.0, "A", datetime!(2024-04-15 00:00:00 UTC)),
            &conn,
        )
        .unwrap();

        let got = get_price_histogram(march(), &conn).unwrap();

        assert!(got.iter().all(|bucket| bucket.count == 0));
    }
}
