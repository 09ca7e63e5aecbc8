//! Route handlers for the monthly statistics and chart data.

use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    Json,
    extract::{FromRef, Query, State},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    month::{MonthFilter, resolve_month},
};

use super::{
    category::{CategoryCount, get_category_breakdown},
    combined::{CombinedStatistics, get_combined},
    price_range::{PriceRangeCount, get_price_histogram},
    summary::{Statistics, get_statistics},
};

/// The state needed for the statistics routes.
#[derive(Debug, Clone)]
pub struct StatisticsState {
    /// The database connection for reading sales.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for StatisticsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The query parameters shared by the statistics routes.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthQuery {
    /// Only include sales made in this month of any year.
    pub month: Option<String>,
}

impl MonthQuery {
    fn resolve(&self) -> Result<Option<MonthFilter>, Error> {
        resolve_month(self.month.as_deref())
    }
}

impl StatisticsState {
    fn lock_connection(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)
    }
}

/// Get the total amount, sold and not sold counts for a month.
pub async fn get_statistics_endpoint(
    State(state): State<StatisticsState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Statistics>, Error> {
    let month = query.resolve()?;
    let connection = state.lock_connection()?;

    get_statistics(month, &connection).map(Json)
}

/// Get the number of sales per price range for a month.
pub async fn get_bar_chart_endpoint(
    State(state): State<StatisticsState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Vec<PriceRangeCount>>, Error> {
    let month = query.resolve()?;
    let connection = state.lock_connection()?;

    get_price_histogram(month, &connection).map(Json)
}

/// Get the number of sales per category for a month.
pub async fn get_pie_chart_endpoint(
    State(state): State<StatisticsState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Vec<CategoryCount>>, Error> {
    let month = query.resolve()?;
    let connection = state.lock_connection()?;

    get_category_breakdown(month, &connection).map(Json)
}

/// Get the statistics, bar chart and pie chart data for a month in one response.
pub async fn get_combined_endpoint(
    State(state): State<StatisticsState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<CombinedStatistics>, Error> {
    let month = query.resolve()?;
    let connection = state.lock_connection()?;

    get_combined(month, &connection).map(Json)
}

#[cfg(test)]
mod tests {
    use axum::{Router, routing::get};
    use axum_test::TestServer;
    use time::macros::datetime;

    use crate::{
        AppState, endpoints,
        sale::{Sale, create_sale},
        statistics::{CategoryCount, CombinedStatistics, PriceRangeCount, Statistics},
        test_utils::get_test_state,
    };

    use super::{
        get_bar_chart_endpoint, get_combined_endpoint, get_pie_chart_endpoint,
        get_statistics_endpoint,
    };

    fn get_test_server() -> TestServer {
        let state = get_test_state();
        insert_scenario_sale(&state);

        let app = Router::new()
            .route(endpoints::STATISTICS, get(get_statistics_endpoint))
            .route(endpoints::BAR_CHART, get(get_bar_chart_endpoint))
            .route(endpoints::PIE_CHART, get(get_pie_chart_endpoint))
            .route(endpoints::COMBINED, get(get_combined_endpoint))
            .with_state(state);

        TestServer::new(app)
    }

    fn insert_scenario_sale(state: &AppState) {
        let connection = state.db_connection.lock().unwrap();
        create_sale(
            Sale::build("item", 150.0, "A", datetime!(2024-03-15 00:00:00 UTC)),
            &connection,
        )
        .unwrap();
    }

    #[tokio::test]
    async fn statistics_for_month() {
        let server = get_test_server();

        let response = server
            .get(endpoints::STATISTICS)
            .add_query_param("month", "March")
            .await;

        response.assert_status_ok();
        assert_eq!(
            response.json::<Statistics>(),
            Statistics {
                total_amount: 150.0,
                total_sold: 1,
                total_not_sold: 0,
            }
        );
    }

    #[tokio::test]
    async fn statistics_use_camel_case_keys() {
        let server = get_test_server();

        let response = server
            .get(endpoints::STATISTICS)
            .add_query_param("month", "April")
            .await;

        assert_eq!(
            response.json::<serde_json::Value>(),
            serde_json::json!({"totalAmount": 0.0, "totalSold": 0, "totalNotSold": 0})
        );
    }

    #[tokio::test]
    async fn bar_chart_for_month() {
        let server = get_test_server();

        let response = server
            .get(endpoints::BAR_CHART)
            .add_query_param("month", "March")
            .await;

        response.assert_status_ok();
        let buckets = response.json::<Vec<PriceRangeCount>>();
        assert_eq!(buckets.len(), 10);
        assert_eq!(
            buckets[1],
            PriceRangeCount {
                range: "101 - 200".to_owned(),
                count: 1
            }
        );
        assert_eq!(buckets.iter().map(|bucket| bucket.count).sum::<u64>(), 1);
    }

    #[tokio::test]
    async fn pie_chart_for_month() {
        let server = get_test_server();

        let response = server
            .get(endpoints::PIE_CHART)
            .add_query_param("month", "March")
            .await;

        response.assert_status_ok();
        assert_eq!(
            response.json::<Vec<CategoryCount>>(),
            vec![CategoryCount {
                category: "A".to_owned(),
                count: 1
            }]
        );
    }

    #[tokio::test]
    async fn combined_for_month() {
        let server = get_test_server();

        let response = server
            .get(endpoints::COMBINED)
            .add_query_param("month", "mar")
            .await;

        response.assert_status_ok();
        let json = response.json::<serde_json::Value>();
        assert!(json.get("barChartData").is_some(), "got {json}");
        assert!(json.get("pieChartData").is_some(), "got {json}");
        let combined = response.json::<CombinedStatistics>();
        assert_eq!(combined.statistics.total_sold, 1);
        assert_eq!(combined.bar_chart_data[1].count, 1);
        assert_eq!(combined.pie_chart_data.len(), 1);
    }

    #[tokio::test]
    async fn missing_month_includes_every_sale() {
        let server = get_test_server();

        let response = server.get(endpoints::STATISTICS).await;

        response.assert_status_ok();
        assert_eq!(response.json::<Statistics>().total_sold, 1);
    }

    #[tokio::test]
    async fn invalid_month_is_bad_request() {
        let server = get_test_server();

        for endpoint in [
            endpoints::STATISTICS,
            endpoints::BAR_CHART,
            endpoints::PIE_CHART,
            endpoints::COMBINED,
        ] {
            let response = server.get(endpoint).add_query_param("month", "Smarch").await;

            response.assert_status_bad_request();
        }
    }
}
