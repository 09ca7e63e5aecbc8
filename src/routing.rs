//! Application router configuration.

use axum::{Json, Router, routing::get};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};

use crate::{
    AppState, Error, endpoints,
    sale::list_sales_endpoint,
    seed::seed_endpoint,
    statistics::{
        get_bar_chart_endpoint, get_combined_endpoint, get_pie_chart_endpoint,
        get_statistics_endpoint,
    },
};

/// Return a router with all the app's routes.
///
/// Cross-origin requests are allowed from any origin so that browser front
/// ends served from another host can call the API.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::HEALTH, get(get_health))
        .route(endpoints::SEED, get(seed_endpoint))
        .route(endpoints::TRANSACTIONS, get(list_sales_endpoint))
        .route(endpoints::STATISTICS, get(get_statistics_endpoint))
        .route(endpoints::BAR_CHART, get(get_bar_chart_endpoint))
        .route(endpoints::PIE_CHART, get(get_pie_chart_endpoint))
        .route(endpoints::COMBINED, get(get_combined_endpoint))
        .route(endpoints::COMBINED_DATA, get(get_combined_endpoint))
        .fallback(get_404_not_found)
        .layer(cors_layer())
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// The body of a successful health check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    /// Always "ok".
    pub status: String,
}

async fn get_health() -> Json<Health> {
    Json(Health {
        status: "ok".to_owned(),
    })
}

async fn get_404_not_found() -> Error {
    Error::NotFound
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderValue, Method, header};
    use axum_test::TestServer;
    use time::macros::datetime;

    use crate::{
        endpoints,
        error::ErrorBody,
        sale::{Sale, SalePage, create_sale},
        statistics::CombinedStatistics,
        test_utils::get_test_state,
    };

    use super::{Health, build_router};

    fn get_test_server() -> TestServer {
        let state = get_test_state();
        {
            let connection = state.db_connection.lock().unwrap();
            for (title, price, category, date) in [
                ("Backpack", 329.85, "men's clothing", datetime!(2021-11-27 14:59:54 UTC)),
                ("T-Shirt", 44.6, "men's clothing", datetime!(2021-03-27 14:59:54 UTC)),
                ("Ring", 0.0, "jewelery", datetime!(2022-03-02 14:59:54 UTC)),
            ] {
                create_sale(Sale::build(title, price, category, date), &connection).unwrap();
            }
        }

        TestServer::new(build_router(state))
    }

    #[tokio::test]
    async fn health_check() {
        let server = get_test_server();

        let response = server.get(endpoints::HEALTH).await;

        response.assert_status_ok();
        assert_eq!(response.json::<Health>().status, "ok");
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let server = get_test_server();

        let response = server.get("/api/nope").await;

        response.assert_status_not_found();
        assert_eq!(
            response.json::<ErrorBody>().error,
            "the requested resource could not be found"
        );
    }

    #[tokio::test]
    async fn allows_requests_from_any_origin() {
        let server = get_test_server();

        let response = server
            .get(endpoints::STATISTICS)
            .add_header(
                header::ORIGIN,
                HeaderValue::from_static("http://localhost:3000"),
            )
            .await;

        response.assert_status_ok();
        assert_eq!(response.header(header::ACCESS_CONTROL_ALLOW_ORIGIN), "*");
    }

    #[tokio::test]
    async fn answers_cors_preflight() {
        let server = get_test_server();

        let response = server
            .method(Method::OPTIONS, endpoints::TRANSACTIONS)
            .add_header(
                header::ORIGIN,
                HeaderValue::from_static("http://localhost:3000"),
            )
            .add_header(
                header::ACCESS_CONTROL_REQUEST_METHOD,
                HeaderValue::from_static("GET"),
            )
            .await;

        response.assert_status_ok();
        assert_eq!(response.header(header::ACCESS_CONTROL_ALLOW_ORIGIN), "*");
    }

    #[tokio::test]
    async fn combined_is_served_at_both_paths() {
        let server = get_test_server();

        let combined = server
            .get(endpoints::COMBINED)
            .add_query_param("month", "March")
            .await;
        let combined_data = server
            .get(endpoints::COMBINED_DATA)
            .add_query_param("month", "March")
            .await;

        combined.assert_status_ok();
        combined_data.assert_status_ok();
        assert_eq!(
            combined.json::<CombinedStatistics>(),
            combined_data.json::<CombinedStatistics>()
        );
    }

    #[tokio::test]
    async fn list_and_combined_use_the_same_month() {
        let server = get_test_server();

        let list = server
            .get(endpoints::TRANSACTIONS)
            .add_query_param("month", "March")
            .await
            .json::<SalePage>();
        let combined = server
            .get(endpoints::COMBINED)
            .add_query_param("month", "March")
            .await
            .json::<CombinedStatistics>();

        assert_eq!(list.total, 2);
        assert_eq!(combined.statistics.total_sold, list.total);
        assert_eq!(combined.statistics.total_not_sold, 1);
        assert_eq!(combined.statistics.total_amount, 44.6);
        assert_eq!(
            combined
                .bar_chart_data
                .iter()
                .map(|bucket| bucket.count)
                .sum::<u64>(),
            list.total
        );
    }
}
