//! The API endpoints URIs.

/// The route for the paged, searchable list of sales.
pub const TRANSACTIONS: &str = "/api/transactions";
/// The route for the total amount, sold and not sold counts of a month.
pub const STATISTICS: &str = "/api/statistics";
/// The route for the number of sales per price range of a month.
pub const BAR_CHART: &str = "/api/bar-chart";
/// The route for the number of sales per category of a month.
pub const PIE_CHART: &str = "/api/pie-chart";
/// The route for the statistics, bar chart and pie chart of a month in one response.
pub const COMBINED: &str = "/api/combined";
/// An alias of [COMBINED].
pub const COMBINED_DATA: &str = "/api/combined-data";
/// The route that fetches the seed data and inserts it into the database.
pub const SEED: &str = "/api/seed";
/// The route for checking that the server is up.
pub const HEALTH: &str = "/api/health";
