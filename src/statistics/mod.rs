//! Aggregate views of the sales in a month.
//!
//! Every view applies the same month filter:
//! - Summary statistics (total amount, sold and not sold counts)
//! - A fixed ten bucket price histogram (bar chart)
//! - The number of sales per category (pie chart)
//! - All three of the above in one response

mod category;
mod combined;
mod handlers;
mod price_range;
mod summary;

pub use category::{CategoryCount, get_category_breakdown};
pub use combined::{CombinedStatistics, get_combined};
pub use handlers::{
    MonthQuery, get_bar_chart_endpoint, get_combined_endpoint, get_pie_chart_endpoint,
    get_statistics_endpoint,
};
pub use price_range::{PRICE_BUCKETS, PriceBucket, PriceRangeCount, get_price_histogram};
pub use summary::{Statistics, get_statistics};
