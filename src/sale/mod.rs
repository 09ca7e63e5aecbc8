//! Sales and the queries for listing them.
//!
//! This module contains everything related to individual sales:
//! - The `Sale` model and the `NewSale` builder used for inserts and seeding
//! - The `SaleFilter` shared by the listing and the statistics queries
//! - The paged, searchable listing and its route handler

mod core;
mod filter;
mod list_endpoint;
mod query;

pub use core::{
    NewSale, Sale, SaleId, count_sales, create_sale, create_sale_table, insert_sales,
};
pub use filter::SaleFilter;
pub use list_endpoint::{ListSalesQuery, list_sales_endpoint};
pub use query::{SalePage, count_matching_sales, list_sales};
