//! Defines the core data models and database queries for sales.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, UtcOffset};

use crate::Error;

/// Alias for the integer type used for sale IDs in the database.
pub type SaleId = i64;

// ============================================================================
// MODELS
// ============================================================================

/// A product sale, i.e. an event where a product was listed for a price in a
/// given month.
///
/// To create a new `Sale`, use [Sale::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    /// The ID of the sale, assigned by the database.
    pub id: SaleId,
    /// The name of the product.
    pub title: String,
    /// A text description of the product.
    pub description: String,
    /// The price of the product. A price of zero means the product was not sold.
    pub price: f64,
    /// The product category, e.g. "electronics".
    pub category: String,
    /// A link to an image of the product.
    pub image: Option<String>,
    /// The sold flag from the seed data, stored as is.
    pub sold: Option<bool>,
    /// When the sale happened, in UTC.
    #[serde(with = "time::serde::rfc3339")]
    pub date_of_sale: OffsetDateTime,
}

impl Sale {
    /// Create a new sale.
    ///
    /// Shortcut for [NewSale] for discoverability.
    pub fn build(
        title: &str,
        price: f64,
        category: &str,
        date_of_sale: OffsetDateTime,
    ) -> NewSale {
        NewSale {
            title: title.to_owned(),
            description: String::new(),
            price,
            category: category.to_owned(),
            image: None,
            sold: None,
            date_of_sale,
        }
    }
}

/// A sale that has not been stored yet.
///
/// This is also the shape of the records in the seed data, so the seed JSON is
/// deserialized straight into this type. Fields that are not listed here, such
/// as the seed's own `id`, are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSale {
    /// The name of the product.
    pub title: String,
    /// A text description of the product.
    #[serde(default)]
    pub description: String,
    /// The price of the product, must not be negative.
    pub price: f64,
    /// The product category.
    pub category: String,
    /// A link to an image of the product.
    #[serde(default)]
    pub image: Option<String>,
    /// Whether the seed data marks the product as sold.
    #[serde(default)]
    pub sold: Option<bool>,
    /// When the sale happened. Any offset is accepted, it is converted to UTC
    /// before it is stored.
    #[serde(with = "time::serde::rfc3339")]
    pub date_of_sale: OffsetDateTime,
}

impl NewSale {
    /// Set the description of the sale.
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_owned();
        self
    }

    /// Set the image link of the sale.
    pub fn image(mut self, image: Option<&str>) -> Self {
        self.image = image.map(str::to_owned);
        self
    }

    /// Set the sold flag of the sale.
    pub fn sold(mut self, sold: Option<bool>) -> Self {
        self.sold = sold;
        self
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// The columns selected whenever a full [Sale] is read, in the order expected
/// by [map_sale_row].
pub(crate) const SALE_COLUMNS: &str =
    "id, title, description, price, category, image, sold, date_of_sale";

/// Create a new sale in the database.
///
/// The sale date is converted to UTC so that the month of the sale is the
/// same month the database sees.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error,
/// including when the price is negative.
pub fn create_sale(new_sale: NewSale, connection: &Connection) -> Result<Sale, Error> {
    let sale = connection
        .prepare_cached(&format!(
            "INSERT INTO sale (title, description, price, category, image, sold, date_of_sale)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             RETURNING {SALE_COLUMNS}"
        ))?
        .query_row(
            (
                new_sale.title,
                new_sale.description,
                new_sale.price,
                new_sale.category,
                new_sale.image,
                new_sale.sold,
                new_sale.date_of_sale.to_offset(UtcOffset::UTC),
            ),
            map_sale_row,
        )?;

    Ok(sale)
}

/// Insert many sales in a single database transaction.
///
/// Either every sale is inserted or none are.
///
/// # Errors
/// This function will return a [Error::SqlError] if any sale could not be
/// inserted.
pub fn insert_sales(new_sales: Vec<NewSale>, connection: &Connection) -> Result<usize, Error> {
    let tx = connection.unchecked_transaction()?;
    let count = new_sales.len();

    for new_sale in new_sales {
        create_sale(new_sale, &tx)?;
    }

    tx.commit()?;

    Ok(count)
}

/// Get the total number of sales in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn count_sales(connection: &Connection) -> Result<u64, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM sale;", [], |row| row.get(0))
        .map_err(|error| error.into())
}

/// Create the sale table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_sale_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS sale (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                price REAL NOT NULL CHECK (price >= 0),
                category TEXT NOT NULL,
                image TEXT,
                sold INTEGER,
                date_of_sale TEXT NOT NULL
                )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_sale_category ON sale(category);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Sale.
pub fn map_sale_row(row: &Row) -> Result<Sale, rusqlite::Error> {
    Ok(Sale {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        price: row.get(3)?,
        category: row.get(4)?,
        image: row.get(5)?,
        sold: row.get(6)?,
        date_of_sale: row.get(7)?,
    })
}

// ============================================================================
// TESTS
// ============================================================================
