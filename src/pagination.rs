//! This modules defines the common functionality for paging data.

use crate::Error;

/// The config for pagination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The number of sales to return per page when not specified in a request.
    pub default_page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_page_size: 10,
        }
    }
}

/// A validated, one-based page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    number: u64,
    size: u64,
}

impl Page {
    /// Create a page from the requested page number and page size, falling
    /// back to the defaults in `config` for missing values.
    ///
    /// There is no upper limit on the page size.
    ///
    /// # Errors
    /// Returns [Error::InvalidPagination] if either value is zero.
    pub fn new(
        number: Option<u64>,
        size: Option<u64>,
        config: &PaginationConfig,
    ) -> Result<Self, Error> {
        let number = number.unwrap_or(config.default_page);
        let size = size.unwrap_or(config.default_page_size);

        if number == 0 || size == 0 {
            return Err(Error::InvalidPagination {
                page: number,
                per_page: size,
            });
        }

        Ok(Self { number, size })
    }

    /// The one-based page number.
    pub fn number(self) -> u64 {
        self.number
    }

    /// The maximum number of items on the page.
    pub fn size(self) -> u64 {
        self.size
    }

    /// The number of items that come before this page.
    pub fn offset(self) -> u64 {
        (self.number - 1).saturating_mul(self.size)
    }
}
