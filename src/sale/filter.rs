//! Builds the SQL filter shared by the sale listing and the statistics queries.

use rusqlite::types::Value;

use crate::{
    month::MonthFilter,
    search::{FOLD_CASE_FUNCTION, SearchPredicate, fold_case},
};

/// Selects the sales that a query operates on.
///
/// The month and search predicates are combined with a logical AND.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SaleFilter {
    /// Only include sales made in this month of any year, or every month if `None`.
    pub month: Option<MonthFilter>,
    /// Narrow the sales further by price or text.
    pub search: SearchPredicate,
}

/// A SQL `WHERE` clause and its positional parameters.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct WhereClause {
    /// The clause including the `WHERE` keyword, or an empty string if every
    /// row matches.
    pub sql: String,
    /// The values for the `?N` placeholders in `sql`.
    pub params: Vec<Value>,
}

impl SaleFilter {
    /// Create a filter for the sales in `month`.
    pub fn by_month(month: Option<MonthFilter>) -> Self {
        Self {
            month,
            search: SearchPredicate::Any,
        }
    }

    /// Narrow the filter with a search predicate.
    pub fn with_search(self, search: SearchPredicate) -> Self {
        Self { search, ..self }
    }

    /// Build the `WHERE` clause for the `sale` table.
    pub(crate) fn where_clause(&self) -> WhereClause {
        let mut where_clause_parts = vec![];
        let mut params = vec![];

        if let Some(month) = self.month {
            params.push(Value::Integer(month.number().into()));
            where_clause_parts.push(format!(
                "CAST(strftime('%m', date_of_sale) AS INTEGER) = ?{}",
                params.len()
            ));
        }

        match &self.search {
            SearchPredicate::Any => {}
            SearchPredicate::Price(price) => {
                params.push(Value::Real(*price));
                where_clause_parts.push(format!("price = ?{}", params.len()));
            }
            SearchPredicate::Text(text) => {
                // instr matches the term literally, there are no wildcards to escape.
                params.push(Value::Text(fold_case(text)));
                let index = params.len();
                where_clause_parts.push(format!(
                    "(instr({FOLD_CASE_FUNCTION}(title), ?{index}) > 0 \
                    OR instr({FOLD_CASE_FUNCTION}(description), ?{index}) > 0)"
                ));
            }
        }

        let sql = if where_clause_parts.is_empty() {
            String::new()
        } else {
            String::from("WHERE ") + &where_clause_parts.join(" AND ")
        };

        WhereClause { sql, params }
    }
}
