//! Interprets the free text search term used to narrow the list of sales.

use rusqlite::{Connection, functions::FunctionFlags};

/// How a search term narrows the list of sales.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SearchPredicate {
    /// No search term was given, every sale matches.
    #[default]
    Any,
    /// The term is a number, only sales with exactly this price match.
    Price(f64),
    /// The term is text, sales whose title or description contain the term
    /// (ignoring letter case) match.
    Text(String),
}

impl SearchPredicate {
    /// Interpret a search term.
    ///
    /// Leading and trailing whitespace is ignored. A term that parses as a
    /// finite number becomes [SearchPredicate::Price], numbers are never
    /// matched against text fields. Words such as "inf" or "NaN" are searched
    /// for as text.
    pub fn parse(term: &str) -> Self {
        let term = term.trim();

        if term.is_empty() {
            return SearchPredicate::Any;
        }

        match term.parse::<f64>() {
            Ok(price) if price.is_finite() => SearchPredicate::Price(price),
            _ => SearchPredicate::Text(term.to_owned()),
        }
    }
}

/// The name of the SQL function that folds text to lowercase.
///
/// SQLite's own `lower()` and `LIKE` only fold ASCII letters, this function
/// folds every Unicode letter so that "éclair" finds "ÉCLAIR".
pub(crate) const FOLD_CASE_FUNCTION: &str = "fold_case";

/// Fold `text` the same way [FOLD_CASE_FUNCTION] folds stored text.
pub(crate) fn fold_case(text: &str) -> String {
    text.to_lowercase()
}

/// Register [FOLD_CASE_FUNCTION] on `connection`.
///
/// # Errors
/// Returns an error if SQLite rejects the function.
pub(crate) fn register_fold_case(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.create_scalar_function(
        FOLD_CASE_FUNCTION,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |context| {
            let text = context.get::<Option<String>>(0)?;
            Ok(text.as_deref().map(fold_case))
        },
    )
}
