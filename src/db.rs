//! Sets up the application's SQLite database.

use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::{Error, sale::create_sale_table, search::register_fold_case};

/// Create the tables for the domain models if they do not exist yet and
/// register the SQL functions used by the queries.
///
/// Functions only live as long as the connection, so this must be called on
/// every new connection.
///
/// # Errors
/// Returns an [Error::SqlError] if a table or function could not be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    register_fold_case(connection)?;

    let transaction = Transaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_sale_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
