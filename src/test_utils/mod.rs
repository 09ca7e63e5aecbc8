#![allow(missing_docs)]

use rusqlite::Connection;

use crate::{AppState, db::initialize, pagination::PaginationConfig, seed::DEFAULT_SEED_URL};

pub(crate) fn get_test_connection() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    initialize(&conn).unwrap();
    conn
}

pub(crate) fn get_test_state() -> AppState {
    let db_connection = Connection::open_in_memory().expect("Could not open database in memory.");

    AppState::new(db_connection, PaginationConfig::default(), DEFAULT_SEED_URL)
        .expect("Could not create app state.")
}
