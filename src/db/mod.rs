//! Database module: scoped SQLite access for the workbench pages.
//!
//! Every entry point opens a connection, performs one operation, and closes
//! the handle before returning. Pages never share live connections.

pub mod sqlite;

pub use sqlite::{ResultSet, create_database, list_tables, replace_table, run_sql};
