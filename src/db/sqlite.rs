use std::path::Path;

use sqlx::sqlite::{SqliteConnectOptions, SqliteRow};
use sqlx::{Column, ConnectOptions, Connection, Row, SqliteConnection, ValueRef};

use crate::error::PadError;
use crate::service::csv_import::CsvTable;

/// Fixed introspection query against the SQLite catalog.
pub const LIST_TABLES_SQL: &str = "SELECT name FROM sqlite_master WHERE type='table'";

/// An executed query's output: column names plus every cell rendered as
/// display text. Ephemeral; built per request and dropped after rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Open a connection to the database file at `path`, creating the file when
/// `create` is set. Callers hold the handle for one request at most.
pub async fn connect(path: &Path, create: bool) -> Result<SqliteConnection, PadError> {
    let opts = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(create);
    Ok(opts.connect().await?)
}

/// Create an empty database file (an existing file is silently reused).
pub async fn create_database(path: &Path) -> Result<(), PadError> {
    let conn = connect(path, true).await?;
    conn.close().await?;
    Ok(())
}

/// Execute one SQL statement verbatim and collect whatever rows it returns.
pub async fn run_sql(path: &Path, sql: &str) -> Result<ResultSet, PadError> {
    let mut conn = connect(path, false).await?;
    let result = fetch_result(&mut conn, sql).await;
    conn.close().await?;
    result
}

/// List the tables currently defined in the database at `path`.
pub async fn list_tables(path: &Path) -> Result<ResultSet, PadError> {
    run_sql(path, LIST_TABLES_SQL).await
}

/// Write a parsed CSV into `table`, dropping any existing table of that name
/// first. Runs inside one transaction so a failed import leaves the old
/// table intact.
pub async fn replace_table(path: &Path, table: &str, data: &CsvTable) -> Result<(), PadError> {
    let mut conn = connect(path, false).await?;
    let result = replace_table_tx(&mut conn, table, data).await;
    conn.close().await?;
    result
}

async fn replace_table_tx(
    conn: &mut SqliteConnection,
    table: &str,
    data: &CsvTable,
) -> Result<(), PadError> {
    let table_ident = quote_ident(table);
    let column_list = data
        .headers
        .iter()
        .map(|h| quote_ident(h))
        .collect::<Vec<_>>()
        .join(", ");
    let column_defs = data
        .headers
        .iter()
        .map(|h| format!("{} TEXT", quote_ident(h)))
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = vec!["?"; data.headers.len()].join(", ");
    let insert = format!("INSERT INTO {table_ident} ({column_list}) VALUES ({placeholders})");

    let mut tx = conn.begin().await?;
    sqlx::query(&format!("DROP TABLE IF EXISTS {table_ident}"))
        .execute(&mut *tx)
        .await?;
    sqlx::query(&format!("CREATE TABLE {table_ident} ({column_defs})"))
        .execute(&mut *tx)
        .await?;
    for record in &data.records {
        let mut query = sqlx::query(&insert);
        for value in record {
            query = query.bind(value);
        }
        query.execute(&mut *tx).await?;
    }
    tx.commit().await?;
    Ok(())
}

async fn fetch_result(conn: &mut SqliteConnection, sql: &str) -> Result<ResultSet, PadError> {
    let rows = sqlx::query(sql).fetch_all(&mut *conn).await?;
    let columns = rows
        .first()
        .map(|row| row.columns().iter().map(|c| c.name().to_string()).collect())
        .unwrap_or_default();
    let cells = rows
        .iter()
        .map(|row| {
            (0..row.columns().len())
                .map(|i| display_value(row, i))
                .collect()
        })
        .collect();
    Ok(ResultSet {
        columns,
        rows: cells,
    })
}

/// Render one cell for display. SQLite values are dynamically typed, so try
/// the storage classes in turn; NULL renders as the empty string.
fn display_value(row: &SqliteRow, idx: usize) -> String {
    if let Ok(s) = row.try_get::<String, _>(idx) {
        s
    } else if let Ok(i) = row.try_get::<i64, _>(idx) {
        i.to_string()
    } else if let Ok(f) = row.try_get::<f64, _>(idx) {
        f.to_string()
    } else if let Ok(b) = row.try_get::<Vec<u8>, _>(idx) {
        format!("<blob len={}>", b.len())
    } else if row.try_get_raw(idx).map(|r| r.is_null()).unwrap_or(true) {
        String::new()
    } else {
        "?".to_string()
    }
}

/// Double-quote an identifier so arbitrary header/table names survive DDL.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
