use axum::extract::{Multipart, State};
use axum::response::Html;
use tracing::{info, warn};

use crate::db::{self, ResultSet};
use crate::error::PadError;
use crate::router::PadState;
use crate::service::{csv_import, discovery};
use crate::views;

const TITLE: &str = "Upload Data";
const PREVIEW_ROWS: usize = 10;

fn form_html(databases: &[String]) -> String {
    format!(
        r#"<form method="post" action="/upload" enctype="multipart/form-data">
{}
<label>Table Name to Insert <input type="text" name="table_name"></label>
<label>Choose a file <input type="file" name="file"></label>
<button type="submit">Upload</button>
</form>"#,
        views::db_select(databases)
    )
}

fn render(state: &PadState, outcome: &str) -> Result<Html<String>, PadError> {
    let databases = discovery::list_databases(&state.data_dir)?;
    let body = if databases.is_empty() {
        "<p>No databases created.</p>".to_string()
    } else {
        format!("{}{outcome}", form_html(&databases))
    };
    Ok(Html(views::page(TITLE, &body)))
}

pub async fn upload_page(State(state): State<PadState>) -> Result<Html<String>, PadError> {
    render(&state, "")
}

pub async fn upload_submit(
    State(state): State<PadState>,
    multipart: Multipart,
) -> Result<Html<String>, PadError> {
    let outcome = match import(&state, multipart).await {
        Ok(preview) => {
            let confirmation =
                views::status_line("Data uploaded successfully. These are the first 10 rows.");
            format!(
                "{confirmation}{}",
                views::result_table(&preview, Some(PREVIEW_ROWS))
            )
        }
        // Transport-level failures (oversized body, malformed multipart)
        // keep their HTTP status instead of an inline message.
        Err(e @ PadError::Multipart(_)) => return Err(e),
        Err(e) => {
            warn!(error = %e, "upload failed");
            views::error_line(&e.to_string())
        }
    };
    render(&state, &outcome)
}

/// Read the multipart fields, parse the CSV, and replace the target table.
/// Returns the parsed content so the page can echo the leading rows back.
async fn import(state: &PadState, mut multipart: Multipart) -> Result<ResultSet, PadError> {
    let mut db_filename = None;
    let mut table_name = None;
    let mut file_bytes = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("db_filename") => db_filename = Some(field.text().await?),
            Some("table_name") => table_name = Some(field.text().await?),
            Some("file") => file_bytes = Some(field.bytes().await?),
            _ => {}
        }
    }

    let db_filename = db_filename.ok_or(PadError::MissingField("db_filename"))?;
    let table_name = table_name.ok_or(PadError::MissingField("table_name"))?;
    let file_bytes = file_bytes.ok_or(PadError::MissingField("file"))?;

    let db_path = discovery::resolve_database(&state.data_dir, &db_filename)?;
    let table = csv_import::parse(&file_bytes)?;
    db::replace_table(&db_path, &table_name, &table).await?;
    info!(
        file = %db_filename,
        table = %table_name,
        rows = table.records.len(),
        "table replaced from upload"
    );

    Ok(ResultSet {
        columns: table.headers,
        rows: table.records,
    })
}
