use axum::Form;
use axum::extract::State;
use axum::response::Html;
use serde::Deserialize;
use tracing::{info, warn};

use crate::db;
use crate::error::PadError;
use crate::router::PadState;
use crate::service::discovery;
use crate::views;

const TITLE: &str = "Run Query";

/// One form, two submit buttons: `run` executes the typed SQL verbatim,
/// `tables` runs the fixed catalog introspection instead.
#[derive(Debug, Deserialize)]
pub struct QueryForm {
    pub db_filename: String,
    #[serde(default)]
    pub sql: String,
    pub action: QueryAction,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryAction {
    Run,
    Tables,
}

fn form_html(databases: &[String], sql: &str) -> String {
    format!(
        r#"<form method="post" action="/query">
{}
<label>SQL Query <textarea name="sql" rows="5">{}</textarea></label>
<button type="submit" name="action" value="run">Run Query</button>
<button type="submit" name="action" value="tables">Show Tables</button>
</form>"#,
        views::db_select(databases),
        htmlescape::encode_minimal(sql)
    )
}

fn render(state: &PadState, sql: &str, outcome: &str) -> Result<Html<String>, PadError> {
    let databases = discovery::list_databases(&state.data_dir)?;
    let body = if databases.is_empty() {
        "<p>No databases created.</p>".to_string()
    } else {
        format!("{}{outcome}", form_html(&databases, sql))
    };
    Ok(Html(views::page(TITLE, &body)))
}

pub async fn query_page(State(state): State<PadState>) -> Result<Html<String>, PadError> {
    render(&state, "", "")
}

pub async fn query_submit(
    State(state): State<PadState>,
    Form(form): Form<QueryForm>,
) -> Result<Html<String>, PadError> {
    let outcome = match execute(&state, &form).await {
        Ok(result) => views::result_table(&result, None),
        Err(e) => {
            warn!(file = %form.db_filename, error = %e, "query failed");
            views::error_line(&e.to_string())
        }
    };
    render(&state, &form.sql, &outcome)
}

async fn execute(state: &PadState, form: &QueryForm) -> Result<db::ResultSet, PadError> {
    let db_path = discovery::resolve_database(&state.data_dir, &form.db_filename)?;
    match form.action {
        QueryAction::Run => {
            info!(file = %form.db_filename, "executing user query");
            db::run_sql(&db_path, &form.sql).await
        }
        QueryAction::Tables => db::list_tables(&db_path).await,
    }
}
