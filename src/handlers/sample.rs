use axum::Form;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse};
use serde::Deserialize;
use tracing::warn;

use crate::db;
use crate::error::PadError;
use crate::router::PadState;
use crate::views;

const TITLE: &str = "Sample Case: Online Media Subscription";

/// Inert prompts for the user to translate into SQL by hand.
const SAMPLE_QUESTIONS: [&str; 5] = [
    "How many unique content items are there per type?",
    "What genre of content has the highest star rating?",
    "What are the top 10 accounts with more streamed content?",
    "What are the top 3 most streamed content in Canada?",
    "What is the average star rate of horror movies watched on Fridays in Asia?",
];

/// Same form as the query page, minus the database select: the sample case
/// is hardwired to the bundled database.
#[derive(Debug, Deserialize)]
pub struct SampleForm {
    #[serde(default)]
    pub sql: String,
    pub action: SampleAction,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleAction {
    Run,
    Tables,
}

fn questions_html() -> String {
    SAMPLE_QUESTIONS
        .iter()
        .enumerate()
        .map(|(i, q)| {
            format!(
                r#"<div class="question"><strong>Question {}</strong> {}</div>"#,
                i + 1,
                htmlescape::encode_minimal(q)
            )
        })
        .collect()
}

fn form_html(sql: &str) -> String {
    format!(
        r#"<form method="post" action="/sample">
<label>SQL Query <textarea name="sql" rows="5">{}</textarea></label>
<button type="submit" name="action" value="run">Run Query</button>
<button type="submit" name="action" value="tables">Show Tables</button>
</form>"#,
        htmlescape::encode_minimal(sql)
    )
}

fn render(sql: &str, outcome: &str) -> Html<String> {
    let body = format!(
        r#"<h2>ERD for sample case</h2>
<img src="/assets/erd.png" alt="Online Media Subscription ERD">
<h3>Sample questions:</h3>
{}
{}{outcome}"#,
        questions_html(),
        form_html(sql)
    );
    Html(views::page(TITLE, &body))
}

/// Renders the diagram and questions only; no query runs until a submit.
pub async fn sample_page() -> Html<String> {
    render("", "")
}

pub async fn sample_submit(
    State(state): State<PadState>,
    Form(form): Form<SampleForm>,
) -> Html<String> {
    let result = match form.action {
        SampleAction::Run => db::run_sql(&state.sample_db, &form.sql).await,
        SampleAction::Tables => db::list_tables(&state.sample_db).await,
    };
    let outcome = match result {
        Ok(result) => views::result_table(&result, None),
        Err(e) => {
            warn!(error = %e, "sample case query failed");
            views::error_line(&e.to_string())
        }
    };
    render(&form.sql, &outcome)
}

/// Serve the bundled ERD image.
pub async fn erd_image(State(state): State<PadState>) -> impl IntoResponse {
    match std::fs::read(state.sample_erd.as_ref()) {
        Ok(bytes) => ([(header::CONTENT_TYPE, "image/png")], bytes).into_response(),
        Err(e) => {
            warn!(path = %state.sample_erd.display(), error = %e, "ERD image missing");
            (
                StatusCode::NOT_FOUND,
                Html(views::error_page("sample ERD image not found")),
            )
                .into_response()
        }
    }
}
