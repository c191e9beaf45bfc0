use axum::Form;
use axum::extract::State;
use axum::response::Html;
use serde::Deserialize;
use tracing::{info, warn};

use crate::db;
use crate::router::PadState;
use crate::service::discovery;
use crate::views;

const TITLE: &str = "Create Database";
const BLURB: &str = "<p>A database in SQLite is just a file on the server. \
By convention their names always end in .db</p>";

#[derive(Debug, Deserialize)]
pub struct CreateForm {
    pub db_filename: String,
}

fn form_html() -> &'static str {
    r#"<form method="post" action="/create">
<label>DB Filename <input type="text" name="db_filename"></label>
<button type="submit">Create Database</button>
</form>"#
}

fn render(outcome: &str) -> Html<String> {
    Html(views::page(
        TITLE,
        &format!("{BLURB}{}{outcome}", form_html()),
    ))
}

pub async fn create_page() -> Html<String> {
    render("")
}

pub async fn create_submit(
    State(state): State<PadState>,
    Form(form): Form<CreateForm>,
) -> Html<String> {
    // Suffix convention only; an existing file of the same name is reused.
    if !discovery::has_db_suffix(&form.db_filename) {
        return render(&views::error_line(
            "DB filename must end with .db, please retry.",
        ));
    }

    match db::create_database(&state.data_dir.join(&form.db_filename)).await {
        Ok(()) => {
            info!(file = %form.db_filename, "database created");
            render(&views::status_line(&format!(
                "{} created successfully!",
                form.db_filename
            )))
        }
        Err(e) => {
            warn!(file = %form.db_filename, error = %e, "database creation failed");
            render(&views::error_line(&e.to_string()))
        }
    }
}
