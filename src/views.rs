//! Hand-built HTML fragments for the workbench pages.
//!
//! No template engine: pages are small and fully server-rendered. Every
//! user-controlled value (filenames, SQL echoes, cell contents, error text)
//! goes through `htmlescape` before it lands in markup.

use htmlescape::{encode_attribute, encode_minimal};

use crate::db::ResultSet;

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 2em auto; max-width: 60em; }
nav a { margin-right: 1.5em; }
table { border-collapse: collapse; margin-top: 1em; }
th, td { border: 1px solid #999; padding: 0.3em 0.7em; text-align: left; }
textarea { width: 100%; font-family: monospace; }
.error { color: #b00020; }
.status { color: #1a7f37; }
.question { background: #fff3cd; padding: 0.5em 1em; margin: 0.5em 0; }
"#;

/// Full page shell with the menu nav. `body` is already-escaped markup.
pub fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>{title}</title><style>{STYLE}</style></head>
<body>
<nav>
<a href="/create">Create Database</a>
<a href="/upload">Upload Data</a>
<a href="/query">Run Query</a>
<a href="/sample">Try sample case</a>
</nav>
<h1>{title}</h1>
{body}
</body>
</html>"#,
        title = encode_minimal(title),
    )
}

pub fn error_page(message: &str) -> String {
    page("Error", &error_line(message))
}

pub fn error_line(message: &str) -> String {
    format!(r#"<p class="error">{}</p>"#, encode_minimal(message))
}

pub fn status_line(message: &str) -> String {
    format!(r#"<p class="status">{}</p>"#, encode_minimal(message))
}

/// A `<select name="db_filename">` over the discovered database files.
pub fn db_select(databases: &[String]) -> String {
    let options: String = databases
        .iter()
        .map(|name| {
            format!(
                r#"<option value="{}">{}</option>"#,
                encode_attribute(name),
                encode_minimal(name)
            )
        })
        .collect();
    format!(r#"<label>DB Filename <select name="db_filename">{options}</select></label>"#)
}

/// Render a result set as an HTML table. `limit` caps the rendered rows
/// (upload confirmation shows only the first 10).
pub fn result_table(result: &ResultSet, limit: Option<usize>) -> String {
    if result.rows.is_empty() {
        return status_line("Query returned no rows.");
    }
    let header: String = result
        .columns
        .iter()
        .map(|c| format!("<th>{}</th>", encode_minimal(c)))
        .collect();
    let shown = limit.unwrap_or(result.rows.len()).min(result.rows.len());
    let body: String = result.rows[..shown]
        .iter()
        .map(|row| {
            let cells: String = row
                .iter()
                .map(|cell| format!("<td>{}</td>", encode_minimal(cell)))
                .collect();
            format!("<tr>{cells}</tr>")
        })
        .collect();
    format!("<table><thead><tr>{header}</tr></thead><tbody>{body}</tbody></table>")
}
