use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use tower::ServiceExt;

use sqlitepad::router::{PadState, UPLOAD_BODY_LIMIT, pad_router};

fn temp_data_dir(tag: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!(
        "sqlitepad-pages-{tag}-{}-{}",
        std::process::id(),
        nanos
    ));
    fs::create_dir_all(&path).expect("failed to create data dir");
    path
}

fn app(data_dir: &PathBuf) -> axum::Router {
    let state = PadState::new(
        data_dir.clone(),
        data_dir.join("stream.db"),
        data_dir.join("erd.png"),
    );
    pad_router(state)
}

async fn body_text(resp: axum::response::Response) -> String {
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    String::from_utf8(bytes.to_vec()).expect("response body was not utf-8")
}

async fn post_form(app: &axum::Router, uri: &str, form: &str) -> axum::response::Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/x-www-form-urlencoded")
                .body(Body::from(form.to_string()))
                .expect("failed to build request"),
        )
        .await
        .expect("request failed")
}

async fn get(app: &axum::Router, uri: &str) -> axum::response::Response {
    app.clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed")
}

const BOUNDARY: &str = "sqlitepad-test-boundary";

fn multipart_upload(db_filename: &str, table_name: &str, csv: &str) -> String {
    format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"db_filename\"\r\n\r\n\
         {db_filename}\r\n\
         --{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"table_name\"\r\n\r\n\
         {table_name}\r\n\
         --{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"data.csv\"\r\n\
         Content-Type: text/csv\r\n\r\n\
         {csv}\r\n\
         --{BOUNDARY}--\r\n"
    )
}

async fn post_upload(app: &axum::Router, body: String) -> axum::response::Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/upload")
                .header(
                    "content-type",
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                )
                .body(Body::from(body))
                .expect("failed to build request"),
        )
        .await
        .expect("request failed")
}

#[tokio::test]
async fn create_rejects_filename_without_db_suffix() {
    let dir = temp_data_dir("create-reject");
    let app = app(&dir);

    let resp = post_form(&app, "/create", "db_filename=oops.txt").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains("must end with .db"));
    assert!(!dir.join("oops.txt").exists());

    let _ = fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn create_makes_exactly_one_database_file() {
    let dir = temp_data_dir("create-ok");
    let app = app(&dir);

    let resp = post_form(&app, "/create", "db_filename=fresh.db").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains("fresh.db created successfully!"));
    assert!(dir.join("fresh.db").exists());

    let entries: Vec<_> = fs::read_dir(&dir).expect("read_dir failed").collect();
    assert_eq!(entries.len(), 1);

    let _ = fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn upload_roundtrips_and_replaces_existing_table() {
    let dir = temp_data_dir("upload");
    let app = app(&dir);
    post_form(&app, "/create", "db_filename=test.db").await;

    let resp = post_upload(
        &app,
        multipart_upload("test.db", "people", "name,age\nada,36\ngrace,85\n"),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains("Data uploaded successfully"));
    assert!(body.contains("<td>ada</td>"));

    let resp = post_form(
        &app,
        "/query",
        "db_filename=test.db&sql=SELECT+name,+age+FROM+people+ORDER+BY+name&action=run",
    )
    .await;
    let body = body_text(resp).await;
    assert!(body.contains("<th>name</th>"));
    assert!(body.contains("<td>grace</td>"));
    assert!(body.contains("<td>36</td>"));

    // Re-upload different content into the same table: full replacement.
    post_upload(
        &app,
        multipart_upload("test.db", "people", "city\nlisbon\n"),
    )
    .await;
    let resp = post_form(
        &app,
        "/query",
        "db_filename=test.db&sql=SELECT+*+FROM+people&action=run",
    )
    .await;
    let body = body_text(resp).await;
    assert!(body.contains("<th>city</th>"));
    assert!(body.contains("<td>lisbon</td>"));
    assert!(!body.contains("<td>ada</td>"));

    let _ = fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn show_tables_lists_defined_tables() {
    let dir = temp_data_dir("tables");
    let app = app(&dir);
    post_form(&app, "/create", "db_filename=test.db").await;
    post_form(
        &app,
        "/query",
        "db_filename=test.db&sql=CREATE+TABLE+orders+(id)&action=run",
    )
    .await;

    let resp = post_form(&app, "/query", "db_filename=test.db&action=tables").await;
    let body = body_text(resp).await;
    assert!(body.contains("<td>orders</td>"));

    let _ = fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn invalid_sql_renders_inline_error_and_session_survives() {
    let dir = temp_data_dir("badsql");
    let app = app(&dir);
    post_form(&app, "/create", "db_filename=test.db").await;

    let resp = post_form(
        &app,
        "/query",
        "db_filename=test.db&sql=SELEC+nonsense&action=run",
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains(r#"class="error""#));

    // The page keeps accepting input afterwards.
    let resp = post_form(&app, "/query", "db_filename=test.db&action=tables").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let _ = fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn unknown_database_selection_is_rejected_inline() {
    let dir = temp_data_dir("unknown");
    let app = app(&dir);
    post_form(&app, "/create", "db_filename=real.db").await;

    let resp = post_form(
        &app,
        "/query",
        "db_filename=..%2Fescape.db&sql=SELECT+1&action=run",
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains("no database named"));

    let _ = fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn upload_and_query_pages_report_missing_databases() {
    let dir = temp_data_dir("empty");
    let app = app(&dir);

    for uri in ["/upload", "/query"] {
        let resp = get(&app, uri).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_text(resp).await;
        assert!(body.contains("No databases created."));
        assert!(!body.contains("<form"));
    }

    let _ = fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn sample_page_shows_questions_without_running_queries() {
    let dir = temp_data_dir("sample");
    let app = app(&dir);

    // The bundled database is absent; the page must still render fully.
    let resp = get(&app, "/sample").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains("/assets/erd.png"));
    assert!(body.contains("Question 5"));
    assert!(body.contains("highest star rating"));
    assert!(body.contains("horror movies watched on Fridays in Asia"));
    assert!(!body.contains(r#"class="error""#));

    let _ = fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn upload_route_rejects_oversized_body() {
    let dir = temp_data_dir("biggie");
    let app = app(&dir);
    post_form(&app, "/create", "db_filename=test.db").await;

    let oversized_csv = "x\n".repeat(UPLOAD_BODY_LIMIT / 2 + 1024);
    let resp = post_upload(&app, multipart_upload("test.db", "t", &oversized_csv)).await;
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);

    let _ = fs::remove_dir_all(&dir);
}
