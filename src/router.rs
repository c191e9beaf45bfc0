use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::response::Html;
use axum::routing::get;

use crate::config::Config;
use crate::handlers::{create, query, sample, upload};
use crate::views;

/// Cap on upload request bodies; oversized CSVs get 413.
pub const UPLOAD_BODY_LIMIT: usize = 32 * 1024 * 1024;

/// Shared page state: just the configured paths. Pages re-derive everything
/// else from the filesystem on each request.
#[derive(Clone)]
pub struct PadState {
    pub data_dir: Arc<PathBuf>,
    pub sample_db: Arc<PathBuf>,
    pub sample_erd: Arc<PathBuf>,
}

impl PadState {
    pub fn new(data_dir: PathBuf, sample_db: PathBuf, sample_erd: PathBuf) -> Self {
        Self {
            data_dir: Arc::new(data_dir),
            sample_db: Arc::new(sample_db),
            sample_erd: Arc::new(sample_erd),
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(
            cfg.data_dir.clone(),
            cfg.sample_db.clone(),
            cfg.sample_erd.clone(),
        )
    }
}

pub fn pad_router(state: PadState) -> Router {
    Router::new()
        .route("/", get(landing))
        .route("/create", get(create::create_page).post(create::create_submit))
        .route("/upload", get(upload::upload_page).post(upload::upload_submit))
        .route("/query", get(query::query_page).post(query::query_submit))
        .route("/sample", get(sample::sample_page).post(sample::sample_submit))
        .route("/assets/erd.png", get(sample::erd_image))
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
        .with_state(state)
}

async fn landing() -> Html<String> {
    Html(views::page(
        "SQLite Workbench",
        "<p>Select a page from the menu above.</p>",
    ))
}
