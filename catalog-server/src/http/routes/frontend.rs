//! Landing page and static bundle
//!
//! The built front-end lives in a dist directory:
//!
//! ```text
//! dist/
//!   index.html   served at GET /
//!   static/      served under /static/
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::{body::Bytes, extract::State, response::Html, routing::get, Router};
use tower_http::services::ServeDir;

use crate::http::server::{AppState, ServerError};

/// Front-end bundle loaded at startup
#[derive(Debug, Clone)]
pub struct FrontendAssets {
    index_html: Bytes,
    static_dir: PathBuf,
}

impl FrontendAssets {
    pub fn new(index_html: impl Into<Bytes>, static_dir: impl Into<PathBuf>) -> Self {
        Self {
            index_html: index_html.into(),
            static_dir: static_dir.into(),
        }
    }

    /// Read `index.html` from the dist directory.
    ///
    /// # Errors
    ///
    /// Returns `ServerError::MissingAsset` if the landing page cannot be read.
    pub async fn load(dist_dir: &Path) -> Result<Self, ServerError> {
        let index_path = dist_dir.join("index.html");
        let index_html = tokio::fs::read_to_string(&index_path)
            .await
            .map_err(|source| ServerError::MissingAsset {
                path: index_path.clone(),
                source,
            })?;

        tracing::info!(index = %index_path.display(), "front-end bundle loaded");
        Ok(Self::new(index_html, dist_dir.join("static")))
    }

    pub fn static_dir(&self) -> &Path {
        &self.static_dir
    }
}

/// GET /
async fn index(State(state): State<Arc<AppState>>) -> Html<Bytes> {
    Html(state.frontend.index_html.clone())
}

/// Landing page and /static/* routes
pub fn router(assets: &FrontendAssets) -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index))
        .nest_service("/static", ServeDir::new(assets.static_dir()))
}
