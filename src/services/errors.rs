use std::path::PathBuf;

use thiserror::Error;

use crate::domain::types::TypeConstraintError;
use crate::models::config::ConfigError;
use crate::render::RenderError;

/// Errors that abort a dashboard run.
///
/// Source failures never show up here: they are logged and replaced by
/// empty lists where they happen.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The shared HTTP client could not be built.
    #[error("http client: {0}")]
    Http(#[from] reqwest::Error),
    #[error("store catalog: {0}")]
    Catalog(#[from] TypeConstraintError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("json export: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenient alias for results of the dashboard pipeline.
pub type DashboardResult<T> = Result<T, DashboardError>;
