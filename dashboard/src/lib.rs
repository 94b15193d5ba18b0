// Salescope dashboard
//
// HTTP server rendering the sales page and answering filter changes with
// freshly computed chart figures.

mod api;
mod page;

pub use api::{build_router, serve_on, DashboardServer, DashboardState};
pub use page::render_index;

use std::fs;
use std::future::Future;
use std::path::{Path, PathBuf};

use salescope_core::SalescopeError;

#[derive(thiserror::Error, Debug)]
pub enum DashboardError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },
    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
    #[error(transparent)]
    Data(#[from] SalescopeError),
}

pub type Result<T> = std::result::Result<T, DashboardError>;

/// Resolves when `signal` fires. If the signal listener itself fails, the
/// error is logged and the future never resolves, so serving continues.
pub async fn wait_for_shutdown<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => tracing::info!(target: "dashboard", "Shutdown signal received"),
        Err(e) => {
            tracing::error!(
                target: "dashboard",
                error = %e,
                "Failed to listen for shutdown signal; serving until the process is killed"
            );
            std::future::pending::<()>().await;
        }
    }
}

/// Dashboard configuration
#[derive(Clone, Debug, PartialEq)]
pub struct DashboardConfig {
    pub host: String,
    pub port: u16,
    /// CSV file loaded at startup.
    pub data_path: PathBuf,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8050,
            data_path: PathBuf::from("sales_data.csv"),
        }
    }
}

impl DashboardConfig {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            host: std::env::var("SALESCOPE_HOST")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or(default.host),
            port: std::env::var("SALESCOPE_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(default.port),
            data_path: std::env::var("SALESCOPE_DATA")
                .ok()
                .filter(|s| !s.is_empty())
                .map(PathBuf::from)
                .unwrap_or(default.data_path),
        }
    }

    /// Env-driven defaults overlaid with an optional TOML file
    /// (path via SALESCOPE_CONFIG or ./salescope.toml).
    pub fn load() -> Self {
        let base = Self::from_env();
        let path = std::env::var("SALESCOPE_CONFIG").unwrap_or_else(|_| "salescope.toml".into());
        Self::load_from(Path::new(&path), base)
    }

    /// Overlay `path` onto `base`; a missing or unreadable file leaves `base` as is.
    pub fn load_from(path: &Path, base: Self) -> Self {
        if !path.exists() {
            tracing::debug!(target: "dashboard", path = %path.display(), "No TOML config found; using defaults/env");
            return base;
        }
        match fs::read_to_string(path) {
            Ok(s) => match toml::from_str::<DashboardToml>(&s) {
                Ok(t) => t.overlay(base),
                Err(e) => {
                    tracing::warn!(target: "dashboard", error = %e, "Failed to parse TOML; using defaults");
                    base
                }
            },
            Err(e) => {
                tracing::warn!(target: "dashboard", error = %e, "Failed to read TOML; using defaults");
                base
            }
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Default, serde::Deserialize)]
struct DashboardToml {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub data_path: Option<PathBuf>,
}

impl DashboardToml {
    fn overlay(self, mut base: DashboardConfig) -> DashboardConfig {
        if let Some(x) = self.host {
            base.host = x;
        }
        if let Some(x) = self.port {
            base.port = x;
        }
        if let Some(x) = self.data_path {
            base.data_path = x;
        }
        base
    }
}
