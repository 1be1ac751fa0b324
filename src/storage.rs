use crate::models::{Dataset, PresenceRows};
use serde::de::DeserializeOwned;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::{debug, error, warn};

/// Where the JSON inputs live.
#[derive(Debug, Clone)]
pub struct DataPaths {
    pub loi: PathBuf,
    pub scenarios: PathBuf,
    pub records: PathBuf,
}

impl DataPaths {
    pub fn from_env() -> Self {
        Self {
            loi: path_from_env("APP_LOI_DATA_PATH", "data/gps-traces-bh.json"),
            scenarios: path_from_env("APP_SCENARIOS_DATA_PATH", "data/gps-traces-bh-demo.json"),
            records: path_from_env("APP_RECORDS_PATH", "data/loi-records.json"),
        }
    }
}

fn path_from_env(var: &str, default: &str) -> PathBuf {
    match env::var(var) {
        Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
        _ => PathBuf::from(default),
    }
}

async fn load_json<T: DeserializeOwned>(path: &Path) -> Option<T> {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(data) => Some(data),
            Err(err) => {
                error!("failed to parse {}: {err}", path.display());
                None
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            warn!("data file {} does not exist", path.display());
            None
        }
        Err(err) => {
            error!("failed to read {}: {err}", path.display());
            None
        }
    }
}

/// Reads a GPS dataset. Any failure is logged and reported as no dataset.
pub async fn load_dataset(path: &Path) -> Option<Dataset> {
    let dataset: Dataset = load_json(path).await?;
    debug!(traces = dataset.traces.len(), "loaded {}", path.display());
    Some(dataset)
}

/// Reads the presence table rows; a missing or broken file yields no rows.
pub async fn load_rows(path: &Path) -> PresenceRows {
    load_json(path).await.unwrap_or_default()
}
