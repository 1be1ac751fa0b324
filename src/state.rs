use crate::storage::DataPaths;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub paths: Arc<DataPaths>,
    pub subject_name: Arc<str>,
}

impl AppState {
    pub fn new(paths: DataPaths, subject_name: impl Into<String>) -> Self {
        Self {
            paths: Arc::new(paths),
            subject_name: Arc::from(subject_name.into()),
        }
    }
}
