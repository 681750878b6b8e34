use std::{path::PathBuf, sync::Arc};

/// Handlers re-read the source on every request, so the state only says where
/// it lives.
#[derive(Clone)]
pub struct AppState {
    pub source_path: Arc<PathBuf>,
}

impl AppState {
    pub fn new(source_path: PathBuf) -> Self {
        Self {
            source_path: Arc::new(source_path),
        }
    }
}
