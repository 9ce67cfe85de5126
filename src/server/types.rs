use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Clone, Debug)]
pub struct ShimState {
    pub dist_dir: PathBuf,
    pub entry_document: PathBuf,
}

impl ShimState {
    pub fn new(dist_dir: &Path, entry_name: &str) -> Self {
        Self {
            dist_dir: dist_dir.to_path_buf(),
            entry_document: dist_dir.join(entry_name),
        }
    }
}

// Same body shape the processing API uses for its errors
#[derive(Serialize, Debug, Deserialize, Clone)]
pub struct ApiErrorResponse {
    pub success: bool,
    pub message: String,
}
