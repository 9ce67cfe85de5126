use crate::upload::types::ProcessedFile;
use crate::utils::constants::FALLBACK_DOWNLOAD_NAME;
use anyhow::{Context, Error};
use std::path::{Path, PathBuf};

/// Receives the processed artifact once the API has answered.
pub trait DownloadSink: Send + Sync {
    fn deliver(&self, file: &ProcessedFile) -> Result<PathBuf, Error>;
}

/// Writes downloads into a directory, like a browser's download folder.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl DownloadSink for DirectorySink {
    fn deliver(&self, file: &ProcessedFile) -> Result<PathBuf, Error> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating {}", self.dir.display()))?;
        let target = self.dir.join(safe_file_name(&file.file_name));
        std::fs::write(&target, &file.bytes)
            .with_context(|| format!("writing {}", target.display()))?;
        tracing::info!("saved {} bytes to {}", file.bytes.len(), target.display());
        Ok(target)
    }
}

// the name comes from a response header; never let it leave the target dir
fn safe_file_name(name: &str) -> &str {
    Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.trim().is_empty())
        .unwrap_or(FALLBACK_DOWNLOAD_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[test]
    fn strips_directories_from_suggested_names() {
        assert_eq!(safe_file_name("report.xlsx"), "report.xlsx");
        assert_eq!(safe_file_name("../../etc/passwd"), "passwd");
        assert_eq!(safe_file_name(".."), FALLBACK_DOWNLOAD_NAME);
        assert_eq!(safe_file_name(""), FALLBACK_DOWNLOAD_NAME);
    }

    #[test]
    fn writes_into_the_target_directory() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectorySink::new(dir.path().join("downloads"));
        let saved = sink
            .deliver(&ProcessedFile {
                file_name: "report.xlsx".to_string(),
                bytes: Bytes::from_static(b"PK\x03\x04"),
            })
            .unwrap();

        assert_eq!(saved, dir.path().join("downloads").join("report.xlsx"));
        assert_eq!(std::fs::read(saved).unwrap(), b"PK\x03\x04");
    }
}
