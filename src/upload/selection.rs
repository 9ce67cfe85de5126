use crate::utils::constants::{EXCEL_MEDIA_TYPES, XLS_MEDIA_TYPE, XLSX_MEDIA_TYPE};
use std::path::{Path, PathBuf};

/// A file offered for selection, with the media type it declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub name: String,
    pub media_type: Option<String>,
    pub path: PathBuf,
}

/// The file staged for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub media_type: String,
    pub path: PathBuf,
}

impl CandidateFile {
    /// Builds a candidate from a path on disk, declaring its media type from the
    /// extension. Directories and missing paths produce no candidate.
    pub fn from_path(path: &Path) -> Option<Self> {
        if !path.is_file() {
            return None;
        }
        let name = path.file_name()?.to_string_lossy().to_string();
        Some(Self {
            media_type: declared_media_type(path).map(String::from),
            name,
            path: path.to_path_buf(),
        })
    }

    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }
}

pub fn declared_media_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "xls" => Some(XLS_MEDIA_TYPE),
        "xlsx" => Some(XLSX_MEDIA_TYPE),
        _ => None,
    }
}

pub fn is_excel_media_type(media_type: &str) -> bool {
    EXCEL_MEDIA_TYPES.contains(&media_type)
}

/// Accepts a candidate only when its declared type is one of the Excel types.
/// Contents are never inspected.
pub fn validate_candidate(candidate: Option<&CandidateFile>) -> Option<SelectedFile> {
    let candidate = candidate?;
    let media_type = candidate.media_type.as_deref()?;
    if !is_excel_media_type(media_type) {
        return None;
    }
    Some(SelectedFile {
        name: candidate.name.clone(),
        media_type: media_type.to_string(),
        path: candidate.path.clone(),
    })
}
