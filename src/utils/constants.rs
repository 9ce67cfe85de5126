pub const DEFAULT_API_BASE: &str = "http://localhost:5000";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DIST_DIR: &str = "dist";
pub const SPA_ENTRY_DOCUMENT: &str = "index.html";
pub const API_PREFIX: &str = "/api";

pub const UPLOAD_PATH: &str = "/api/upload-excel";
pub const VALIDATE_PASSWORD_PATH: &str = "/api/validate-password";
pub const UPLOAD_FIELD_NAME: &str = "excel_file";

pub const XLS_MEDIA_TYPE: &str = "application/vnd.ms-excel";
pub const XLSX_MEDIA_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const EXCEL_MEDIA_TYPES: [&str; 2] = [XLS_MEDIA_TYPE, XLSX_MEDIA_TYPE];

pub const FALLBACK_DOWNLOAD_NAME: &str = "processed_data.xlsx";

pub const SESSION_FLAG_KEY: &str = "isAuthenticated";

pub const SHIM_REQUEST_TIMEOUT_SECS: u64 = 30;

// user-facing messages
pub const MSG_INVALID_FILE_TYPE: &str = "Invalid file type. Please upload an Excel file (.xlsx, .xls).";
pub const MSG_NO_FILE_SELECTED: &str = "Please select a file first.";
pub const MSG_UPLOAD_SUCCEEDED: &str = "File processed and download started!";
pub const MSG_UNEXPECTED_ERROR: &str = "An unexpected error occurred.";
pub const MSG_PASSWORD_MISSING: &str = "Password not provided.";
pub const MSG_PASSWORD_INVALID: &str = "Invalid password.";
pub const MSG_GATE_UNREACHABLE: &str = "An error occurred. Please try again.";
