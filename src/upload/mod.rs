pub mod details;
pub mod selection;
pub mod sink;
pub mod transport;
pub mod types;
pub mod workflow;

pub use details::{DetailView, classify_details, render_failure};
pub use selection::{CandidateFile, SelectedFile};
pub use sink::{DirectorySink, DownloadSink};
pub use transport::{UploadClient, suggested_file_name};
pub use types::{Failure, Phase, ProcessedFile, UploadOutcome};
pub use workflow::{InFlight, SelectionError, UploadWorkflow};
