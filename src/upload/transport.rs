use crate::upload::selection::SelectedFile;
use crate::upload::types::{Failure, ProcessedFile};
use crate::utils::constants::{FALLBACK_DOWNLOAD_NAME, UPLOAD_FIELD_NAME, UPLOAD_PATH};
use crate::utils::urls::endpoint_url;
use reqwest::header::CONTENT_DISPOSITION;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use url::Url;

/// Posts spreadsheets to the processing API.
#[derive(Clone)]
pub struct UploadClient {
    http_client: Client,
    endpoint: Url,
}

impl UploadClient {
    pub fn new(http_client: Client, api_base: &Url) -> Self {
        Self {
            http_client,
            endpoint: endpoint_url(api_base, UPLOAD_PATH),
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// One POST, no retries. Every failure is mapped to a [`Failure`].
    pub async fn send(&self, file: &SelectedFile) -> Result<ProcessedFile, Failure> {
        let contents = tokio::fs::read(&file.path).await.map_err(|e| {
            tracing::warn!("could not read {}: {}", file.path.display(), e);
            Failure::generic()
        })?;

        let part = Part::bytes(contents)
            .file_name(file.name.clone())
            .mime_str(&file.media_type)
            .map_err(|e| {
                tracing::warn!("bad media type {:?}: {}", file.media_type, e);
                Failure::generic()
            })?;
        let form = Form::new().part(UPLOAD_FIELD_NAME, part);

        tracing::info!("uploading {} to {}", file.name, self.endpoint);
        let response = self
            .http_client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("upload request failed: {}", e);
                Failure::generic()
            })?;

        read_response(response).await
    }
}

async fn read_response(response: Response) -> Result<ProcessedFile, Failure> {
    let status = response.status();

    if status.is_success() {
        let file_name = suggested_file_name(
            response
                .headers()
                .get(CONTENT_DISPOSITION)
                .and_then(|v| v.to_str().ok()),
        );
        let bytes = response.bytes().await.map_err(|e| {
            tracing::warn!("could not read processed file: {}", e);
            Failure::generic()
        })?;
        tracing::info!("received {} ({} bytes)", file_name, bytes.len());
        return Ok(ProcessedFile { file_name, bytes });
    }

    let body = response.bytes().await.unwrap_or_default();
    let failure = Failure::from_error_body(&body);
    tracing::warn!("upload rejected with {}: {}", status, failure.message);
    Err(failure)
}

/// Pulls the quoted `filename="..."` value out of a content-disposition header.
pub fn suggested_file_name(content_disposition: Option<&str>) -> String {
    content_disposition
        .and_then(quoted_file_name)
        .map(String::from)
        .unwrap_or_else(|| FALLBACK_DOWNLOAD_NAME.to_string())
}

fn quoted_file_name(header: &str) -> Option<&str> {
    const TOKEN: &str = "filename=\"";
    let start = header.find(TOKEN)? + TOKEN.len();
    let rest = &header[start..];
    let name = &rest[..rest.find('"')?];
    (!name.is_empty()).then_some(name)
}
