//! Document intake: turns an uploaded or remote PDF into plain resume text.

use std::sync::LazyLock;

use bytes::Bytes;
use regex::Regex;
use reqwest::{Client, Url};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Invalid document URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to download document: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("Document download returned status {status}")]
    DownloadStatus { status: u16 },

    #[error("Failed to extract text from PDF: {0}")]
    Pdf(String),

    #[error("Document contains no extractable text")]
    Empty,
}

static EXCESS_BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("blank line pattern is valid"));

/// Extracts text from PDF bytes on a blocking thread.
///
/// The PDF parser can panic on malformed input; the panic surfaces as a `Pdf` error.
pub async fn extract_text_from_pdf(bytes: Bytes) -> Result<String, DocumentError> {
    let size = bytes.len();
    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await
        .map_err(|e| DocumentError::Pdf(format!("extraction task aborted: {e}")))?
        .map_err(|e| DocumentError::Pdf(e.to_string()))?;

    let text = preprocess(&text);
    if text.is_empty() {
        return Err(DocumentError::Empty);
    }
    debug!("Extracted {} chars from {} byte PDF", text.len(), size);
    Ok(text)
}

/// Downloads a document. Only http(s) URLs are accepted.
pub async fn fetch_document(client: &Client, url: &str) -> Result<Bytes, DocumentError> {
    let parsed = Url::parse(url.trim()).map_err(|e| DocumentError::InvalidUrl(e.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(DocumentError::InvalidUrl(format!(
            "unsupported scheme '{}'",
            parsed.scheme()
        )));
    }

    info!("Downloading document from {parsed}");
    let response = client.get(parsed).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(DocumentError::DownloadStatus {
            status: status.as_u16(),
        });
    }
    Ok(response.bytes().await?)
}

/// Downloads a PDF and extracts its text.
pub async fn extract_text_from_url(client: &Client, url: &str) -> Result<String, DocumentError> {
    let bytes = fetch_document(client, url).await?;
    extract_text_from_pdf(bytes).await
}

/// Normalizes extracted text: trims and collapses runs of blank lines.
pub fn preprocess(raw: &str) -> String {
    let normalized = raw.replace("\r\n", "\n").replace('\u{c}', "\n\n");
    EXCESS_BLANK_LINES
        .replace_all(normalized.trim(), "\n\n")
        .into_owned()
}
