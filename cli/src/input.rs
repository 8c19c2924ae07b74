#![deny(missing_docs)]

//! # Input Acquisition
//!
//! Reads the OpenAPI document from a local path or (with the `client`
//! feature) over HTTP. Fetching is a one-shot, awaited-to-completion
//! operation; the core never performs I/O.

use o2ts_core::{AppError, AppResult};

/// Reads the document text from a local path or URL.
pub fn read_document(input: &str) -> AppResult<String> {
    if input.starts_with("http://") || input.starts_with("https://") {
        return fetch_url(input);
    }

    Ok(std::fs::read_to_string(input)?)
}

#[cfg(feature = "client")]
fn fetch_url(url: &str) -> AppResult<String> {
    let mut response = ureq::get(url)
        .header("Accept", "application/json")
        .call()
        .map_err(|e| AppError::General(format!("Failed to fetch '{}': {}", url, e)))?;

    response
        .body_mut()
        .read_to_string()
        .map_err(|e| AppError::General(format!("Failed to read response from '{}': {}", url, e)))
}

#[cfg(not(feature = "client"))]
fn fetch_url(url: &str) -> AppResult<String> {
    Err(AppError::Config(format!(
        "URL input '{}' requires a build with the 'client' feature",
        url
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_reads_local_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{\"openapi\": \"3.0.0\"}}").unwrap();

        let text = read_document(file.path().to_str().unwrap()).unwrap();
        assert!(text.contains("3.0.0"));
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let err = read_document("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }
}
