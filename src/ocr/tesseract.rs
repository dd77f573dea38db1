//! Tesseract OCR backend — shells out to the `tesseract` binary.
//!
//! The image bytes are written to a temp file and the CLI is run with
//! `stdout` as the output target, so no result file is left behind. The
//! subprocess runs under a timeout.

use std::io::Write;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::OcrError;
use crate::ocr::OcrEngine;

/// Default subprocess timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// OCR via the locally installed Tesseract CLI.
#[derive(Debug, Clone)]
pub struct TesseractOcr {
    command: String,
    lang: String,
    timeout: Duration,
}

impl TesseractOcr {
    /// Engine reading the given Tesseract language (e.g. `jpn`).
    pub fn new(lang: impl Into<String>) -> Self {
        Self {
            command: "tesseract".to_string(),
            lang: lang.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the binary name/path.
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = command.into();
        self
    }

    /// Override the subprocess timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl OcrEngine for TesseractOcr {
    async fn extract_text(&self, image: &[u8]) -> Result<String, OcrError> {
        // The temp file must outlive the subprocess; binding keeps it alive.
        let mut tmp = tempfile::Builder::new()
            .prefix("oinori-ocr-")
            .suffix(".jpg")
            .tempfile()?;
        tmp.write_all(image)?;
        tmp.flush()?;

        let output = Command::new(&self.command)
            .arg(tmp.path())
            .arg("stdout")
            .arg("-l")
            .arg(&self.lang)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output();

        let output = tokio::time::timeout(self.timeout, output)
            .await
            .map_err(|_| OcrError::Timeout {
                timeout: self.timeout,
            })?
            .map_err(|e| OcrError::Spawn(format!("{}: {e}", self.command)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::Failed(format!(
                "{} exited with {}: {}",
                self.command,
                output.status,
                stderr.trim()
            )));
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        tracing::debug!(chars = text.len(), lang = %self.lang, "OCR completed");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_binary_is_a_spawn_error() {
        let engine = TesseractOcr::new("jpn").with_command("definitely-not-tesseract-bin");
        let err = engine.extract_text(b"not an image").await.unwrap_err();
        assert!(matches!(err, OcrError::Spawn(_)), "got: {err}");
    }

    #[test]
    fn builder_overrides() {
        let engine = TesseractOcr::new("eng")
            .with_command("/opt/tesseract/bin/tesseract")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(engine.command, "/opt/tesseract/bin/tesseract");
        assert_eq!(engine.lang, "eng");
        assert_eq!(engine.timeout, Duration::from_secs(5));
    }
}
