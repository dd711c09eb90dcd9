//! Local directory sink.

use std::path::PathBuf;

use super::{DatasetSink, OutputFormat};
use crate::error::TelemetryError;

/// Writes each dataset as a file in one directory. The directory (and its
/// parents) is created on first write.
#[derive(Debug, Clone)]
pub struct LocalSink {
    dir: PathBuf,
}

impl LocalSink {
    /// Creates a sink rooted at `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Full path of `file_name` inside the output directory.
    #[must_use]
    pub fn path_of(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }
}

impl DatasetSink for LocalSink {
    fn location(&self, file_name: &str) -> String {
        self.path_of(file_name).display().to_string()
    }

    async fn put(
        &self,
        file_name: &str,
        _format: OutputFormat,
        body: Vec<u8>,
    ) -> Result<(), TelemetryError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(self.path_of(file_name), body).await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_nested_directory() {
        let Ok(tmp) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let sink = LocalSink::new(tmp.path().join("a").join("b"));
        let result = sink.put("players.json", OutputFormat::Json, b"[]".to_vec()).await;
        assert!(result.is_ok());
        let Ok(content) = std::fs::read(sink.path_of("players.json")) else {
            panic!("file missing");
        };
        assert_eq!(content, b"[]");
    }

    #[tokio::test]
    async fn unwritable_target_is_an_io_error() {
        let Ok(tmp) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let blocker = tmp.path().join("blocker");
        if std::fs::write(&blocker, b"x").is_err() {
            panic!("setup failed");
        }
        // A regular file where the directory should be.
        let sink = LocalSink::new(&blocker);
        let result = sink.put("players.json", OutputFormat::Json, Vec::new()).await;
        assert!(matches!(result, Err(TelemetryError::Io(_))));
    }
}
