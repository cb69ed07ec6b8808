use crate::domain::ports::ArtifactSink;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::fs;
use std::path::Path;

/// Artifact sink writing under a base directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalArtifacts {
    base_path: String,
}

impl LocalArtifacts {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

#[async_trait]
impl ArtifactSink for LocalArtifacts {
    async fn write_artifact(&self, name: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(name);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_artifact_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("nested").to_string_lossy().to_string();
        let sink = LocalArtifacts::new(base.clone());

        sink.write_artifact("trial_balance.json", b"[]").await.unwrap();

        let written = std::fs::read(Path::new(&base).join("trial_balance.json")).unwrap();
        assert_eq!(written, b"[]");
    }

    #[tokio::test]
    async fn test_write_artifact_overwrites_previous_run() {
        let dir = tempfile::tempdir().unwrap();
        let sink = LocalArtifacts::new(dir.path().to_string_lossy().to_string());

        sink.write_artifact("dump.json", b"first").await.unwrap();
        sink.write_artifact("dump.json", b"second").await.unwrap();

        let written = std::fs::read(dir.path().join("dump.json")).unwrap();
        assert_eq!(written, b"second");
    }
}
