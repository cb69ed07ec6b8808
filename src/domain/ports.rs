use crate::utils::error::Result;
use async_trait::async_trait;

/// The single capability every stage delegates its business logic to: free
/// text in, free text out, no guarantee of output shape. Consumers must
/// best-effort parse whatever comes back.
#[async_trait]
pub trait TextCompletion: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Destination for diagnostic artifacts written mid-run (the classifier's
/// trial-balance dump, the rendered statements). Injected so tests can
/// capture or discard writes instead of touching a fixed cwd path.
#[async_trait]
pub trait ArtifactSink: Send + Sync {
    async fn write_artifact(&self, name: &str, data: &[u8]) -> Result<()>;
}

/// Sink that drops everything. Used when no diagnostic trail is wanted.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullArtifacts;

#[async_trait]
impl ArtifactSink for NullArtifacts {
    async fn write_artifact(&self, _name: &str, _data: &[u8]) -> Result<()> {
        Ok(())
    }
}
