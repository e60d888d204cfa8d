//! repository::mock
//!
//! Mock repository client for deterministic testing.
//!
//! # Design
//!
//! Resolve documents and artifact bytes are registered up front, keyed by
//! the full coordinate string. Failures can be scripted per operation, and
//! every call is recorded so tests can assert on traffic — in particular
//! that literal-version resolution performs zero repository calls.
//!
//! # Example
//!
//! ```
//! use stevedore::coordinate::ArtifactCoordinate;
//! use stevedore::repository::{MockRepository, RepositoryClient};
//!
//! let repo = MockRepository::new().with_info(
//!     "g:a:latest:tgz",
//!     "<artifact-resolution><data><version>2.0.5</version></data></artifact-resolution>",
//! );
//!
//! let coord = ArtifactCoordinate::parse("g:a:latest:tgz").unwrap();
//! let doc = repo.artifact_info(&coord).unwrap();
//! assert!(doc.contains("2.0.5"));
//! assert_eq!(repo.operations().len(), 1);
//! ```

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};

use sha2::{Digest, Sha256};

use super::traits::{ArtifactFile, RepositoryClient, RepositoryError};
use crate::coordinate::ArtifactCoordinate;

/// Mock repository for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping; clones share state.
#[derive(Debug, Clone, Default)]
pub struct MockRepository {
    inner: Arc<Mutex<MockRepositoryInner>>,
}

#[derive(Debug, Default)]
struct MockRepositoryInner {
    /// Resolve documents keyed by coordinate string.
    info_docs: HashMap<String, String>,
    /// Artifact bytes keyed by coordinate string.
    artifacts: HashMap<String, Vec<u8>>,
    /// Operation to fail, if any.
    fail_on: Option<FailOn>,
    /// Recorded operations for verification.
    operations: Vec<MockOperation>,
}

/// Configuration for which operation should fail.
#[derive(Debug, Clone)]
pub enum FailOn {
    /// Fail `artifact_info` with the given error.
    ArtifactInfo(RepositoryError),
    /// Fail `pull_artifact` with the given error.
    PullArtifact(RepositoryError),
}

/// Recorded operation for test verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockOperation {
    /// An `artifact_info` call with the coordinate string.
    ArtifactInfo(String),
    /// A `pull_artifact` call with the coordinate string and destination.
    PullArtifact(String, std::path::PathBuf),
}

impl MockRepository {
    /// Create an empty mock repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resolve document for a coordinate string.
    pub fn with_info(self, coordinate: impl Into<String>, document: impl Into<String>) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.info_docs.insert(coordinate.into(), document.into());
        }
        self
    }

    /// Register artifact bytes for a coordinate string.
    pub fn with_artifact(self, coordinate: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.artifacts.insert(coordinate.into(), bytes.into());
        }
        self
    }

    /// Configure the mock to fail on a specific operation.
    pub fn fail_on(self, fail_on: FailOn) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.fail_on = Some(fail_on);
        }
        self
    }

    /// All recorded operations, in order.
    pub fn operations(&self) -> Vec<MockOperation> {
        let inner = self.inner.lock().unwrap();
        inner.operations.clone()
    }

    fn record(&self, op: MockOperation) {
        let mut inner = self.inner.lock().unwrap();
        inner.operations.push(op);
    }
}

impl RepositoryClient for MockRepository {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn artifact_info(&self, coordinate: &ArtifactCoordinate) -> Result<String, RepositoryError> {
        let key = coordinate.to_string();
        self.record(MockOperation::ArtifactInfo(key.clone()));

        let inner = self.inner.lock().unwrap();
        if let Some(FailOn::ArtifactInfo(err)) = &inner.fail_on {
            return Err(err.clone());
        }

        inner
            .info_docs
            .get(&key)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(key))
    }

    fn pull_artifact(
        &self,
        coordinate: &ArtifactCoordinate,
        destination: &Path,
    ) -> Result<ArtifactFile, RepositoryError> {
        let key = coordinate.to_string();
        self.record(MockOperation::PullArtifact(
            key.clone(),
            destination.to_path_buf(),
        ));

        let bytes = {
            let inner = self.inner.lock().unwrap();
            if let Some(FailOn::PullArtifact(err)) = &inner.fail_on {
                return Err(err.clone());
            }
            inner
                .artifacts
                .get(&key)
                .cloned()
                .ok_or(RepositoryError::NotFound(key))?
        };

        let path = destination.join(coordinate.file_name());
        let mut file = fs::File::create(&path).map_err(|e| {
            RepositoryError::Io(format!("cannot create {}: {}", path.display(), e))
        })?;
        file.write_all(&bytes).map_err(|e| {
            RepositoryError::Io(format!("cannot write {}: {}", path.display(), e))
        })?;

        Ok(ArtifactFile {
            path,
            size: bytes.len() as u64,
            sha256: hex::encode(Sha256::digest(&bytes)),
            remote_sha1: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn coord(s: &str) -> ArtifactCoordinate {
        ArtifactCoordinate::parse(s).unwrap()
    }

    #[test]
    fn artifact_info_returns_registered_document() {
        let repo = MockRepository::new().with_info("g:a:latest:tgz", "<doc/>");
        let doc = repo.artifact_info(&coord("g:a:latest:tgz")).unwrap();
        assert_eq!(doc, "<doc/>");
    }

    #[test]
    fn artifact_info_unknown_coordinate_is_not_found() {
        let repo = MockRepository::new();
        let result = repo.artifact_info(&coord("g:a:latest:tgz"));
        assert!(matches!(result, Err(RepositoryError::NotFound(_))));
    }

    #[test]
    fn pull_writes_registered_bytes() {
        let temp = TempDir::new().expect("temp dir");
        let repo = MockRepository::new().with_artifact("g:a:2.0.5:tgz", b"artifact".to_vec());

        let file = repo
            .pull_artifact(&coord("g:a:2.0.5:tgz"), temp.path())
            .expect("pull");

        assert_eq!(file.size, 8);
        assert_eq!(file.path, temp.path().join("a-2.0.5.tgz"));
        assert_eq!(fs::read(&file.path).expect("read"), b"artifact");
    }

    #[test]
    fn scripted_failure_is_returned() {
        let repo = MockRepository::new()
            .with_info("g:a:latest:tgz", "<doc/>")
            .fail_on(FailOn::ArtifactInfo(RepositoryError::NetworkError(
                "connection reset".into(),
            )));

        let result = repo.artifact_info(&coord("g:a:latest:tgz"));
        assert!(matches!(result, Err(RepositoryError::NetworkError(_))));
    }

    #[test]
    fn operations_are_recorded() {
        let repo = MockRepository::new().with_info("g:a:latest:tgz", "<doc/>");
        let _ = repo.artifact_info(&coord("g:a:latest:tgz"));

        let ops = repo.operations();
        assert_eq!(ops, vec![MockOperation::ArtifactInfo("g:a:latest:tgz".into())]);
    }

    #[test]
    fn mock_name() {
        assert_eq!(MockRepository::new().name(), "mock");
    }
}
