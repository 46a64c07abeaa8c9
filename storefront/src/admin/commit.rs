//! Ordered multi-file commit
//!
//! The store has no transactions, so a save of several files is a
//! sequence of independent writes. Writes go out in the given order and
//! stop at the first failure; the report says exactly what landed.

use std::fmt;
use vitrine_client::{ClientError, FileStore};

/// A write waiting to be sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingWrite {
    pub path: String,
    pub content: String,
    pub message: String,
    /// Last known revision; `None` creates the file
    pub revision: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommittedWrite {
    pub path: String,
    pub revision: String,
}

#[derive(Debug)]
pub struct FailedWrite {
    pub write: PendingWrite,
    pub error: ClientError,
}

/// Outcome of `commit_in_order`
#[derive(Debug, Default)]
pub struct CommitReport {
    pub committed: Vec<CommittedWrite>,
    pub failed: Option<FailedWrite>,
    /// Writes after the failure, never attempted
    pub skipped: Vec<PendingWrite>,
}

impl CommitReport {
    /// Every write landed
    pub fn is_complete(&self) -> bool {
        self.failed.is_none() && self.skipped.is_empty()
    }

    /// Some writes landed and some did not
    pub fn is_partial(&self) -> bool {
        !self.is_complete() && !self.committed.is_empty()
    }

    /// New revision of `path`, if its write landed
    pub fn revision_for(&self, path: &str) -> Option<&str> {
        self.committed
            .iter()
            .find(|c| c.path == path)
            .map(|c| c.revision.as_str())
    }

    /// The failed write followed by the skipped ones, ready to resend
    pub fn remaining(&self) -> Vec<PendingWrite> {
        self.failed
            .iter()
            .map(|f| f.write.clone())
            .chain(self.skipped.iter().cloned())
            .collect()
    }
}

impl fmt::Display for CommitReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let saved: Vec<&str> = self.committed.iter().map(|c| c.path.as_str()).collect();
        write!(f, "saved [{}]", saved.join(", "))?;
        if let Some(failed) = &self.failed {
            write!(f, "; failed {}: {}", failed.write.path, failed.error)?;
        }
        if !self.skipped.is_empty() {
            let skipped: Vec<&str> = self.skipped.iter().map(|w| w.path.as_str()).collect();
            write!(f, "; not attempted [{}]", skipped.join(", "))?;
        }
        Ok(())
    }
}

/// Send `writes` one after another, stopping at the first failure
pub async fn commit_in_order<S: FileStore + ?Sized>(
    store: &S,
    writes: Vec<PendingWrite>,
) -> CommitReport {
    let mut report = CommitReport::default();
    let mut queue = writes.into_iter();

    for write in queue.by_ref() {
        match store
            .write_file(
                &write.path,
                &write.content,
                &write.message,
                write.revision.as_deref(),
            )
            .await
        {
            Ok(revision) => report.committed.push(CommittedWrite {
                path: write.path,
                revision,
            }),
            Err(error) => {
                tracing::error!(path = %write.path, "Write failed: {}", error);
                report.failed = Some(FailedWrite { write, error });
                break;
            }
        }
    }

    report.skipped = queue.collect();
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_client::MemoryFileStore;

    fn write(path: &str, content: &str, revision: Option<String>) -> PendingWrite {
        PendingWrite {
            path: path.into(),
            content: content.into(),
            message: format!("Update {}", path),
            revision,
        }
    }

    #[tokio::test]
    async fn test_all_writes_land() {
        let store = MemoryFileStore::new();
        let rev_a = store.insert("a.json", "old").await;

        let report = commit_in_order(
            &store,
            vec![write("a.json", "new", Some(rev_a)), write("b.json", "created", None)],
        )
        .await;

        assert!(report.is_complete());
        assert!(!report.is_partial());
        assert_eq!(report.committed.len(), 2);
        assert!(report.revision_for("b.json").is_some());
        assert_eq!(store.content("a.json").await.unwrap(), "new");
        assert_eq!(report.to_string(), "saved [a.json, b.json]");
    }

    #[tokio::test]
    async fn test_stops_at_first_failure() {
        let store = MemoryFileStore::new();
        store.reject_writes("b.json").await;

        let report = commit_in_order(
            &store,
            vec![
                write("a.json", "1", None),
                write("b.json", "2", None),
                write("c.json", "3", None),
            ],
        )
        .await;

        assert!(report.is_partial());
        assert_eq!(report.committed[0].path, "a.json");
        assert_eq!(report.failed.as_ref().unwrap().write.path, "b.json");
        assert_eq!(report.skipped.len(), 1);
        assert!(store.content("c.json").await.is_none());

        let remaining: Vec<String> = report.remaining().into_iter().map(|w| w.path).collect();
        assert_eq!(remaining, ["b.json", "c.json"]);
        assert!(report.to_string().contains("failed b.json"));
        assert!(report.to_string().ends_with("not attempted [c.json]"));
    }

    #[tokio::test]
    async fn test_first_write_failure_is_not_partial() {
        let store = MemoryFileStore::new();
        store.insert("a.json", "x").await;

        let report = commit_in_order(&store, vec![write("a.json", "y", Some("stale".into()))]).await;
        assert!(!report.is_complete());
        assert!(!report.is_partial());
        assert!(report.failed.unwrap().error.is_conflict());
    }
}
