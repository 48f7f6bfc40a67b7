//! Submission Log Storage
//!
//! Append-only file-backed log of user submissions. Independent lifecycle
//! from the price history: entries are never trimmed, and review-state
//! transitions belong to an external admin process.

use std::path::{Path, PathBuf};

use coconut_core::{CoconutResult, Submission, SubmissionStatus};
use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, info};

use crate::persistence;

/// Submission totals surfaced by the stats endpoint
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SubmissionCounts {
    pub total: usize,
    pub pending: usize,
}

/// Durable append-only store for user submissions
pub struct SubmissionStorage {
    path: PathBuf,
    submissions: Mutex<Vec<Submission>>,
}

impl SubmissionStorage {
    /// Open the log at `path`, bootstrapping an empty log if absent
    pub fn new<P: AsRef<Path>>(path: P) -> CoconutResult<Self> {
        let path = path.as_ref().to_path_buf();
        persistence::ensure_parent_dir(&path)?;

        let submissions: Vec<Submission> = persistence::load_or_bootstrap(&path)?;
        debug!(
            "Loaded submission log from {} ({} entries)",
            path.display(),
            submissions.len()
        );

        Ok(Self {
            path,
            submissions: Mutex::new(submissions),
        })
    }

    /// Append a submission, assigning the next sequential id.
    ///
    /// Persisted atomically; on failure neither memory nor disk changes.
    /// Returns the stored submission with its assigned id.
    pub fn append(&self, mut submission: Submission) -> CoconutResult<Submission> {
        let mut submissions = self.submissions.lock();
        submission.id = (submissions.len() + 1) as u64;

        let mut updated = submissions.clone();
        updated.push(submission.clone());
        persistence::save_atomic(&self.path, &updated)?;
        *submissions = updated;

        info!(
            "Recorded {:?} submission #{} for {}",
            submission.kind, submission.id, submission.district
        );
        Ok(submission)
    }

    /// All submissions, optionally filtered by review status, oldest first
    pub fn list(&self, status: Option<SubmissionStatus>) -> Vec<Submission> {
        let submissions = self.submissions.lock();
        match status {
            Some(status) => submissions
                .iter()
                .filter(|s| s.status == status)
                .cloned()
                .collect(),
            None => submissions.clone(),
        }
    }

    /// Total and pending counts
    pub fn counts(&self) -> SubmissionCounts {
        let submissions = self.submissions.lock();
        SubmissionCounts {
            total: submissions.len(),
            pending: submissions
                .iter()
                .filter(|s| s.status == SubmissionStatus::Pending)
                .count(),
        }
    }
}
