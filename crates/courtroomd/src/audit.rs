//! Judgment audit trail.
//!
//! One JSON line per judgment, appended under the data directory. Auditing
//! is strictly best-effort: a failed append is logged and the judgment
//! proceeds.

use anyhow::{Context, Result};
use courtroom_common::JudgmentEvent;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::warn;
use uuid::Uuid;

/// Audit log file name under the data directory.
pub const AUDIT_FILE: &str = "judgments.jsonl";

/// One line of the audit log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    pub id: Uuid,
    #[serde(flatten)]
    pub event: JudgmentEvent,
}

pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(AUDIT_FILE),
        }
    }

    /// Append one event, creating the file and directory on first use.
    pub fn append(&self, event: &JudgmentEvent) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).context("Failed to create audit directory")?;
        }
        let record = AuditRecord {
            id: Uuid::new_v4(),
            event: event.clone(),
        };
        let line = serde_json::to_string(&record).context("Failed to serialize audit record")?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open audit log {}", self.path.display()))?;
        writeln!(file, "{}", line).context("Failed to append audit record")?;
        Ok(())
    }

    /// Append, swallowing any failure. Judgment processing never blocks on
    /// the audit trail.
    pub fn append_best_effort(&self, event: &JudgmentEvent) {
        if let Err(err) = self.append(event) {
            warn!("Audit append failed (ignored): {err:#}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use courtroom_common::Verdict;

    fn event() -> JudgmentEvent {
        JudgmentEvent {
            uid: "u1".to_string(),
            post_id: "p1".to_string(),
            player_verdict: Verdict::Nta,
            reference_verdict: Verdict::Yta,
            correct: false,
            xp_delta: -3,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_append_writes_one_line_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let log = AuditLog::new(dir.path());

        log.append(&event()).unwrap();
        log.append(&event()).unwrap();

        let text = std::fs::read_to_string(dir.path().join(AUDIT_FILE)).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let record: AuditRecord = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(record.event.post_id, "p1");
        assert!(!record.event.correct);
    }

    #[test]
    fn test_best_effort_swallows_failure() {
        // Point the log at a path that cannot be a directory's child.
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "file, not dir").unwrap();

        let log = AuditLog::new(blocker.join("nested"));
        // Must not panic or propagate.
        log.append_best_effort(&event());
    }
}
