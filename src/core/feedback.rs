// src/core/feedback.rs
//! Per-candidate evaluation state, split into pending and applied buckets

use serde::{Deserialize, Serialize};
use tracing::debug;

/// One evaluation of one candidate. Also the `profileFeedback[]` wire
/// element: `removed` is a tombstone the contract allows for signalling
/// deletion of a prior entry; stored entries never carry it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackEntry {
    pub profile_id: String,
    pub profile_name: String,
    pub interesting: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removed: Option<bool>,
}

/// Holds the user's candidate evaluations.
///
/// `applied` entries were already included in a dispatched request or
/// export and are immutable context for future calls. `pending` entries
/// were entered since then and stay editable until the next successful
/// dispatch moves them over. A candidate id appears at most once per
/// bucket.
#[derive(Debug, Default)]
pub struct FeedbackStore {
    applied: Vec<FeedbackEntry>,
    pending: Vec<FeedbackEntry>,
}

impl FeedbackStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or overwrite the pending entry for a candidate.
    ///
    /// `interesting = None` deletes the pending entry (explicit
    /// un-evaluation). A previously set reason survives an overwrite
    /// unless a new one is supplied; re-evaluating an applied candidate
    /// starts from that entry's reason.
    pub fn set_feedback(
        &mut self,
        profile_id: &str,
        profile_name: &str,
        interesting: Option<bool>,
        reason: Option<String>,
    ) {
        let Some(interesting) = interesting else {
            self.pending.retain(|f| f.profile_id != profile_id);
            return;
        };

        let inherited = reason.or_else(|| {
            self.pending
                .iter()
                .find(|f| f.profile_id == profile_id)
                .or_else(|| self.applied.iter().find(|f| f.profile_id == profile_id))
                .and_then(|f| f.reason.clone())
        });

        let entry = FeedbackEntry {
            profile_id: profile_id.to_string(),
            profile_name: profile_name.to_string(),
            interesting,
            reason: inherited,
            removed: None,
        };

        match self.pending.iter_mut().find(|f| f.profile_id == profile_id) {
            Some(existing) => *existing = entry,
            None => self.pending.push(entry),
        }
    }

    /// Discard all pending entries, leaving applied context untouched.
    pub fn clear_pending(&mut self) {
        self.pending.clear();
    }

    /// Move every pending entry into applied, then empty pending.
    ///
    /// An id already present in applied is overwritten in place, not
    /// duplicated. Callers invoke this only after the dispatch that
    /// carried the pending entries succeeded.
    pub fn commit_pending(&mut self) {
        let committed = self.pending.len();
        for entry in self.pending.drain(..) {
            match self
                .applied
                .iter_mut()
                .find(|f| f.profile_id == entry.profile_id)
            {
                Some(existing) => *existing = entry,
                None => self.applied.push(entry),
            }
        }
        debug!("Committed {} pending feedback entries", committed);
    }

    /// Applied ∪ pending as one ordered sequence: applied first, with
    /// ids shadowed by a pending entry resolved in favor of pending.
    pub fn effective_feedback(&self) -> Vec<FeedbackEntry> {
        let mut all: Vec<FeedbackEntry> = self
            .applied
            .iter()
            .filter(|a| !self.pending.iter().any(|p| p.profile_id == a.profile_id))
            .cloned()
            .collect();
        all.extend(self.pending.iter().cloned());
        all
    }

    /// The effective verdict for one candidate; pending wins over applied.
    pub fn effective_verdict(&self, profile_id: &str) -> Option<bool> {
        self.pending
            .iter()
            .find(|f| f.profile_id == profile_id)
            .or_else(|| self.applied.iter().find(|f| f.profile_id == profile_id))
            .map(|f| f.interesting)
    }

    /// Whether this candidate's evaluation is already locked into applied
    /// context. Used by presentation to flag re-evaluation.
    pub fn is_applied(&self, profile_id: &str) -> bool {
        self.applied.iter().any(|f| f.profile_id == profile_id)
    }

    pub fn pending_reason(&self, profile_id: &str) -> Option<&str> {
        self.pending
            .iter()
            .find(|f| f.profile_id == profile_id)
            .and_then(|f| f.reason.as_deref())
    }

    pub fn pending(&self) -> &[FeedbackEntry] {
        &self.pending
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn applied_count(&self) -> usize {
        self.applied.len()
    }

    pub fn interesting_count(&self) -> usize {
        self.effective_feedback()
            .iter()
            .filter(|f| f.interesting)
            .count()
    }

    pub fn not_interesting_count(&self) -> usize {
        self.effective_feedback()
            .iter()
            .filter(|f| !f.interesting)
            .count()
    }

    /// Drop both buckets. Only the joint session reset calls this; the
    /// conversation log is always cleared in the same breath.
    pub fn clear(&mut self) {
        self.applied.clear();
        self.pending.clear();
    }
}
