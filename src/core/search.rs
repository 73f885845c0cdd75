// src/core/search.rs
//! Search orchestration: request assembly, dispatch, response application

use tracing::{info, warn};

use crate::core::conversation::{ConversationLog, Turn};
use crate::core::feedback::{FeedbackEntry, FeedbackStore};
use crate::core::service_client::BackendApi;
use crate::types::ChatMessage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    Idle,
    AwaitingResponse,
}

/// What a submission attempt did. Validation no-ops (blank query, a
/// request already in flight) are `Ignored`; collaborator failures are
/// `Failed` with the display string retained on the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Ignored,
    Completed,
    Failed,
}

/// Drives one search conversation.
///
/// Exactly one request may be outstanding; while awaiting a response,
/// new submissions are rejected rather than queued. The conversation
/// log and feedback store are borrowed per call so the presentation
/// layer stays the sole owner of session state.
pub struct SearchOrchestrator<B> {
    backend: B,
    state: SearchState,
    last_error: Option<String>,
    auto_search_fired: bool,
}

impl<B: BackendApi> SearchOrchestrator<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            state: SearchState::Idle,
            last_error: None,
            auto_search_fired: false,
        }
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Submit a user query.
    ///
    /// The user turn is appended before dispatch so the question stays
    /// visible even if the call fails; the transmitted history is
    /// snapshotted first, so the new query travels only in `message`.
    /// Pending feedback is committed to applied only after a successful
    /// response, and only if there was any at submit time.
    pub async fn submit(
        &mut self,
        log: &mut ConversationLog,
        feedback: &mut FeedbackStore,
        query: &str,
    ) -> SubmitOutcome {
        if query.trim().is_empty() {
            return SubmitOutcome::Ignored;
        }
        if self.state == SearchState::AwaitingResponse {
            warn!("Submission rejected: a search is already in flight");
            return SubmitOutcome::Ignored;
        }

        self.last_error = None;
        self.state = SearchState::AwaitingResponse;

        let history: Vec<ChatMessage> = log.history().collect();
        let effective: Vec<FeedbackEntry> = feedback.effective_feedback();
        let had_pending = feedback.pending_count() > 0;

        log.append(Turn::user(query));

        match self.backend.search_chat(query, &history, &effective).await {
            Ok(response) => {
                info!(
                    "Search returned {} of {} candidates",
                    response.data.len(),
                    response.total_rows
                );
                log.append(Turn::assistant(response.assistant_message).with_results(
                    response.data,
                    response.total_rows,
                    response.search_criteria,
                    response.query,
                ));
                if had_pending {
                    feedback.commit_pending();
                }
                self.state = SearchState::Idle;
                SubmitOutcome::Completed
            }
            Err(err) => {
                warn!("Search failed: {:#}", err);
                self.last_error = Some(err.to_string());
                self.state = SearchState::Idle;
                SubmitOutcome::Failed
            }
        }
    }

    /// Synthesize a refinement query from the pending feedback and
    /// submit it. No-op when nothing is pending.
    pub async fn refine(
        &mut self,
        log: &mut ConversationLog,
        feedback: &mut FeedbackStore,
    ) -> SubmitOutcome {
        if feedback.pending_count() == 0 {
            return SubmitOutcome::Ignored;
        }
        let query = refinement_query(feedback.pending());
        self.submit(log, feedback, &query).await
    }

    /// Fire the seed query exactly once, and only into an empty log.
    /// The latch is consumed before dispatch, so re-entrant
    /// initialization cannot produce a second request.
    pub async fn maybe_auto_search(
        &mut self,
        log: &mut ConversationLog,
        feedback: &mut FeedbackStore,
        seed: &str,
    ) -> SubmitOutcome {
        if self.auto_search_fired || seed.trim().is_empty() || !log.is_empty() {
            return SubmitOutcome::Ignored;
        }
        self.auto_search_fired = true;
        self.submit(log, feedback, seed).await
    }

    /// Start over: conversation, feedback (both buckets) and the
    /// recorded error are discarded together, never partially.
    pub fn reset_session(&mut self, log: &mut ConversationLog, feedback: &mut FeedbackStore) {
        log.clear();
        feedback.clear();
        self.last_error = None;
        info!("Session reset: conversation and feedback cleared");
    }
}

/// Natural-language refinement instruction built from pending entries:
/// liked and disliked candidates enumerated by name (with reasons when
/// present), closing with the fixed steering directive.
pub fn refinement_query(pending: &[FeedbackEntry]) -> String {
    let describe = |entry: &FeedbackEntry| match &entry.reason {
        Some(reason) => format!("{} ({})", entry.profile_name, reason),
        None => entry.profile_name.clone(),
    };

    let liked: Vec<String> = pending.iter().filter(|f| f.interesting).map(describe).collect();
    let disliked: Vec<String> = pending.iter().filter(|f| !f.interesting).map(describe).collect();

    let mut query = String::from("Refine the search based on my feedback: ");
    if !liked.is_empty() {
        query.push_str(&format!("I liked {}. ", liked.join(", ")));
    }
    if !disliked.is_empty() {
        query.push_str(&format!("I did not like {}. ", disliked.join(", ")));
    }
    query.push_str(
        "Find more profiles similar to the ones I liked and fewer like the ones I did not like.",
    );
    query
}
