// src/core/aggregator.rs
//! Derived cross-turn candidate views, recomputed on every read

use std::collections::HashSet;

use crate::core::conversation::ConversationLog;
use crate::core::feedback::FeedbackStore;
use crate::types::Candidate;

/// The deduplicated candidate set partitioned by effective feedback
/// state. Borrowed from the log; build it fresh whenever it is needed.
#[derive(Debug)]
pub struct CandidateBreakdown<'a> {
    pub all: Vec<&'a Candidate>,
    pub interesting: Vec<&'a Candidate>,
    pub not_interesting: Vec<&'a Candidate>,
    pub unevaluated: Vec<&'a Candidate>,
}

impl<'a> CandidateBreakdown<'a> {
    pub fn total(&self) -> usize {
        self.all.len()
    }
}

/// Flatten all turns' candidate batches in turn order and deduplicate by
/// `profile_id`, keeping the first occurrence. The first sighting's
/// attributes are authoritative; later duplicates are dropped whole.
pub fn unique_candidates(log: &ConversationLog) -> Vec<&Candidate> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut unique = Vec::new();

    for turn in log.turns() {
        for candidate in &turn.candidates {
            if seen.insert(candidate.profile_id.as_str()) {
                unique.push(candidate);
            }
        }
    }

    unique
}

/// Partition the deduplicated set by the store's effective state. A
/// candidate with a pending entry lands in the bucket matching that
/// pending value, not its applied one.
pub fn breakdown<'a>(
    log: &'a ConversationLog,
    feedback: &FeedbackStore,
) -> CandidateBreakdown<'a> {
    let all = unique_candidates(log);
    let mut interesting = Vec::new();
    let mut not_interesting = Vec::new();
    let mut unevaluated = Vec::new();

    for candidate in &all {
        match feedback.effective_verdict(&candidate.profile_id) {
            Some(true) => interesting.push(*candidate),
            Some(false) => not_interesting.push(*candidate),
            None => unevaluated.push(*candidate),
        }
    }

    CandidateBreakdown {
        all,
        interesting,
        not_interesting,
        unevaluated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::conversation::Turn;

    fn candidate(id: &str, headline: &str) -> Candidate {
        Candidate {
            profile_id: id.to_string(),
            full_name: format!("Candidate {}", id),
            headline: headline.to_string(),
            current_job_title: String::new(),
            current_company: String::new(),
            seniority: String::new(),
            city: String::new(),
            state: String::new(),
            profile_url: String::new(),
            profile_image_url: None,
            about_me: None,
            area: None,
            macroarea: None,
        }
    }

    fn log_with_batches(batches: Vec<Vec<Candidate>>) -> ConversationLog {
        let mut log = ConversationLog::new();
        for batch in batches {
            log.append(Turn::user("query"));
            log.append(Turn::assistant("results").with_results(
                batch,
                0,
                String::new(),
                String::new(),
            ));
        }
        log
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let log = log_with_batches(vec![
            vec![candidate("p-42", "first headline"), candidate("p-1", "")],
            vec![candidate("p-42", "second headline"), candidate("p-2", "")],
        ]);

        let unique = unique_candidates(&log);
        assert_eq!(unique.len(), 3);
        let p42 = unique.iter().find(|c| c.profile_id == "p-42").unwrap();
        assert_eq!(p42.headline, "first headline");
    }

    #[test]
    fn test_dedup_count_equals_distinct_ids() {
        let log = log_with_batches(vec![
            vec![candidate("a", ""), candidate("b", "")],
            vec![candidate("b", ""), candidate("c", ""), candidate("a", "")],
            vec![candidate("c", "")],
        ]);
        assert_eq!(unique_candidates(&log).len(), 3);
    }

    #[test]
    fn test_partition_by_effective_state() {
        let log = log_with_batches(vec![vec![
            candidate("p-1", ""),
            candidate("p-2", ""),
            candidate("p-3", ""),
        ]]);

        let mut feedback = FeedbackStore::new();
        feedback.set_feedback("p-1", "Candidate p-1", Some(true), None);
        feedback.set_feedback("p-2", "Candidate p-2", Some(false), None);

        let view = breakdown(&log, &feedback);
        assert_eq!(view.total(), 3);
        assert_eq!(view.interesting.len(), 1);
        assert_eq!(view.not_interesting.len(), 1);
        assert_eq!(view.unevaluated.len(), 1);
        assert_eq!(view.unevaluated[0].profile_id, "p-3");
    }

    #[test]
    fn test_pending_shadows_applied_in_partition() {
        let log = log_with_batches(vec![vec![candidate("p-1", "")]]);

        let mut feedback = FeedbackStore::new();
        feedback.set_feedback("p-1", "Candidate p-1", Some(true), None);
        feedback.commit_pending();
        feedback.set_feedback("p-1", "Candidate p-1", Some(false), None);

        let view = breakdown(&log, &feedback);
        assert!(view.interesting.is_empty());
        assert_eq!(view.not_interesting.len(), 1);
    }
}
