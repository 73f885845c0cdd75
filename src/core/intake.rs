// src/core/intake.rs
//! Job-intake conversation: structures a job opening turn by turn

use tracing::{info, warn};

use crate::core::conversation::{ConversationLog, Turn};
use crate::core::service_client::BackendApi;
use crate::types::{ChatMessage, JobRecord};

const WELCOME: &str = "Hello! I will help you set up a new job opening. Tell me:\n\
1. Job title\n\
2. Area (Technology, Product, Sales, Marketing, HR, Finance...)\n\
3. Seniority (Junior, Mid-level or Senior)\n\
4. Opening reason (replacement, team growth or new project)\n\
5. Who the role reports to";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeOutcome {
    Ignored,
    Completed,
    Failed,
}

/// The collaborator's answer to a job-creation request, kept for the
/// handoff into the candidate search.
#[derive(Debug, Clone)]
pub struct CreatedJob {
    pub job: JobRecord,
    pub click_up_list_id: Option<String>,
    pub click_up_list_url: Option<String>,
    pub search_query: String,
}

/// One job-intake conversation. Owns its own log (seeded with the
/// assistant welcome turn) and the partial record; the collaborator
/// returns the updated record plus a completeness verdict on every
/// exchange, and a failed call leaves the record exactly as it was.
pub struct JobIntakeSession<B> {
    backend: B,
    log: ConversationLog,
    record: JobRecord,
    complete: bool,
    missing_fields: Vec<String>,
    in_flight: bool,
    created: Option<CreatedJob>,
    last_error: Option<String>,
}

impl<B: BackendApi> JobIntakeSession<B> {
    pub fn new(backend: B) -> Self {
        let mut log = ConversationLog::new();
        log.append(Turn::assistant(WELCOME));

        Self {
            backend,
            log,
            record: JobRecord::default(),
            complete: false,
            missing_fields: Vec::new(),
            in_flight: false,
            created: None,
            last_error: None,
        }
    }

    pub fn log(&self) -> &ConversationLog {
        &self.log
    }

    pub fn record(&self) -> &JobRecord {
        &self.record
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn missing_fields(&self) -> &[String] {
        &self.missing_fields
    }

    pub fn created(&self) -> Option<&CreatedJob> {
        self.created.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Filled count over the headline fields the progress panel tracks.
    pub fn progress(&self) -> (usize, usize) {
        let fields = self.record.headline_fields();
        let done = fields.iter().filter(|(_, filled)| *filled).count();
        (done, fields.len())
    }

    /// Send one user message; the response replaces the partial record.
    pub async fn send(&mut self, message: &str) -> IntakeOutcome {
        if message.trim().is_empty() || self.in_flight {
            return IntakeOutcome::Ignored;
        }
        self.in_flight = true;
        self.last_error = None;

        let history: Vec<ChatMessage> = self.log.history().collect();
        self.log.append(Turn::user(message));

        let outcome = match self.backend.job_chat(message, &history, &self.record).await {
            Ok(response) => {
                self.log.append(Turn::assistant(response.assistant_message));
                self.record = response.current_job_data;
                self.complete = response.is_complete;
                self.missing_fields = response.missing_fields;
                IntakeOutcome::Completed
            }
            Err(err) => {
                warn!("Job intake exchange failed: {:#}", err);
                self.last_error = Some(err.to_string());
                IntakeOutcome::Failed
            }
        };

        self.in_flight = false;
        outcome
    }

    /// Persist the record through the job-creation collaborator and keep
    /// its answer for the search handoff.
    pub async fn create(&mut self) -> IntakeOutcome {
        if self.in_flight {
            return IntakeOutcome::Ignored;
        }
        self.in_flight = true;
        self.last_error = None;

        let outcome = match self.backend.create_job(&self.record).await {
            Ok(response) => {
                info!(
                    "Job created; seed search query: {}",
                    response.search_query
                );
                let mut confirmation = String::from("Job created successfully!");
                if let Some(url) = &response.click_up_list_url {
                    confirmation.push_str(&format!(" Task list: {}", url));
                }
                self.log.append(Turn::assistant(confirmation));
                self.record = response.job.clone();
                self.created = Some(CreatedJob {
                    job: response.job,
                    click_up_list_id: response.click_up_list_id,
                    click_up_list_url: response.click_up_list_url,
                    search_query: response.search_query,
                });
                IntakeOutcome::Completed
            }
            Err(err) => {
                warn!("Job creation failed: {:#}", err);
                self.last_error = Some(err.to_string());
                IntakeOutcome::Failed
            }
        };

        self.in_flight = false;
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::feedback::FeedbackEntry;
    use crate::types::{
        JobChatResponse, JobCreationResponse, ListExportResponse, SearchResponse,
    };
    use anyhow::Result;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    #[derive(Default)]
    struct StubBackend {
        chat_responses: Mutex<VecDeque<Result<JobChatResponse>>>,
        create_response: Mutex<Option<Result<JobCreationResponse>>>,
        chat_histories: Mutex<Vec<Vec<ChatMessage>>>,
    }

    impl BackendApi for &StubBackend {
        async fn search_chat(
            &self,
            _message: &str,
            _history: &[ChatMessage],
            _feedback: &[FeedbackEntry],
        ) -> Result<SearchResponse> {
            unimplemented!("not exercised by intake tests")
        }

        async fn export_csv(
            &self,
            _history: &[ChatMessage],
            _feedback: &[FeedbackEntry],
        ) -> Result<Vec<u8>> {
            unimplemented!("not exercised by intake tests")
        }

        async fn export_to_list(
            &self,
            _list_id: &str,
            _job_title: &str,
            _history: &[ChatMessage],
            _feedback: &[FeedbackEntry],
        ) -> Result<ListExportResponse> {
            unimplemented!("not exercised by intake tests")
        }

        async fn job_chat(
            &self,
            _message: &str,
            history: &[ChatMessage],
            _current: &JobRecord,
        ) -> Result<JobChatResponse> {
            self.chat_histories.lock().unwrap().push(history.to_vec());
            self.chat_responses.lock().unwrap().pop_front().unwrap()
        }

        async fn create_job(&self, _job: &JobRecord) -> Result<JobCreationResponse> {
            self.create_response.lock().unwrap().take().unwrap()
        }
    }

    fn chat_response(title: Option<&str>, complete: bool) -> JobChatResponse {
        JobChatResponse {
            assistant_message: "Got it. What else?".to_string(),
            current_job_data: JobRecord {
                title: title.map(|t| t.to_string()),
                ..Default::default()
            },
            is_complete: complete,
            missing_fields: vec!["salary".to_string()],
        }
    }

    #[tokio::test]
    async fn test_send_applies_returned_record() {
        let stub = StubBackend {
            chat_responses: Mutex::new(
                vec![Ok(chat_response(Some("Backend Developer"), false))].into(),
            ),
            ..Default::default()
        };
        let mut session = JobIntakeSession::new(&stub);

        let outcome = session.send("I need a backend developer").await;

        assert_eq!(outcome, IntakeOutcome::Completed);
        assert_eq!(session.record().title.as_deref(), Some("Backend Developer"));
        assert!(!session.is_complete());
        assert_eq!(session.missing_fields(), ["salary".to_string()]);
        // welcome + user + assistant
        assert_eq!(session.log().len(), 3);
    }

    #[tokio::test]
    async fn test_send_history_excludes_current_message() {
        let stub = StubBackend {
            chat_responses: Mutex::new(vec![Ok(chat_response(None, false))].into()),
            ..Default::default()
        };
        let mut session = JobIntakeSession::new(&stub);

        session.send("first message").await;

        let histories = stub.chat_histories.lock().unwrap();
        // only the seeded welcome turn travels as history
        assert_eq!(histories[0].len(), 1);
        assert_eq!(histories[0][0].role, "assistant");
    }

    #[tokio::test]
    async fn test_failed_exchange_leaves_record_untouched() {
        let stub = StubBackend {
            chat_responses: Mutex::new(
                vec![
                    Ok(chat_response(Some("Data Engineer"), false)),
                    Err(anyhow::anyhow!("intake service unavailable")),
                ]
                .into(),
            ),
            ..Default::default()
        };
        let mut session = JobIntakeSession::new(&stub);

        session.send("data engineer role").await;
        let outcome = session.send("senior level").await;

        assert_eq!(outcome, IntakeOutcome::Failed);
        assert_eq!(session.last_error(), Some("intake service unavailable"));
        assert_eq!(session.record().title.as_deref(), Some("Data Engineer"));
    }

    #[tokio::test]
    async fn test_blank_message_is_ignored() {
        let stub = StubBackend::default();
        let mut session = JobIntakeSession::new(&stub);

        assert_eq!(session.send("  ").await, IntakeOutcome::Ignored);
        assert_eq!(session.log().len(), 1); // just the welcome turn
    }

    #[tokio::test]
    async fn test_create_keeps_handoff_data() {
        let stub = StubBackend {
            create_response: Mutex::new(Some(Ok(JobCreationResponse {
                job: JobRecord {
                    title: Some("Backend Developer".to_string()),
                    ..Default::default()
                },
                click_up_list_id: Some("12345".to_string()),
                click_up_list_url: Some("https://app.clickup.com/12345".to_string()),
                search_query: "senior backend developers".to_string(),
            }))),
            ..Default::default()
        };
        let mut session = JobIntakeSession::new(&stub);

        let outcome = session.create().await;

        assert_eq!(outcome, IntakeOutcome::Completed);
        let created = session.created().unwrap();
        assert_eq!(created.search_query, "senior backend developers");
        assert_eq!(created.click_up_list_id.as_deref(), Some("12345"));
        assert!(session
            .log()
            .turns()
            .last()
            .unwrap()
            .content
            .starts_with("Job created successfully!"));
    }

    #[tokio::test]
    async fn test_create_failure_surfaces_message() {
        let stub = StubBackend {
            create_response: Mutex::new(Some(Err(anyhow::anyhow!("list quota exceeded")))),
            ..Default::default()
        };
        let mut session = JobIntakeSession::new(&stub);

        let outcome = session.create().await;

        assert_eq!(outcome, IntakeOutcome::Failed);
        assert_eq!(session.last_error(), Some("list quota exceeded"));
        assert!(session.created().is_none());
    }

    #[tokio::test]
    async fn test_progress_counts_headline_fields() {
        let stub = StubBackend {
            chat_responses: Mutex::new(
                vec![Ok(JobChatResponse {
                    assistant_message: "ok".to_string(),
                    current_job_data: JobRecord {
                        title: Some("QA Analyst".to_string()),
                        seniority: Some("Senior".to_string()),
                        salary: Some("competitive".to_string()),
                        ..Default::default()
                    },
                    is_complete: false,
                    missing_fields: vec![],
                })]
                .into(),
            ),
            ..Default::default()
        };
        let mut session = JobIntakeSession::new(&stub);
        assert_eq!(session.progress(), (0, 6));

        session.send("QA analyst, senior, competitive pay").await;
        assert_eq!(session.progress(), (3, 6));
    }
}
