// src/types/mod.rs
pub mod candidate;
pub mod job;
pub mod response;

pub use candidate::Candidate;
pub use job::JobRecord;
pub use response::{
    ChatMessage, JobChatResponse, JobCreationResponse, ListExportResponse, SearchResponse,
};
