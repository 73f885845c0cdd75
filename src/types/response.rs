// src/types/response.rs
use serde::{Deserialize, Serialize};

use crate::types::candidate::Candidate;
use crate::types::job::JobRecord;

/// One history element as transmitted to the collaborators. Candidate
/// payloads and metadata never travel with it; the textual exchange is
/// all the backend needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

// ===== Service Response Types =====

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub query: String,
    #[serde(default)]
    pub explanation: String,
    pub data: Vec<Candidate>,
    pub total_rows: u64,
    pub assistant_message: String,
    pub search_criteria: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListExportResponse {
    pub success: bool,
    pub candidates_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub click_up_task_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub click_up_task_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobChatResponse {
    pub assistant_message: String,
    pub current_job_data: JobRecord,
    pub is_complete: bool,
    #[serde(default)]
    pub missing_fields: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobCreationResponse {
    pub job: JobRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub click_up_list_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub click_up_list_url: Option<String>,
    pub search_query: String,
}

/// Error body the collaborators return on non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_response_wire_shape() {
        let raw = r#"{
            "query": "SELECT 1",
            "explanation": "",
            "data": [{"profile_id": "p-1", "full_name": "Ana Lima"}],
            "totalRows": 50,
            "assistantMessage": "Found 50 candidates.",
            "searchCriteria": "python; são paulo"
        }"#;
        let parsed: SearchResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.total_rows, 50);
        assert_eq!(parsed.data.len(), 1);
        assert_eq!(parsed.search_criteria, "python; são paulo");
    }

    #[test]
    fn test_list_export_response_optional_fields() {
        let raw = r#"{"success": true, "candidatesCount": 12}"#;
        let parsed: ListExportResponse = serde_json::from_str(raw).unwrap();
        assert!(parsed.success);
        assert_eq!(parsed.candidates_count, 12);
        assert!(parsed.click_up_task_url.is_none());
    }
}
