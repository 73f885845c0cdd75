// src/types/candidate.rs
use serde::{Deserialize, Serialize};

/// One candidate profile returned by the search collaborator.
///
/// `profile_id` is the only key used for deduplication and feedback
/// association; everything else is display payload passed through
/// untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub profile_id: String,
    pub full_name: String,
    #[serde(default)]
    pub headline: String,
    #[serde(default)]
    pub current_job_title: String,
    #[serde(default)]
    pub current_company: String,
    #[serde(default)]
    pub seniority: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub profile_url: String,
    pub profile_image_url: Option<String>,
    pub about_me: Option<String>,
    pub area: Option<String>,
    pub macroarea: Option<String>,
}

impl Candidate {
    /// "City, State" with empty parts dropped.
    pub fn location(&self) -> String {
        [self.city.as_str(), self.state.as_str()]
            .iter()
            .filter(|part| !part.is_empty())
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(city: &str, state: &str) -> Candidate {
        Candidate {
            profile_id: "p-1".to_string(),
            full_name: "Ana Lima".to_string(),
            headline: String::new(),
            current_job_title: String::new(),
            current_company: String::new(),
            seniority: String::new(),
            city: city.to_string(),
            state: state.to_string(),
            profile_url: String::new(),
            profile_image_url: None,
            about_me: None,
            area: None,
            macroarea: None,
        }
    }

    #[test]
    fn test_location_joins_present_parts() {
        assert_eq!(candidate("São Paulo", "SP").location(), "São Paulo, SP");
        assert_eq!(candidate("", "SP").location(), "SP");
        assert_eq!(candidate("", "").location(), "");
    }

    #[test]
    fn test_deserialize_with_missing_optional_fields() {
        let raw = r#"{"profile_id":"p-9","full_name":"Bia Costa"}"#;
        let parsed: Candidate = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.profile_id, "p-9");
        assert!(parsed.headline.is_empty());
        assert!(parsed.profile_image_url.is_none());
    }
}
