// src/types/job.rs
use serde::{Deserialize, Serialize};

/// Partial job opening record, filled incrementally by the intake
/// conversation. Every field is optional; the collaborator decides when
/// the record is complete.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seniority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub challenges: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reports_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub influence_over: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsibilities: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first3_months_deliverables: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub critical_routines: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technical_skills: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub behavioral_skills: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_experience: Option<String>,
    #[serde(rename = "metricsAndKPIs", skip_serializing_if = "Option::is_none")]
    pub metrics_and_kpis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hybrid_days: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub benefits: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,
}

impl JobRecord {
    /// The headline fields the intake progress panel tracks.
    pub fn headline_fields(&self) -> [(&'static str, bool); 6] {
        [
            ("title", self.title.is_some()),
            ("area", self.area.is_some()),
            ("seniority", self.seniority.is_some()),
            ("work format", self.work_format.is_some()),
            ("salary", self.salary.is_some()),
            ("contract type", self.contract_type.is_some()),
        ]
    }
}
