use serde::{Deserialize, Serialize};

/// A recommended job with its AI match score (a 0..1 fraction).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub application_url: String,
    pub match_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posted_date: Option<String>,
}

impl Job {
    /// Match score as a 0–100 percentage for the UI bar.
    ///
    /// The upstream service is not trusted to stay inside [0, 1]; values
    /// outside the range clamp to the nearest bound.
    pub fn match_percent(&self) -> u8 {
        (self.match_score.clamp(0.0, 1.0) * 100.0).round() as u8
    }
}

/// Job-search preferences. Replace-only: the store never merges these.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPreferences {
    pub preferred_role: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub open_to_remote: bool,
    #[serde(default)]
    pub contract_types: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_salary: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_salary: Option<u32>,
}
