//! Jobs service client.

use crate::errors::AppError;
use crate::models::Job;
use crate::services::ApiClient;

/// How many recommendations to request when the caller does not say.
pub const DEFAULT_RECOMMENDATION_LIMIT: u32 = 50;

impl ApiClient {
    pub async fn get_job_recommendations(
        &self,
        user_id: &str,
        limit: Option<u32>,
    ) -> Result<Vec<Job>, AppError> {
        let limit = limit.unwrap_or(DEFAULT_RECOMMENDATION_LIMIT);
        self.get_json(&self.api_url(&format!("/jobs/recommendations/{user_id}?limit={limit}")))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Job;

    #[test]
    fn test_default_limit_is_fifty() {
        assert_eq!(DEFAULT_RECOMMENDATION_LIMIT, 50);
    }

    #[test]
    fn test_job_list_deserializes_from_wire_shape() {
        let json = r#"[{
            "id": "j-1",
            "title": "Backend Engineer",
            "company": "Acme",
            "location": "Remote",
            "applicationUrl": "https://acme.example/jobs/1",
            "matchScore": 0.91,
            "description": "Build services",
            "postedDate": "2026-08-01"
        }]"#;
        let jobs: Vec<Job> = serde_json::from_str(json).unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].match_percent(), 91);
    }
}
