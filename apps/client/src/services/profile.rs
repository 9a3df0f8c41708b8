//! Profile service client.

use crate::errors::AppError;
use crate::models::{ProfileUpdate, UserProfile};
use crate::services::ApiClient;

impl ApiClient {
    pub async fn get_profile(&self, user_id: &str) -> Result<UserProfile, AppError> {
        self.get_json(&self.api_url(&format!("/profile/{user_id}")))
            .await
    }

    /// Sends a partial update; the backend merges top-level keys the same
    /// way the store does.
    pub async fn update_profile(
        &self,
        user_id: &str,
        update: &ProfileUpdate,
    ) -> Result<(), AppError> {
        let body = serde_json::to_value(update)?;
        self.put_no_content(&self.api_url(&format!("/profile/{user_id}")), &body)
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::models::ProfileUpdate;

    #[test]
    fn test_update_payload_omits_absent_fields() {
        let update = ProfileUpdate {
            primary_job_title: Some("Engineer".into()),
            ..Default::default()
        };
        let body = serde_json::to_value(&update).unwrap();
        let object = body.as_object().unwrap();
        assert_eq!(object.len(), 1, "only present fields go on the wire");
        assert_eq!(object["primaryJobTitle"], "Engineer");
    }
}
