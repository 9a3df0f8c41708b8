//! Auth service client. Login is a mocked backend boundary; no token or
//! session handling happens here, and the returned `User` goes straight
//! into the store.

use serde_json::json;

use crate::errors::AppError;
use crate::models::User;
use crate::services::{require_non_empty, ApiClient};

impl ApiClient {
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AppError> {
        require_non_empty(email, "Email")?;
        require_non_empty(password, "Password")?;
        self.post_json(
            &self.api_url("/auth/login"),
            &json!({ "email": email, "password": password }),
        )
        .await
    }

    pub async fn register(
        &self,
        name: &str,
        surname: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AppError> {
        require_non_empty(name, "Name")?;
        require_non_empty(email, "Email")?;
        require_non_empty(password, "Password")?;
        self.post_json(
            &self.api_url("/auth/register"),
            &json!({
                "name": name,
                "surname": surname,
                "email": email,
                "password": password,
            }),
        )
        .await
    }
}
