use serde::{Deserialize, Serialize};

/// An authenticated account. Created on login/signup, immutable once set,
/// cleared on logout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub surname: String,
}
