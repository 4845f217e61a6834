use crate::domain::values::user_role::UserRole;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An account on the portal, either an advisory admin or a client.
/// `initial_deposit` is the principal used as the ROI denominator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub initial_deposit: f64,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        email: String,
        name: String,
        role: UserRole,
        initial_deposit: f64,
        password_hash: String,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            email,
            name,
            role,
            initial_deposit,
            password_hash,
            created_at: Utc::now(),
        }
    }
}
