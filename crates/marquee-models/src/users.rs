use chrono::NaiveDateTime;
use marquee_auth::Principal;
use serde::Serialize;
use utoipa::ToSchema;

/// A row of the `users` table.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct User {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// bcrypt hash
    #[serde(skip_serializing)]
    pub password: String,
    #[serde(skip_serializing)]
    pub created_at: NaiveDateTime,
    #[serde(skip_serializing)]
    pub updated_at: NaiveDateTime,
}

impl User {
    pub fn principal(&self) -> Principal {
        Principal::new(self.id, self.first_name.clone(), self.last_name.clone())
    }
}
