use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
}

/// Public view of a user, never carries the password hash.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
}

impl From<&UserRow> for UserProfile {
    fn from(row: &UserRow) -> Self {
        UserProfile {
            id: row.id,
            email: row.email.clone(),
            full_name: row.full_name.clone(),
        }
    }
}
