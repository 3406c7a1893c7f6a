//! Persistence seam. Handlers and services talk to these traits; `AppState` carries
//! `Arc<dyn UserStore>` and `Arc<dyn DocumentStore>` built once in `main`.
//!
//! Every document read or delete is scoped to the owner: a record owned by someone
//! else is reported exactly like a record that does not exist.

pub mod postgres;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::models::document::{DocumentKind, DocumentRow, DocumentSummary};
use crate::models::user::UserRow;

pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Fields for a user row about to be inserted. The email must already be normalized.
#[derive(Debug, Clone, Copy)]
pub struct NewUser<'a> {
    pub full_name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRow>, StoreError>;

    /// Inserts a user. Fails with `Conflict` if the email is already taken.
    async fn insert_user(&self, user: NewUser<'_>) -> Result<UserRow, StoreError>;
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Stores `content` for `owner_id` and returns the new record id.
    async fn save_document(
        &self,
        kind: DocumentKind,
        owner_id: Uuid,
        content: &Value,
        template: Option<&str>,
    ) -> Result<Uuid, StoreError>;

    async fn load_document(
        &self,
        kind: DocumentKind,
        id: Uuid,
        owner_id: Uuid,
    ) -> Result<DocumentRow, StoreError>;

    /// Summaries of every document of `kind` owned by `owner_id`, newest first.
    async fn list_documents(
        &self,
        kind: DocumentKind,
        owner_id: Uuid,
    ) -> Result<Vec<DocumentSummary>, StoreError>;

    async fn delete_document(
        &self,
        kind: DocumentKind,
        id: Uuid,
        owner_id: Uuid,
    ) -> Result<(), StoreError>;
}
