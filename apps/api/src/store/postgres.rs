use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::document::{DocumentKind, DocumentRow, DocumentSummary};
use crate::models::user::UserRow;
use crate::store::{DocumentStore, NewUser, StoreError, UserStore};

/// PostgreSQL-backed store. Cheap to clone; the pool is shared.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool }
    }
}

/// Column expression for the template, which only résumés carry.
fn template_column(kind: DocumentKind) -> &'static str {
    match kind {
        DocumentKind::Resume => "template",
        DocumentKind::CoverLetter => "NULL::VARCHAR",
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRow>, StoreError> {
        Ok(sqlx::query_as::<_, UserRow>(
            "SELECT id, full_name, email, password_hash FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn insert_user(&self, user: NewUser<'_>) -> Result<UserRow, StoreError> {
        sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (id, full_name, email, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, full_name, email, password_hash
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user.full_name)
        .bind(user.email)
        .bind(user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db) = &e {
                if db.is_unique_violation() {
                    return StoreError::Conflict("User already exists".to_string());
                }
            }
            StoreError::Database(e)
        })
    }
}

#[async_trait]
impl DocumentStore for PgStore {
    async fn save_document(
        &self,
        kind: DocumentKind,
        owner_id: Uuid,
        content: &Value,
        template: Option<&str>,
    ) -> Result<Uuid, StoreError> {
        let id = Uuid::new_v4();
        match kind {
            DocumentKind::Resume => {
                sqlx::query(
                    "INSERT INTO resumes (id, user_id, content, template) VALUES ($1, $2, $3, $4)",
                )
                .bind(id)
                .bind(owner_id)
                .bind(content)
                .bind(template)
                .execute(&self.pool)
                .await?;
            }
            DocumentKind::CoverLetter => {
                sqlx::query("INSERT INTO cover_letters (id, user_id, content) VALUES ($1, $2, $3)")
                    .bind(id)
                    .bind(owner_id)
                    .bind(content)
                    .execute(&self.pool)
                    .await?;
            }
        }
        Ok(id)
    }

    async fn load_document(
        &self,
        kind: DocumentKind,
        id: Uuid,
        owner_id: Uuid,
    ) -> Result<DocumentRow, StoreError> {
        let sql = format!(
            "SELECT id, user_id, content, {} AS template, created_at, updated_at \
             FROM {} WHERE id = $1 AND user_id = $2",
            template_column(kind),
            kind.table()
        );
        sqlx::query_as::<_, DocumentRow>(&sql)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::NotFound(kind.label().to_string()))
    }

    async fn list_documents(
        &self,
        kind: DocumentKind,
        owner_id: Uuid,
    ) -> Result<Vec<DocumentSummary>, StoreError> {
        let sql = format!(
            "SELECT id, {} AS template, created_at FROM {} \
             WHERE user_id = $1 ORDER BY created_at DESC",
            template_column(kind),
            kind.table()
        );
        Ok(sqlx::query_as::<_, DocumentSummary>(&sql)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn delete_document(
        &self,
        kind: DocumentKind,
        id: Uuid,
        owner_id: Uuid,
    ) -> Result<(), StoreError> {
        let sql = format!("DELETE FROM {} WHERE id = $1 AND user_id = $2", kind.table());
        let result = sqlx::query(&sql)
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(kind.label().to_string()));
        }
        Ok(())
    }
}
