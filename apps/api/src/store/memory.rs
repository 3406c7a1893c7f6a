// In-memory store for handler and service tests. Mirrors PgStore semantics:
// unique emails, owner-scoped reads and deletes, newest-first listings.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::document::{DocumentKind, DocumentRow, DocumentSummary};
use crate::models::user::UserRow;
use crate::store::{DocumentStore, NewUser, StoreError, UserStore};

#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<Vec<UserRow>>,
    documents: RwLock<Vec<(DocumentKind, DocumentRow)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRow>, StoreError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn insert_user(&self, user: NewUser<'_>) -> Result<UserRow, StoreError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::Conflict("User already exists".to_string()));
        }
        let row = UserRow {
            id: Uuid::new_v4(),
            full_name: user.full_name.to_string(),
            email: user.email.to_string(),
            password_hash: user.password_hash.to_string(),
        };
        users.push(row.clone());
        Ok(row)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn save_document(
        &self,
        kind: DocumentKind,
        owner_id: Uuid,
        content: &Value,
        template: Option<&str>,
    ) -> Result<Uuid, StoreError> {
        let mut documents = self.documents.write().await;
        // Strictly increasing timestamps so listings order deterministically.
        let created_at = Utc::now() + Duration::milliseconds(documents.len() as i64);
        let row = DocumentRow {
            id: Uuid::new_v4(),
            user_id: owner_id,
            content: content.clone(),
            template: match kind {
                DocumentKind::Resume => template.map(str::to_string),
                DocumentKind::CoverLetter => None,
            },
            created_at,
            updated_at: created_at,
        };
        let id = row.id;
        documents.push((kind, row));
        Ok(id)
    }

    async fn load_document(
        &self,
        kind: DocumentKind,
        id: Uuid,
        owner_id: Uuid,
    ) -> Result<DocumentRow, StoreError> {
        let documents = self.documents.read().await;
        documents
            .iter()
            .find(|(k, row)| *k == kind && row.id == id && row.user_id == owner_id)
            .map(|(_, row)| row.clone())
            .ok_or_else(|| StoreError::NotFound(kind.label().to_string()))
    }

    async fn list_documents(
        &self,
        kind: DocumentKind,
        owner_id: Uuid,
    ) -> Result<Vec<DocumentSummary>, StoreError> {
        let documents = self.documents.read().await;
        let mut summaries: Vec<DocumentSummary> = documents
            .iter()
            .filter(|(k, row)| *k == kind && row.user_id == owner_id)
            .map(|(_, row)| DocumentSummary {
                id: row.id,
                template: row.template.clone(),
                created_at: row.created_at,
            })
            .collect();
        summaries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(summaries)
    }

    async fn delete_document(
        &self,
        kind: DocumentKind,
        id: Uuid,
        owner_id: Uuid,
    ) -> Result<(), StoreError> {
        let mut documents = self.documents.write().await;
        let before = documents.len();
        documents.retain(|(k, row)| !(*k == kind && row.id == id && row.user_id == owner_id));
        if documents.len() == before {
            return Err(StoreError::NotFound(kind.label().to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::stored_content;
    use crate::models::cover_letter::{CoverLetterContent, SenderInfo};
    use crate::models::resume::{
        Certification, ProfessionalInfo, Project, ResumeContent, Technologies, WorkExperience,
    };
    use serde_json::json;

    fn new_user<'a>(email: &'a str) -> NewUser<'a> {
        NewUser {
            full_name: "Ada Lovelace",
            email,
            password_hash: "hash",
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let store = MemoryStore::new();
        store.insert_user(new_user("ada@example.com")).await.unwrap();
        let err = store.insert_user(new_user("ada@example.com")).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_documents_are_owner_scoped() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let id = store
            .save_document(DocumentKind::Resume, owner, &json!({"a": 1}), Some("modern"))
            .await
            .unwrap();

        assert!(store.load_document(DocumentKind::Resume, id, owner).await.is_ok());
        assert!(matches!(
            store.load_document(DocumentKind::Resume, id, stranger).await,
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.load_document(DocumentKind::CoverLetter, id, owner).await,
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.delete_document(DocumentKind::Resume, id, stranger).await,
            Err(StoreError::NotFound(_))
        ));
        store.delete_document(DocumentKind::Resume, id, owner).await.unwrap();
        assert!(store
            .list_documents(DocumentKind::Resume, owner)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_resume_content_survives_save_and_load() {
        let resume = ResumeContent {
            professional_info: ProfessionalInfo {
                name: "Ada Lovelace".into(),
                role: Some("Systems Engineer".into()),
                email: Some("ada@example.com".into()),
                phone: Some("555-0100".into()),
                ..Default::default()
            },
            summary: Some("Builds engines.".into()),
            work_experience: vec![WorkExperience {
                position: Some("Staff Engineer".into()),
                company: Some("Analytical Engines Ltd".into()),
                start_date: Some("2021-03-01".into()),
                end_date: Some("Present".into()),
                achievements: vec!["Cut p99 latency by 40%".into()],
                ..Default::default()
            }],
            projects: vec![Project {
                name: Some("Difference Engine".into()),
                technologies: Some(Technologies::List(vec!["Rust".into(), "SQL".into()])),
                ..Default::default()
            }],
            certifications: vec![Certification {
                name: Some("CKA".into()),
                issue_date: Some("2023-01-15".into()),
                credential_id: Some("ABC-123".into()),
                ..Default::default()
            }],
            skills: vec!["Rust".into(), "Postgres".into()],
            ..Default::default()
        };
        let saved = serde_json::to_value(&resume).unwrap();

        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let id = store
            .save_document(DocumentKind::Resume, owner, &saved, Some("modern"))
            .await
            .unwrap();
        let row = store.load_document(DocumentKind::Resume, id, owner).await.unwrap();

        assert_eq!(row.id, id);
        assert_eq!(row.user_id, owner);
        assert_eq!(row.template.as_deref(), Some("modern"));
        assert_eq!(row.content, saved);
        let loaded: ResumeContent = stored_content(row.content).unwrap();
        assert_eq!(loaded, resume);
    }

    #[tokio::test]
    async fn test_cover_letter_content_survives_save_and_load() {
        let letter = CoverLetterContent {
            user_info: SenderInfo {
                name: "Grace Hopper".into(),
                address: Some("12 Harbor Rd".into()),
                email: Some("grace@example.com".into()),
                phone: None,
            },
            date: Some("March 3, 2024".into()),
            company: Some("Compiler Co".into()),
            hiring_manager_name: Some("Dr. Knuth".into()),
            body: "First paragraph.\nSecond paragraph.".into(),
            ..Default::default()
        };
        let saved = serde_json::to_value(&letter).unwrap();

        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let id = store
            .save_document(DocumentKind::CoverLetter, owner, &saved, None)
            .await
            .unwrap();
        let row = store
            .load_document(DocumentKind::CoverLetter, id, owner)
            .await
            .unwrap();

        assert!(row.template.is_none());
        assert_eq!(row.content, saved);
        let loaded: CoverLetterContent = stored_content(row.content).unwrap();
        assert_eq!(loaded, letter);
    }

    #[tokio::test]
    async fn test_listing_is_newest_first() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let first = store
            .save_document(DocumentKind::CoverLetter, owner, &json!({}), Some("ignored"))
            .await
            .unwrap();
        let second = store
            .save_document(DocumentKind::CoverLetter, owner, &json!({}), None)
            .await
            .unwrap();
        let listed = store
            .list_documents(DocumentKind::CoverLetter, owner)
            .await
            .unwrap();
        assert_eq!(
            listed.iter().map(|s| s.id).collect::<Vec<_>>(),
            vec![second, first]
        );
        assert!(listed.iter().all(|s| s.template.is_none()));
    }
}
