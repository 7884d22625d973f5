//! Comment repository implementation

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use roster_api_types::{Comment, CommentPatch, CommentPayload};
use roster_interfaces::{
    CommentRepository, CrudRepository, DatabaseError, DatabaseResult, QueryRepository, Repository,
};
use roster_query::{Page, RecordQuery};

use crate::store::{InMemoryStore, HEALTH_CHECK_TIMEOUT};

#[derive(Debug, Clone)]
pub struct InMemoryCommentRepository {
    store: InMemoryStore,
}

impl InMemoryCommentRepository {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Repository for InMemoryCommentRepository {
    async fn health_check(&self) -> DatabaseResult<()> {
        self.store.read_within(HEALTH_CHECK_TIMEOUT).await?.check_comments()
    }
}

#[async_trait]
impl CrudRepository<Comment, CommentPayload> for InMemoryCommentRepository {
    async fn create(&self, new: CommentPayload) -> DatabaseResult<Comment> {
        let mut tables = self.store.write().await;
        tables.require_person(new.user_id)?;

        let id = tables.allocate_comment_id();
        let comment = new.into_comment(id, Utc::now());
        tables.comments.insert(id, comment.clone());

        debug!(comment_id = id, user_id = comment.user_id, excerpt = %comment.excerpt(), "Created comment");
        Ok(comment)
    }

    async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Comment>> {
        Ok(self.store.read().await.comments.get(&id).cloned())
    }

    /// Keeps `added`, refreshes `edited`
    async fn replace(&self, id: i64, new: CommentPayload) -> DatabaseResult<Comment> {
        let mut tables = self.store.write().await;
        tables.require_person(new.user_id)?;

        let comment = tables
            .comments
            .get_mut(&id)
            .ok_or_else(|| DatabaseError::not_found("Comment", id))?;
        comment.user_id = new.user_id;
        comment.content = new.content;
        comment.edited = Utc::now();

        Ok(comment.clone())
    }

    async fn delete(&self, id: i64) -> DatabaseResult<Comment> {
        self.store
            .write()
            .await
            .remove_comment(id)
            .ok_or_else(|| DatabaseError::not_found("Comment", id))
    }

    async fn count(&self) -> DatabaseResult<u64> {
        Ok(self.store.read().await.comments.len() as u64)
    }
}

#[async_trait]
impl QueryRepository<Comment> for InMemoryCommentRepository {
    async fn find(&self, query: &RecordQuery) -> DatabaseResult<Page<Comment>> {
        let tables = self.store.read().await;
        Ok(query.apply(tables.comments.values()))
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn patch(&self, id: i64, patch: CommentPatch) -> DatabaseResult<Comment> {
        let mut tables = self.store.write().await;
        let comment = tables
            .comments
            .get_mut(&id)
            .ok_or_else(|| DatabaseError::not_found("Comment", id))?;
        patch.apply(comment, Utc::now());
        Ok(comment.clone())
    }

    async fn find_by_user(&self, user_id: i64, query: &RecordQuery) -> DatabaseResult<Page<Comment>> {
        let tables = self.store.read().await;
        if !tables.people.contains_key(&user_id) {
            return Err(DatabaseError::not_found("User", user_id));
        }

        Ok(query.apply(tables.comments.values().filter(|comment| comment.user_id == user_id)))
    }
}
