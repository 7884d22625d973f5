//! Vote repository implementation

use async_trait::async_trait;
use tracing::debug;

use roster_api_types::{Vote, VotePayload};
use roster_interfaces::{
    CrudRepository, DatabaseError, DatabaseResult, QueryRepository, Repository, VoteRepository,
};
use roster_query::{Page, RecordQuery};

use crate::store::{InMemoryStore, HEALTH_CHECK_TIMEOUT};

#[derive(Debug, Clone)]
pub struct InMemoryVoteRepository {
    store: InMemoryStore,
}

impl InMemoryVoteRepository {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Repository for InMemoryVoteRepository {
    async fn health_check(&self) -> DatabaseResult<()> {
        self.store.read_within(HEALTH_CHECK_TIMEOUT).await?.check_votes()
    }
}

#[async_trait]
impl CrudRepository<Vote, VotePayload> for InMemoryVoteRepository {
    async fn create(&self, new: VotePayload) -> DatabaseResult<Vote> {
        let mut tables = self.store.write().await;
        tables.require_person(new.user_id)?;
        tables.require_comment(new.comment_id)?;

        let id = tables.allocate_vote_id();
        let vote = new.into_vote(id);
        tables.votes.insert(id, vote);

        debug!(vote_id = id, comment_id = vote.comment_id, user_id = vote.user_id, "Created vote");
        Ok(vote)
    }

    async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Vote>> {
        Ok(self.store.read().await.votes.get(&id).copied())
    }

    async fn replace(&self, id: i64, new: VotePayload) -> DatabaseResult<Vote> {
        let mut tables = self.store.write().await;
        tables.require_person(new.user_id)?;
        tables.require_comment(new.comment_id)?;

        let vote = tables
            .votes
            .get_mut(&id)
            .ok_or_else(|| DatabaseError::not_found("Vote", id))?;
        *vote = new.into_vote(id);
        Ok(*vote)
    }

    async fn delete(&self, id: i64) -> DatabaseResult<Vote> {
        self.store
            .write()
            .await
            .votes
            .remove(&id)
            .ok_or_else(|| DatabaseError::not_found("Vote", id))
    }

    async fn count(&self) -> DatabaseResult<u64> {
        Ok(self.store.read().await.votes.len() as u64)
    }
}

#[async_trait]
impl QueryRepository<Vote> for InMemoryVoteRepository {
    async fn find(&self, query: &RecordQuery) -> DatabaseResult<Page<Vote>> {
        let tables = self.store.read().await;
        Ok(query.apply(tables.votes.values()))
    }
}

#[async_trait]
impl VoteRepository for InMemoryVoteRepository {
    async fn find_by_comment(&self, comment_id: i64) -> DatabaseResult<Vec<Vote>> {
        let tables = self.store.read().await;
        Ok(tables
            .votes
            .values()
            .filter(|vote| vote.comment_id == comment_id)
            .copied()
            .collect())
    }
}
