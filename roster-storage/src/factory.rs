//! Repository factory over a single in-memory store

use async_trait::async_trait;

use roster_interfaces::{
    CommentRepository, DatabaseResult, PersonRepository, Repository, RepositoryFactory, SeedReport,
    VoteRepository,
};

use crate::repositories::{InMemoryCommentRepository, InMemoryPersonRepository, InMemoryVoteRepository};
use crate::store::InMemoryStore;

#[derive(Debug, Clone)]
pub struct InMemoryRepositoryFactory {
    store: InMemoryStore,
    people: InMemoryPersonRepository,
    comments: InMemoryCommentRepository,
    votes: InMemoryVoteRepository,
}

impl InMemoryRepositoryFactory {
    pub fn new(store: InMemoryStore) -> Self {
        Self {
            people: InMemoryPersonRepository::new(store.clone()),
            comments: InMemoryCommentRepository::new(store.clone()),
            votes: InMemoryVoteRepository::new(store.clone()),
            store,
        }
    }

    pub fn store(&self) -> &InMemoryStore {
        &self.store
    }
}

impl Default for InMemoryRepositoryFactory {
    fn default() -> Self {
        Self::new(InMemoryStore::new())
    }
}

#[async_trait]
impl RepositoryFactory for InMemoryRepositoryFactory {
    fn person_repository(&self) -> &dyn PersonRepository {
        &self.people
    }

    fn comment_repository(&self) -> &dyn CommentRepository {
        &self.comments
    }

    fn vote_repository(&self) -> &dyn VoteRepository {
        &self.votes
    }

    async fn seed(&self, quantity: usize) -> DatabaseResult<SeedReport> {
        Ok(self.store.seed(quantity).await)
    }

    async fn health_check(&self) -> DatabaseResult<()> {
        self.people.health_check().await?;
        self.comments.health_check().await?;
        self.votes.health_check().await
    }
}
