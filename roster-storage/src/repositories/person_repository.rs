//! Person repository implementation

use async_trait::async_trait;
use tracing::debug;

use roster_api_types::{Person, PersonPatch, PersonPayload};
use roster_interfaces::{
    CrudRepository, DatabaseError, DatabaseResult, PersonRepository, QueryRepository, Repository,
};
use roster_query::{Page, RecordQuery};

use crate::store::{InMemoryStore, HEALTH_CHECK_TIMEOUT};

#[derive(Debug, Clone)]
pub struct InMemoryPersonRepository {
    store: InMemoryStore,
}

impl InMemoryPersonRepository {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Repository for InMemoryPersonRepository {
    async fn health_check(&self) -> DatabaseResult<()> {
        self.store.read_within(HEALTH_CHECK_TIMEOUT).await?.check_people()
    }
}

#[async_trait]
impl CrudRepository<Person, PersonPayload> for InMemoryPersonRepository {
    async fn create(&self, new: PersonPayload) -> DatabaseResult<Person> {
        let mut tables = self.store.write().await;
        let id = tables.allocate_person_id();
        let person = new.into_person(id);
        tables.people.insert(id, person.clone());

        debug!(person_id = id, name = %person.full_name(), "Created person");
        Ok(person)
    }

    async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Person>> {
        Ok(self.store.read().await.people.get(&id).cloned())
    }

    async fn replace(&self, id: i64, new: PersonPayload) -> DatabaseResult<Person> {
        let mut tables = self.store.write().await;
        let slot = tables
            .people
            .get_mut(&id)
            .ok_or_else(|| DatabaseError::not_found("User", id))?;
        *slot = new.into_person(id);

        debug!(person_id = id, "Replaced person");
        Ok(slot.clone())
    }

    async fn delete(&self, id: i64) -> DatabaseResult<Person> {
        self.store
            .write()
            .await
            .remove_person(id)
            .ok_or_else(|| DatabaseError::not_found("User", id))
    }

    async fn count(&self) -> DatabaseResult<u64> {
        Ok(self.store.read().await.people.len() as u64)
    }
}

#[async_trait]
impl QueryRepository<Person> for InMemoryPersonRepository {
    async fn find(&self, query: &RecordQuery) -> DatabaseResult<Page<Person>> {
        let tables = self.store.read().await;
        Ok(query.apply(tables.people.values()))
    }
}

#[async_trait]
impl PersonRepository for InMemoryPersonRepository {
    async fn patch(&self, id: i64, patch: PersonPatch) -> DatabaseResult<Person> {
        let mut tables = self.store.write().await;
        let person = tables
            .people
            .get_mut(&id)
            .ok_or_else(|| DatabaseError::not_found("User", id))?;
        patch.apply(person);

        debug!(person_id = id, "Patched person");
        Ok(person.clone())
    }
}
