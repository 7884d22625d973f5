//! Shared in-memory tables

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::time::timeout;
use tracing::{debug, info};

use roster_api_types::{Comment, Person, Vote};
use roster_interfaces::{DatabaseError, DatabaseResult, SeedReport};

use crate::seed;

/// How long a health check waits for the tables before reporting failure
pub const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(2);

/// Rows of every table plus the next id of each
#[derive(Debug)]
pub struct Tables {
    pub people: BTreeMap<i64, Person>,
    pub comments: BTreeMap<i64, Comment>,
    pub votes: BTreeMap<i64, Vote>,
    next_person_id: i64,
    next_comment_id: i64,
    next_vote_id: i64,
}

impl Default for Tables {
    fn default() -> Self {
        Self {
            people: BTreeMap::new(),
            comments: BTreeMap::new(),
            votes: BTreeMap::new(),
            next_person_id: 1,
            next_comment_id: 1,
            next_vote_id: 1,
        }
    }
}

impl Tables {
    pub fn allocate_person_id(&mut self) -> i64 {
        let id = self.next_person_id;
        self.next_person_id += 1;
        id
    }

    pub fn allocate_comment_id(&mut self) -> i64 {
        let id = self.next_comment_id;
        self.next_comment_id += 1;
        id
    }

    pub fn allocate_vote_id(&mut self) -> i64 {
        let id = self.next_vote_id;
        self.next_vote_id += 1;
        id
    }

    /// Every person is stored under its own id, below the next id
    pub fn check_people(&self) -> DatabaseResult<()> {
        check_keys("people", &self.people, self.next_person_id, |person| person.id)
    }

    /// [`Tables::check_people`] for comments, plus every author exists
    pub fn check_comments(&self) -> DatabaseResult<()> {
        check_keys("comments", &self.comments, self.next_comment_id, |comment| comment.id)?;

        match self.comments.values().find(|c| !self.people.contains_key(&c.user_id)) {
            Some(comment) => Err(DatabaseError::internal(format!(
                "Comment {} references missing person {}",
                comment.id, comment.user_id
            ))),
            None => Ok(()),
        }
    }

    /// [`Tables::check_people`] for votes, plus every comment and voter exists
    pub fn check_votes(&self) -> DatabaseResult<()> {
        check_keys("votes", &self.votes, self.next_vote_id, |vote| vote.id)?;

        let dangling = self.votes.values().find(|vote| {
            !self.comments.contains_key(&vote.comment_id) || !self.people.contains_key(&vote.user_id)
        });
        match dangling {
            Some(vote) => Err(DatabaseError::internal(format!(
                "Vote {} references missing comment {} or person {}",
                vote.id, vote.comment_id, vote.user_id
            ))),
            None => Ok(()),
        }
    }

    pub fn require_person(&self, id: i64) -> DatabaseResult<()> {
        if self.people.contains_key(&id) {
            Ok(())
        } else {
            Err(DatabaseError::constraint(format!("Person with ID {} doesn't exist", id)))
        }
    }

    pub fn require_comment(&self, id: i64) -> DatabaseResult<()> {
        if self.comments.contains_key(&id) {
            Ok(())
        } else {
            Err(DatabaseError::constraint(format!("Comment with ID {} doesn't exist", id)))
        }
    }

    /// Remove a person together with their comments and every vote that
    /// references either
    pub fn remove_person(&mut self, id: i64) -> Option<Person> {
        let person = self.people.remove(&id)?;

        let comment_ids: BTreeSet<i64> = self
            .comments
            .values()
            .filter(|comment| comment.user_id == id)
            .map(|comment| comment.id)
            .collect();
        self.comments.retain(|comment_id, _| !comment_ids.contains(comment_id));

        let before = self.votes.len();
        self.votes
            .retain(|_, vote| vote.user_id != id && !comment_ids.contains(&vote.comment_id));

        debug!(
            person_id = id,
            comments = comment_ids.len(),
            votes = before - self.votes.len(),
            "Cascaded person delete"
        );
        Some(person)
    }

    /// Remove a comment and its votes
    pub fn remove_comment(&mut self, id: i64) -> Option<Comment> {
        let comment = self.comments.remove(&id)?;
        self.votes.retain(|_, vote| vote.comment_id != id);
        Some(comment)
    }

    /// Insert `quantity` fake people, then `quantity` comments and votes
    /// attached to random existing rows
    pub fn seed<R: Rng + ?Sized>(&mut self, quantity: usize, rng: &mut R) -> SeedReport {
        let mut report = SeedReport::default();

        for payload in seed::fake_people(quantity, rng) {
            let id = self.allocate_person_id();
            self.people.insert(id, payload.into_person(id));
            report.people += 1;
        }

        let person_ids: Vec<i64> = self.people.keys().copied().collect();
        for payload in seed::fake_comments(quantity, &person_ids, rng) {
            let id = self.allocate_comment_id();
            self.comments.insert(id, payload.into_comment(id, chrono::Utc::now()));
            report.comments += 1;
        }

        let comment_ids: Vec<i64> = self.comments.keys().copied().collect();
        for payload in seed::fake_votes(quantity, &person_ids, &comment_ids, rng) {
            let id = self.allocate_vote_id();
            self.votes.insert(id, payload.into_vote(id));
            report.votes += 1;
        }

        report
    }
}

fn check_keys<T>(
    table: &str,
    rows: &BTreeMap<i64, T>,
    next_id: i64,
    id_of: impl Fn(&T) -> i64,
) -> DatabaseResult<()> {
    for (key, row) in rows {
        let id = id_of(row);
        if id != *key || id < 1 || id >= next_id {
            return Err(DatabaseError::internal(format!(
                "Row {} of {} is stored under key {} (next id {})",
                id, table, key, next_id
            )));
        }
    }
    Ok(())
}

/// Handle to the shared tables
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().await
    }

    pub async fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().await
    }

    /// Read access, failing when a writer holds the tables longer than `limit`
    pub async fn read_within(&self, limit: Duration) -> DatabaseResult<RwLockReadGuard<'_, Tables>> {
        timeout(limit, self.tables.read()).await.map_err(|_| {
            DatabaseError::internal(format!("Tables stayed locked for more than {:?}", limit))
        })
    }

    /// Seed with the thread-local generator
    pub async fn seed(&self, quantity: usize) -> SeedReport {
        let mut tables = self.tables.write().await;
        let report = tables.seed(quantity, &mut rand::rng());
        info!(
            people = report.people,
            comments = report.comments,
            votes = report.votes,
            "Loaded fake data"
        );
        report
    }
}
