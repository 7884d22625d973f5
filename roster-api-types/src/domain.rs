use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use roster_query::{AttributeOptions, AttributeValue, Record, Schema, SchemaDescriptor};

use crate::enums::Gender;

/// Person attributes in declaration order
pub static PERSON_SCHEMA: SchemaDescriptor = SchemaDescriptor::new(
    "Person",
    "id",
    &[
        "first_name",
        "last_name",
        "email",
        "avatar",
        "company",
        "job",
        "is_admin",
        "gender",
        "date_of_birth",
        "country_of_birth",
    ],
);

/// Comment attributes; `user` is the owning person
pub static COMMENT_SCHEMA: SchemaDescriptor =
    SchemaDescriptor::new("Comment", "id", &["user", "added", "edited", "content"]);

pub static VOTE_SCHEMA: SchemaDescriptor = SchemaDescriptor::new("Vote", "id", &["comment", "user"]);

/// A user of the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: i64,
    pub is_admin: bool,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub gender: Gender,
    pub avatar: Option<String>,
    pub job: Option<String>,
    pub company: Option<String>,
    pub date_of_birth: NaiveDate,
    pub country_of_birth: String,
}

impl Person {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Schema for Person {
    fn schema() -> &'static SchemaDescriptor {
        &PERSON_SCHEMA
    }
}

impl Record for Person {
    fn attribute(&self, name: &str) -> Option<AttributeValue> {
        let value = match name {
            "id" => self.id.into(),
            "is_admin" => self.is_admin.into(),
            "first_name" => (&self.first_name).into(),
            "last_name" => (&self.last_name).into(),
            "email" => (&self.email).into(),
            "gender" => self.gender.as_str().into(),
            "avatar" => self.avatar.as_deref().into(),
            "job" => self.job.as_deref().into(),
            "company" => self.company.as_deref().into(),
            "date_of_birth" => self.date_of_birth.into(),
            "country_of_birth" => (&self.country_of_birth).into(),
            _ => return None,
        };
        Some(value)
    }
}

/// A comment written by a person
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub user_id: i64,
    pub added: DateTime<Utc>,
    pub edited: DateTime<Utc>,
    pub content: String,
}

impl Comment {
    /// First characters of the content, for log lines
    pub fn excerpt(&self) -> String {
        self.content.chars().take(10).collect()
    }
}

impl Schema for Comment {
    fn schema() -> &'static SchemaDescriptor {
        &COMMENT_SCHEMA
    }

    /// The owner is exposed as `user_id`
    fn attribute_options() -> AttributeOptions {
        AttributeOptions::new().replace("user", "user_id")
    }
}

impl Record for Comment {
    fn attribute(&self, name: &str) -> Option<AttributeValue> {
        let value = match name {
            "id" => self.id.into(),
            "user" | "user_id" => self.user_id.into(),
            "added" => self.added.into(),
            "edited" => self.edited.into(),
            "content" => (&self.content).into(),
            _ => return None,
        };
        Some(value)
    }
}

/// A person's vote on a comment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub id: i64,
    pub comment_id: i64,
    pub user_id: i64,
}

impl Schema for Vote {
    fn schema() -> &'static SchemaDescriptor {
        &VOTE_SCHEMA
    }

    fn attribute_options() -> AttributeOptions {
        AttributeOptions::new()
            .replace("comment", "comment_id")
            .replace("user", "user_id")
    }
}

impl Record for Vote {
    fn attribute(&self, name: &str) -> Option<AttributeValue> {
        match name {
            "id" => Some(self.id.into()),
            "comment" | "comment_id" => Some(self.comment_id.into()),
            "user" | "user_id" => Some(self.user_id.into()),
            _ => None,
        }
    }
}
