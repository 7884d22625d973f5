//! Request bodies for creating and updating records
//!
//! Payloads are normalized before they are validated: names and the country
//! of birth are trimmed and title-cased, emails are trimmed and lower-cased.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationErrors};

use crate::domain::{Comment, Person, Vote};
use crate::enums::Gender;
use crate::text::{normalize_email, normalize_name};

/// Full person body, used by create and replace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct PersonPayload {
    #[serde(default)]
    pub is_admin: bool,
    #[validate(length(min = 3, max = 50, message = "first_name must contain between 3 and 50 characters."))]
    pub first_name: String,
    #[validate(length(min = 3, max = 50, message = "last_name must contain between 3 and 50 characters."))]
    pub last_name: String,
    #[validate(email(message = "email is not a valid email address."))]
    pub email: String,
    pub gender: Gender,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub job: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    pub date_of_birth: NaiveDate,
    #[validate(length(
        min = 3,
        max = 50,
        message = "country_of_birth must contain between 3 and 50 characters."
    ))]
    pub country_of_birth: String,
}

impl PersonPayload {
    pub fn normalized(mut self) -> Self {
        self.first_name = normalize_name(&self.first_name);
        self.last_name = normalize_name(&self.last_name);
        self.country_of_birth = normalize_name(&self.country_of_birth);
        self.email = normalize_email(&self.email);
        self
    }

    /// Normalize, then validate
    pub fn checked(self) -> Result<Self, ValidationErrors> {
        let payload = self.normalized();
        payload.validate()?;
        Ok(payload)
    }

    pub fn into_person(self, id: i64) -> Person {
        Person {
            id,
            is_admin: self.is_admin,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            gender: self.gender,
            avatar: self.avatar,
            job: self.job,
            company: self.company,
            date_of_birth: self.date_of_birth,
            country_of_birth: self.country_of_birth,
        }
    }
}

/// Partial person update; absent fields are left untouched.
///
/// The optional profile fields (`avatar`, `job`, `company`) distinguish an
/// absent key (`None`) from an explicit `null` (`Some(None)`), which clears
/// the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct PersonPatch {
    pub is_admin: Option<bool>,
    #[validate(length(min = 3, max = 50, message = "first_name must contain between 3 and 50 characters."))]
    pub first_name: Option<String>,
    #[validate(length(min = 3, max = 50, message = "last_name must contain between 3 and 50 characters."))]
    pub last_name: Option<String>,
    #[validate(email(message = "email is not a valid email address."))]
    pub email: Option<String>,
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "deserialize_nullable")]
    pub avatar: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "deserialize_nullable")]
    pub job: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "deserialize_nullable")]
    pub company: Option<Option<String>>,
    pub date_of_birth: Option<NaiveDate>,
    #[validate(length(
        min = 3,
        max = 50,
        message = "country_of_birth must contain between 3 and 50 characters."
    ))]
    pub country_of_birth: Option<String>,
}

impl PersonPatch {
    pub fn normalized(mut self) -> Self {
        self.first_name = self.first_name.as_deref().map(normalize_name);
        self.last_name = self.last_name.as_deref().map(normalize_name);
        self.country_of_birth = self.country_of_birth.as_deref().map(normalize_name);
        self.email = self.email.as_deref().map(normalize_email);
        self
    }

    pub fn checked(self) -> Result<Self, ValidationErrors> {
        let patch = self.normalized();
        patch.validate()?;
        Ok(patch)
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(self, person: &mut Person) {
        if let Some(is_admin) = self.is_admin {
            person.is_admin = is_admin;
        }
        if let Some(first_name) = self.first_name {
            person.first_name = first_name;
        }
        if let Some(last_name) = self.last_name {
            person.last_name = last_name;
        }
        if let Some(email) = self.email {
            person.email = email;
        }
        if let Some(gender) = self.gender {
            person.gender = gender;
        }
        if let Some(avatar) = self.avatar {
            person.avatar = avatar;
        }
        if let Some(job) = self.job {
            person.job = job;
        }
        if let Some(company) = self.company {
            person.company = company;
        }
        if let Some(date_of_birth) = self.date_of_birth {
            person.date_of_birth = date_of_birth;
        }
        if let Some(country_of_birth) = self.country_of_birth {
            person.country_of_birth = country_of_birth;
        }
    }
}

/// A present key always yields `Some`, so `null` becomes `Some(None)`
#[allow(clippy::option_option)]
fn deserialize_nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Ok(Some(Option::deserialize(deserializer)?))
}

/// New comment, or the full replacement of one
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CommentPayload {
    pub user_id: i64,
    #[validate(length(min = 1, message = "content must not be empty."))]
    pub content: String,
}

impl CommentPayload {
    pub fn checked(mut self) -> Result<Self, ValidationErrors> {
        self.content = self.content.trim().to_string();
        self.validate()?;
        Ok(self)
    }

    /// Build the stored comment; `added` and `edited` both start at `now`
    pub fn into_comment(self, id: i64, now: DateTime<Utc>) -> Comment {
        Comment {
            id,
            user_id: self.user_id,
            added: now,
            edited: now,
            content: self.content,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CommentPatch {
    #[validate(length(min = 1, message = "content must not be empty."))]
    pub content: Option<String>,
}

impl CommentPatch {
    pub fn checked(mut self) -> Result<Self, ValidationErrors> {
        self.content = self.content.map(|content| content.trim().to_string());
        self.validate()?;
        Ok(self)
    }

    /// Apply the patch and bump `edited`
    pub fn apply(self, comment: &mut Comment, now: DateTime<Utc>) {
        if let Some(content) = self.content {
            comment.content = content;
        }
        comment.edited = now;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VotePayload {
    pub comment_id: i64,
    pub user_id: i64,
}

impl VotePayload {
    pub fn into_vote(self, id: i64) -> Vote {
        Vote {
            id,
            comment_id: self.comment_id,
            user_id: self.user_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload() -> PersonPayload {
        serde_json::from_value(json!({
            "first_name": "  jOHN",
            "last_name": "DOE",
            "email": " John.Doe@Eliam-Lotonga.FR ",
            "gender": "Male",
            "date_of_birth": "1970-01-01",
            "country_of_birth": "no where"
        }))
        .unwrap()
    }

    #[test]
    fn test_person_payload_is_normalized() {
        let payload = payload().checked().unwrap();
        assert_eq!(payload.first_name, "John");
        assert_eq!(payload.last_name, "Doe");
        assert_eq!(payload.email, "john.doe@eliam-lotonga.fr");
        assert_eq!(payload.country_of_birth, "No Where");
        assert!(!payload.is_admin);

        let person = payload.into_person(7);
        assert_eq!(person.id, 7);
        assert_eq!(person.full_name(), "John Doe");
    }

    #[test]
    fn test_person_payload_rejects_short_names_and_bad_email() {
        let mut short = payload();
        short.first_name = " Al ".to_string();
        let errors = short.checked().unwrap_err();
        assert!(errors.field_errors().contains_key("first_name"));

        let mut bad_email = payload();
        bad_email.email = "not-an-email".to_string();
        let errors = bad_email.checked().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));

        let mut long = payload();
        long.country_of_birth = "x".repeat(51);
        assert!(long.checked().is_err());
    }

    #[test]
    fn test_person_patch_only_touches_given_fields() {
        let mut person = payload().checked().unwrap().into_person(1);
        let patch = PersonPatch {
            job: Some(Some("Pilot".to_string())),
            last_name: Some("SMITH".to_string()),
            ..PersonPatch::default()
        }
        .checked()
        .unwrap();

        patch.apply(&mut person);
        assert_eq!(person.last_name, "Smith");
        assert_eq!(person.job.as_deref(), Some("Pilot"));
        assert_eq!(person.first_name, "John");

        assert!(PersonPatch::default().is_empty());
        let bad = PersonPatch {
            first_name: Some("Jo".to_string()),
            ..PersonPatch::default()
        };
        assert!(bad.checked().is_err());
    }

    #[test]
    fn test_person_patch_null_clears_profile_fields() {
        let mut person = payload().checked().unwrap().into_person(1);
        person.company = Some("Acme".to_string());

        let patch: PersonPatch = serde_json::from_str(r#"{"job": null, "avatar": "https://img/1.png"}"#).unwrap();
        assert_eq!(patch.job, Some(None));
        assert_eq!(patch.company, None);

        patch.checked().unwrap().apply(&mut person);
        assert_eq!(person.job, None);
        assert_eq!(person.avatar.as_deref(), Some("https://img/1.png"));
        assert_eq!(person.company.as_deref(), Some("Acme"));

        let untouched: PersonPatch = serde_json::from_str("{}").unwrap();
        assert!(untouched.is_empty());
    }

    #[test]
    fn test_comment_payloads() {
        let now = Utc::now();
        let comment = CommentPayload {
            user_id: 2,
            content: " hello ".to_string(),
        }
        .checked()
        .unwrap()
        .into_comment(1, now);
        assert_eq!(comment.content, "hello");
        assert_eq!(comment.added, comment.edited);

        assert!(CommentPayload {
            user_id: 2,
            content: "   ".to_string()
        }
        .checked()
        .is_err());

        let mut edited = comment.clone();
        let later = now + chrono::Duration::seconds(5);
        CommentPatch {
            content: Some("updated".to_string()),
        }
        .checked()
        .unwrap()
        .apply(&mut edited, later);
        assert_eq!(edited.content, "updated");
        assert_eq!(edited.added, comment.added);
        assert_eq!(edited.edited, later);
    }
}
