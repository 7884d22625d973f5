use chrono::NaiveDate;

use roster_api_types::{CommentPatch, CommentPayload, Gender, PersonPatch, PersonPayload, VotePayload, PERSON_SCHEMA};
use roster_interfaces::{
    CommentRepository, CrudRepository, DatabaseError, PersonRepository, QueryRepository, RepositoryFactory,
};
use roster_query::{parse_filter, PageWindow, RecordQuery, SortToken};
use roster_storage::InMemoryRepositoryFactory;

fn person(first_name: &str, last_name: &str) -> PersonPayload {
    PersonPayload {
        is_admin: false,
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: format!("{}.{}@example.com", first_name, last_name).to_lowercase(),
        gender: Gender::Female,
        avatar: None,
        job: None,
        company: None,
        date_of_birth: NaiveDate::from_ymd_opt(1990, 5, 17).unwrap(),
        country_of_birth: "France".to_string(),
    }
}

#[tokio::test]
async fn test_person_crud() {
    let factory = InMemoryRepositoryFactory::default();
    let people = factory.person_repository();

    let ada = people.create(person("Ada", "Lovelace")).await.unwrap();
    let grace = people.create(person("Grace", "Hopper")).await.unwrap();
    assert_eq!((ada.id, grace.id), (1, 2));
    assert_eq!(people.count().await.unwrap(), 2);

    let patched = people
        .patch(
            ada.id,
            PersonPatch {
                job: Some(Some("Mathematician".to_string())),
                ..PersonPatch::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(patched.job.as_deref(), Some("Mathematician"));
    assert_eq!(patched.first_name, "Ada");

    let replaced = people.replace(grace.id, person("Margaret", "Hamilton")).await.unwrap();
    assert_eq!(replaced.id, grace.id);
    assert_eq!(replaced.first_name, "Margaret");

    let deleted = people.delete(ada.id).await.unwrap();
    assert_eq!(deleted.id, ada.id);
    assert!(people.find_by_id(ada.id).await.unwrap().is_none());
    assert!(matches!(
        people.delete(ada.id).await,
        Err(DatabaseError::NotFound { id: 1, .. })
    ));

    // ids are never reused
    let next = people.create(person("Katherine", "Johnson")).await.unwrap();
    assert_eq!(next.id, 3);
}

#[tokio::test]
async fn test_find_counts_all_matches() {
    let factory = InMemoryRepositoryFactory::default();
    let people = factory.person_repository();
    for (first, last) in [("Ada", "Lovelace"), ("Alan", "Turing"), ("Grace", "Hopper"), ("Adele", "Goldberg")] {
        people.create(person(first, last)).await.unwrap();
    }

    let query = RecordQuery::ordered_by(SortToken::parse(&PERSON_SCHEMA, "last_name:desc", &[]).unwrap())
        .filtered(parse_filter(&PERSON_SCHEMA, "first_name", "ad").unwrap())
        .paged(PageWindow::new(1, 0).unwrap());
    let page = people.find(&query).await.unwrap();

    assert_eq!(page.total, 2);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].last_name, "Lovelace");
}

#[tokio::test]
async fn test_foreign_keys_and_cascades() {
    let factory = InMemoryRepositoryFactory::default();
    let ada = factory.person_repository().create(person("Ada", "Lovelace")).await.unwrap();
    let alan = factory.person_repository().create(person("Alan", "Turing")).await.unwrap();

    let orphan = factory
        .comment_repository()
        .create(CommentPayload {
            user_id: 99,
            content: "hello".to_string(),
        })
        .await;
    assert!(matches!(orphan, Err(DatabaseError::Constraint { .. })));

    let comment = factory
        .comment_repository()
        .create(CommentPayload {
            user_id: ada.id,
            content: "Notes on the analytical engine".to_string(),
        })
        .await
        .unwrap();

    factory
        .vote_repository()
        .create(VotePayload {
            comment_id: comment.id,
            user_id: alan.id,
        })
        .await
        .unwrap();
    assert!(factory
        .vote_repository()
        .create(VotePayload {
            comment_id: 42,
            user_id: alan.id,
        })
        .await
        .is_err());

    let edited = factory
        .comment_repository()
        .patch(
            comment.id,
            CommentPatch {
                content: Some("Sketch of the engine".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(edited.added, comment.added);
    assert!(edited.edited >= comment.edited);

    let by_user = factory
        .comment_repository()
        .find_by_user(ada.id, &RecordQuery::ordered_by(SortToken::ascending("id")))
        .await
        .unwrap();
    assert_eq!(by_user.total, 1);

    // deleting the author removes the comment and the vote on it
    factory.person_repository().delete(ada.id).await.unwrap();
    assert_eq!(factory.comment_repository().count().await.unwrap(), 0);
    assert_eq!(factory.vote_repository().count().await.unwrap(), 0);
    assert!(matches!(
        factory
            .comment_repository()
            .find_by_user(ada.id, &RecordQuery::ordered_by(SortToken::ascending("id")))
            .await,
        Err(DatabaseError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_seed_and_health() {
    let factory = InMemoryRepositoryFactory::default();
    let report = factory.seed(4).await.unwrap();

    assert_eq!(report.people, 4);
    assert_eq!(factory.person_repository().count().await.unwrap(), 4);
    assert_eq!(factory.comment_repository().count().await.unwrap(), 4);
    assert_eq!(factory.vote_repository().count().await.unwrap(), 4);
    assert!(factory.health_check().await.is_ok());
}
