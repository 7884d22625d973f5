//! User endpoints

use axum::{
    extract::{OriginalUri, State},
    response::IntoResponse,
};
use tracing::{debug, info};

use roster_api_types::{Person, PersonPatch, PersonPayload, PERSON_SCHEMA};
use roster_interfaces::{CrudRepository, DatabaseError, PersonRepository, QueryRepository};
use roster_query::{RecordQuery, SortToken};
use roster_web::{
    utils::{accepted, created},
    Envelope, FilterPath, IdPath, JsonBody, ListParams, PageResponse,
};

use crate::{
    context::AppContext,
    errors::{RestError, RestResult},
};

/// Page through users with `limit`, `offset` and `sort`
pub async fn list_users(
    State(ctx): State<AppContext>,
    OriginalUri(uri): OriginalUri,
    ListParams(params): ListParams,
) -> RestResult<impl IntoResponse> {
    debug!("Listing users with query: {:?}", params);
    let (query, window) = ctx.list_query::<Person>(&params)?;

    let page = ctx.repositories.person_repository().find(&query).await?;
    if page.is_empty() {
        return Err(RestError::empty_result());
    }

    Ok(PageResponse::from_page("users", page, &window, uri.path()))
}

pub async fn get_user(State(ctx): State<AppContext>, IdPath(id): IdPath) -> RestResult<impl IntoResponse> {
    let user = ctx
        .repositories
        .person_repository()
        .find_by_id(id)
        .await?
        .ok_or_else(|| DatabaseError::not_found("User", id))?;

    Ok(Envelope::new("user", user))
}

/// Every user matching a filter expression such as `first_nameOrlast_name`, by id
pub async fn filter_users(State(ctx): State<AppContext>, path: FilterPath) -> RestResult<impl IntoResponse> {
    let predicate = ctx.filter_predicate::<Person>(&path)?;
    let query = RecordQuery::ordered_by(SortToken::by_primary_key(&PERSON_SCHEMA)).filtered(predicate);

    let page = ctx.repositories.person_repository().find(&query).await?;
    if page.is_empty() {
        return Err(RestError::empty_result());
    }

    Ok(Envelope::new("users", page.items))
}

pub async fn create_user(
    State(ctx): State<AppContext>,
    JsonBody(payload): JsonBody<PersonPayload>,
) -> RestResult<impl IntoResponse> {
    let payload = payload.checked()?;
    let user = ctx.repositories.person_repository().create(payload).await?;

    info!(user_id = user.id, email = %user.email, "Created user");
    Ok(created(user))
}

/// Update the fields present in the body
pub async fn patch_user(
    State(ctx): State<AppContext>,
    IdPath(id): IdPath,
    JsonBody(patch): JsonBody<PersonPatch>,
) -> RestResult<impl IntoResponse> {
    let patch = patch.checked()?;
    if patch.is_empty() {
        debug!(user_id = id, "Empty patch");
    }

    let user = ctx.repositories.person_repository().patch(id, patch).await?;
    Ok(accepted(user))
}

pub async fn replace_user(
    State(ctx): State<AppContext>,
    IdPath(id): IdPath,
    JsonBody(payload): JsonBody<PersonPayload>,
) -> RestResult<impl IntoResponse> {
    let payload = payload.checked()?;
    let user = ctx.repositories.person_repository().replace(id, payload).await?;
    Ok(accepted(user))
}

/// Delete a user together with their comments and votes
pub async fn delete_user(State(ctx): State<AppContext>, IdPath(id): IdPath) -> RestResult<impl IntoResponse> {
    let user = ctx.repositories.person_repository().delete(id).await?;

    info!(user_id = id, "Deleted user");
    Ok(accepted(
        Envelope::new("user", user).with_detail(format!("User {} delete successfully", id)),
    ))
}
