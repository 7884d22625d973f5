//! Comment endpoints

use axum::{
    extract::{OriginalUri, State},
    response::IntoResponse,
};
use tracing::{debug, info};

use roster_api_types::{Comment, CommentPatch, CommentPayload, COMMENT_SCHEMA};
use roster_interfaces::{CommentRepository, CrudRepository, DatabaseError, QueryRepository};
use roster_query::{RecordQuery, SortToken};
use roster_web::{
    utils::{accepted, created},
    Envelope, FilterPath, IdPath, JsonBody, ListParams, PageResponse,
};

use crate::{
    context::AppContext,
    errors::{RestError, RestResult},
};

pub async fn list_comments(
    State(ctx): State<AppContext>,
    OriginalUri(uri): OriginalUri,
    ListParams(params): ListParams,
) -> RestResult<impl IntoResponse> {
    debug!("Listing comments with query: {:?}", params);
    let (query, window) = ctx.list_query::<Comment>(&params)?;

    let page = ctx.repositories.comment_repository().find(&query).await?;
    if page.is_empty() {
        return Err(RestError::empty_result());
    }

    Ok(PageResponse::from_page("comments", page, &window, uri.path()))
}

/// Comments written by one user, paginated like the full list
pub async fn list_user_comments(
    State(ctx): State<AppContext>,
    OriginalUri(uri): OriginalUri,
    IdPath(user_id): IdPath,
    ListParams(params): ListParams,
) -> RestResult<impl IntoResponse> {
    let (query, window) = ctx.list_query::<Comment>(&params)?;

    let page = ctx
        .repositories
        .comment_repository()
        .find_by_user(user_id, &query)
        .await?;
    if page.is_empty() {
        return Err(RestError::empty_result());
    }

    Ok(PageResponse::from_page("comments", page, &window, uri.path()))
}

pub async fn get_comment(State(ctx): State<AppContext>, IdPath(id): IdPath) -> RestResult<impl IntoResponse> {
    let comment = ctx
        .repositories
        .comment_repository()
        .find_by_id(id)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Comment", id))?;

    Ok(Envelope::new("comment", comment))
}

pub async fn filter_comments(State(ctx): State<AppContext>, path: FilterPath) -> RestResult<impl IntoResponse> {
    let predicate = ctx.filter_predicate::<Comment>(&path)?;
    let query = RecordQuery::ordered_by(SortToken::by_primary_key(&COMMENT_SCHEMA)).filtered(predicate);

    let page = ctx.repositories.comment_repository().find(&query).await?;
    if page.is_empty() {
        return Err(RestError::empty_result());
    }

    Ok(Envelope::new("comments", page.items))
}

pub async fn create_comment(
    State(ctx): State<AppContext>,
    JsonBody(payload): JsonBody<CommentPayload>,
) -> RestResult<impl IntoResponse> {
    let payload = payload.checked()?;
    let comment = ctx.repositories.comment_repository().create(payload).await?;

    info!(comment_id = comment.id, user_id = comment.user_id, "Created comment");
    Ok(created(comment))
}

pub async fn patch_comment(
    State(ctx): State<AppContext>,
    IdPath(id): IdPath,
    JsonBody(patch): JsonBody<CommentPatch>,
) -> RestResult<impl IntoResponse> {
    let patch = patch.checked()?;
    let comment = ctx.repositories.comment_repository().patch(id, patch).await?;
    Ok(accepted(comment))
}

/// Replace author and content; the creation time is kept
pub async fn replace_comment(
    State(ctx): State<AppContext>,
    IdPath(id): IdPath,
    JsonBody(payload): JsonBody<CommentPayload>,
) -> RestResult<impl IntoResponse> {
    let payload = payload.checked()?;
    let comment = ctx.repositories.comment_repository().replace(id, payload).await?;
    Ok(accepted(comment))
}

pub async fn delete_comment(State(ctx): State<AppContext>, IdPath(id): IdPath) -> RestResult<impl IntoResponse> {
    let comment = ctx.repositories.comment_repository().delete(id).await?;

    info!(comment_id = id, "Deleted comment");
    Ok(accepted(
        Envelope::new("comment", comment).with_detail(format!("Comment {} delete successfully", id)),
    ))
}
