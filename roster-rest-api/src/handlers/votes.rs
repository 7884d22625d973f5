//! Vote endpoints

use axum::{
    extract::{OriginalUri, State},
    response::IntoResponse,
};
use tracing::{debug, info};

use roster_api_types::{Vote, VotePayload};
use roster_interfaces::{CrudRepository, DatabaseError, QueryRepository, VoteRepository};
use roster_web::{
    utils::{accepted, created},
    Envelope, IdPath, JsonBody, ListParams, PageResponse,
};

use crate::{
    context::AppContext,
    errors::{RestError, RestResult},
};

pub async fn list_votes(
    State(ctx): State<AppContext>,
    OriginalUri(uri): OriginalUri,
    ListParams(params): ListParams,
) -> RestResult<impl IntoResponse> {
    debug!("Listing votes with query: {:?}", params);
    let (query, window) = ctx.list_query::<Vote>(&params)?;

    let page = ctx.repositories.vote_repository().find(&query).await?;
    if page.is_empty() {
        return Err(RestError::empty_result());
    }

    Ok(PageResponse::from_page("votes", page, &window, uri.path()))
}

pub async fn get_vote(State(ctx): State<AppContext>, IdPath(id): IdPath) -> RestResult<impl IntoResponse> {
    let vote = ctx
        .repositories
        .vote_repository()
        .find_by_id(id)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Vote", id))?;

    Ok(Envelope::new("vote", vote))
}

/// Votes cast on one comment
pub async fn comment_votes(State(ctx): State<AppContext>, IdPath(comment_id): IdPath) -> RestResult<impl IntoResponse> {
    let comments = ctx.repositories.comment_repository();
    if comments.find_by_id(comment_id).await?.is_none() {
        return Err(DatabaseError::not_found("Comment", comment_id).into());
    }

    let votes = ctx.repositories.vote_repository().find_by_comment(comment_id).await?;
    Ok(Envelope::new("votes", votes))
}

pub async fn create_vote(
    State(ctx): State<AppContext>,
    JsonBody(payload): JsonBody<VotePayload>,
) -> RestResult<impl IntoResponse> {
    let vote = ctx.repositories.vote_repository().create(payload).await?;

    info!(vote_id = vote.id, comment_id = vote.comment_id, "Created vote");
    Ok(created(vote))
}

pub async fn delete_vote(State(ctx): State<AppContext>, IdPath(id): IdPath) -> RestResult<impl IntoResponse> {
    let vote = ctx.repositories.vote_repository().delete(id).await?;
    Ok(accepted(
        Envelope::new("vote", vote).with_detail(format!("Vote {} delete successfully", id)),
    ))
}
