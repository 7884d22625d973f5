//! Service index and fake data loader

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use roster_web::WebError;
use tracing::info;

use crate::{
    context::AppContext,
    errors::RestResult,
    models::{DataLoadedResponse, IndexResponse, SeedQuery, MAX_SEED_QUANTITY},
};

pub async fn index(State(ctx): State<AppContext>) -> impl IntoResponse {
    Json(IndexResponse::new(&ctx.api_prefix))
}

/// Generate `quantity` people, comments and votes
pub async fn load_fake_data(
    State(ctx): State<AppContext>,
    query: Result<Query<SeedQuery>, QueryRejection>,
) -> RestResult<impl IntoResponse> {
    let Query(query) = query.map_err(WebError::from)?;
    if query.quantity > MAX_SEED_QUANTITY {
        return Err(WebError::bad_request(format!(
            "quantity must be at most {}, got {}",
            MAX_SEED_QUANTITY, query.quantity
        ))
        .into());
    }

    let report = ctx.repositories.seed(query.quantity).await?;
    info!(
        people = report.people,
        comments = report.comments,
        votes = report.votes,
        "Fake data loaded"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataLoadedResponse {
            success: true,
            detail: "Data loaded".to_string(),
            home: "/".to_string(),
            people: report.people,
            comments: report.comments,
            votes: report.votes,
        }),
    ))
}
