use crate::server::{
    Result, ServerConfig, ServerError, ServerRouter, json::Json, routes::PageQuery,
    session::SessionUser,
};
use axum::extract::State;
use axum_extra::routing::{RouterExt, TypedPath};
use federwerk_common::model::{page::Page, post::Post};
use federwerk_db::client::DbClient;
use serde::Deserialize;
use std::sync::Arc;

pub fn routes() -> ServerRouter {
    ServerRouter::new().typed_get(feed)
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/feed", rejection(ServerError))]
struct FeedPath();

async fn feed(
    FeedPath(): FeedPath,
    State(db): State<Arc<DbClient>>,
    State(config): State<ServerConfig>,
    user: SessionUser,
    page: PageQuery,
) -> Result<Json<Page<Post>>> {
    let page = db
        .fetch_feed_page(user.user_id(), page.page, config.page_size)
        .await?;

    Ok(Json(page))
}
