use crate::server::{
    Result, ServerConfig, ServerError, ServerRouter, json::Json, routes::PageQuery,
};
use axum::extract::State;
use axum_extra::routing::{RouterExt, TypedPath};
use federwerk_common::model::{
    group::{Group, GroupSlug},
    page::Page,
    post::Post,
};
use federwerk_db::client::DbClient;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub fn routes() -> ServerRouter {
    ServerRouter::new()
        .typed_get(list_groups)
        .typed_get(get_group)
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/groups", rejection(ServerError))]
struct GroupsPath();

async fn list_groups(
    GroupsPath(): GroupsPath,
    State(db): State<Arc<DbClient>>,
) -> Result<Json<Vec<Group>>> {
    let groups = db.fetch_groups().await?;

    Ok(Json(groups))
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/groups/{slug}", rejection(ServerError))]
struct GroupPath {
    slug: GroupSlug,
}

#[derive(Debug, Serialize)]
struct GroupDetail {
    group: Group,
    page: Page<Post>,
}

async fn get_group(
    GroupPath { slug }: GroupPath,
    State(db): State<Arc<DbClient>>,
    State(config): State<ServerConfig>,
    page: PageQuery,
) -> Result<Json<GroupDetail>> {
    let group = db
        .fetch_group_by_slug(&slug)
        .await?
        .ok_or(ServerError::GroupBySlugNotFound(slug))?;
    let page = db
        .fetch_group_posts_page(group.id, page.page, config.page_size)
        .await?;

    Ok(Json(GroupDetail { group, page }))
}
