use crate::server::{
    Result, ServerConfig, ServerError, ServerRouter, json::Json, routes::PageQuery,
    session::SessionUser,
};
use axum::extract::State;
use axum_extra::routing::{RouterExt, TypedPath};
use federwerk_common::model::{
    page::Page,
    post::Post,
    profile::Profile,
    user::{User, UserHandle},
};
use federwerk_db::client::DbClient;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub fn routes() -> ServerRouter {
    ServerRouter::new()
        .typed_get(profile)
        .typed_post(follow)
        .typed_delete(unfollow)
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/users/{handle}", rejection(ServerError))]
struct ProfilePath {
    handle: UserHandle,
}

#[derive(Debug, Serialize)]
struct ProfileDetail {
    profile: Profile,
    page: Page<Post>,
}

async fn profile(
    ProfilePath { handle }: ProfilePath,
    State(db): State<Arc<DbClient>>,
    State(config): State<ServerConfig>,
    viewer: Option<SessionUser>,
    page: PageQuery,
) -> Result<Json<ProfileDetail>> {
    let author = lookup_author(&db, handle).await?;

    // Anonymous viewers have no edge to report at all.
    let following = match &viewer {
        Some(viewer) => Some(db.is_following(viewer.user_id(), author.id).await?),
        None => None,
    };
    let page = db
        .fetch_author_posts_page(author.id, page.page, config.page_size)
        .await?;

    Ok(Json(ProfileDetail {
        profile: Profile { author, following },
        page,
    }))
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/users/{handle}/follow", rejection(ServerError))]
struct FollowPath {
    handle: UserHandle,
}

async fn follow(
    FollowPath { handle }: FollowPath,
    State(db): State<Arc<DbClient>>,
    user: SessionUser,
) -> Result<Json<Profile>> {
    let author = lookup_author(&db, handle).await?;

    // Following yourself is silently skipped; repeating an existing follow
    // is a no-op inside the client.
    if author.id != user.user_id() {
        db.follow(user.user_id(), author.id).await?;
    }

    let following = db.is_following(user.user_id(), author.id).await?;
    Ok(Json(Profile {
        author,
        following: Some(following),
    }))
}

async fn unfollow(
    FollowPath { handle }: FollowPath,
    State(db): State<Arc<DbClient>>,
    user: SessionUser,
) -> Result<Json<Profile>> {
    let author = lookup_author(&db, handle).await?;

    db.unfollow(user.user_id(), author.id).await?;

    Ok(Json(Profile {
        author,
        following: Some(false),
    }))
}

async fn lookup_author(db: &DbClient, handle: UserHandle) -> Result<User> {
    db.fetch_user_by_handle(&handle)
        .await?
        .ok_or(ServerError::UserByHandleNotFound(handle))
}
