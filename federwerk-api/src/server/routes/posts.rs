use crate::server::{
    Result, ServerConfig, ServerError, ServerRouter, json::Json, routes::PageQuery,
    session::SessionUser,
};
use axum::{
    extract::State,
    http::{HeaderValue, StatusCode, header},
};
use axum_extra::routing::{RouterExt, TypedPath};
use federwerk_common::model::{
    Id,
    comment::{COMMENT_TEXT_MAX_LEN, Comment, CommentDraft, CommentText, InvalidCommentTextError},
    page::Page,
    post::{PartialPost, Post, PostDraft, PostMarker},
    validation::ValidationError,
};
use federwerk_db::client::DbClient;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::set_header::SetResponseHeaderLayer;

pub fn routes() -> ServerRouter {
    // The index is the only cached page.
    let index_cache = SetResponseHeaderLayer::if_not_present(
        header::CACHE_CONTROL,
        HeaderValue::from_static("public, max-age=20"),
    );

    ServerRouter::new()
        .typed_get(index)
        .layer(index_cache)
        .merge(
            ServerRouter::new()
                .typed_get(get_post)
                .typed_post(create_post)
                .typed_post(edit_post)
                .typed_post(add_comment),
        )
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/", rejection(ServerError))]
struct IndexPath();

async fn index(
    IndexPath(): IndexPath,
    State(db): State<Arc<DbClient>>,
    State(config): State<ServerConfig>,
    page: PageQuery,
) -> Result<Json<Page<Post>>> {
    let page = db.fetch_posts_page(page.page, config.page_size).await?;

    Ok(Json(page))
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/posts/{id}", rejection(ServerError))]
pub(crate) struct GetPostPath {
    pub id: Id<PostMarker>,
}

#[derive(Debug, Serialize)]
struct PostDetail {
    post: Post,
    comments: Vec<Comment>,
}

async fn get_post(
    GetPostPath { id }: GetPostPath,
    State(db): State<Arc<DbClient>>,
) -> Result<Json<PostDetail>> {
    let post = db
        .fetch_post(id)
        .await?
        .ok_or(ServerError::PostByIdNotFound(id))?;
    let comments = db.fetch_post_comments(id).await?;

    Ok(Json(PostDetail { post, comments }))
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/posts/create", rejection(ServerError))]
struct CreatePostPath();

async fn create_post(
    CreatePostPath(): CreatePostPath,
    State(db): State<Arc<DbClient>>,
    user: SessionUser,
    Json(draft): Json<PostDraft>,
) -> Result<(StatusCode, Json<PartialPost>)> {
    validate_draft(&db, &draft).await?;

    let post = db.create_post(user.user_id(), &draft).await?;

    Ok((StatusCode::CREATED, Json(post)))
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/posts/{id}/edit", rejection(ServerError))]
struct EditPostPath {
    id: Id<PostMarker>,
}

async fn edit_post(
    EditPostPath { id }: EditPostPath,
    State(db): State<Arc<DbClient>>,
    user: SessionUser,
    Json(draft): Json<PostDraft>,
) -> Result<Json<Post>> {
    let post = db
        .fetch_post(id)
        .await?
        .ok_or(ServerError::PostByIdNotFound(id))?;
    if post.author.id != user.user_id() {
        return Err(ServerError::NotPostAuthor(id));
    }

    validate_draft(&db, &draft).await?;
    db.update_post(id, &draft).await?;

    let updated = db
        .fetch_post(id)
        .await?
        .ok_or(ServerError::PostByIdNotFound(id))?;

    Ok(Json(updated))
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/posts/{id}/comments", rejection(ServerError))]
struct CommentsPath {
    id: Id<PostMarker>,
}

async fn add_comment(
    CommentsPath { id }: CommentsPath,
    State(db): State<Arc<DbClient>>,
    user: SessionUser,
    Json(draft): Json<CommentDraft>,
) -> Result<(StatusCode, Json<Comment>)> {
    db.fetch_post(id)
        .await?
        .ok_or(ServerError::PostByIdNotFound(id))?;

    let text = CommentText::new(draft.text).map_err(|err| {
        let message = match err {
            InvalidCommentTextError::Empty => "must not be empty".to_owned(),
            InvalidCommentTextError::TooLong => {
                format!("must be at most {COMMENT_TEXT_MAX_LEN} characters")
            }
        };
        ServerError::Validation(ValidationError::single("text", message))
    })?;

    let comment = db.create_comment(id, user.user_id(), &text).await?;

    Ok((StatusCode::CREATED, Json(comment)))
}

async fn validate_draft(db: &DbClient, draft: &PostDraft) -> Result<()> {
    let mut errors = ValidationError::default();

    if draft.checked_text().is_err() {
        errors.add_error("text", "must not be empty");
    }
    if let Some(group_id) = draft.group
        && db.fetch_group(group_id).await?.is_none()
    {
        errors.add_error("group", "unknown group");
    }

    errors.into_result().map_err(ServerError::Validation)
}
