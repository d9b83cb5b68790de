use axum::{
    Router,
    extract::{
        FromRef, Request,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{StatusCode, Uri},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::routing::TypedPath;
use federwerk_common::{
    model::{
        Id,
        auth::{PasswordHashError, SessionTokenHashError},
        group::GroupSlug,
        post::PostMarker,
        user::UserHandle,
        validation::ValidationError,
    },
    util::PositiveDuration,
};
use federwerk_db::client::{DbClient, DbError};
use json::Json;
use routes::{auth::LoginPath, posts::GetPostPath};
use serde::Serialize;
use std::{num::NonZeroU32, sync::Arc};
use thiserror::Error;
use tracing::error;

mod json;
mod routes;
mod session;

pub type ServerRouter = Router<ServerState>;

#[derive(Clone, Debug, FromRef)]
pub struct ServerState {
    pub db_client: Arc<DbClient>,
    pub config: ServerConfig,
}

#[derive(Copy, Clone, Debug)]
pub struct ServerConfig {
    pub page_size: NonZeroU32,
    pub session_lifetime: Option<PositiveDuration>,
}

pub fn routes() -> ServerRouter {
    routes::routes().fallback(fallback)
}

pub async fn fallback(request: Request) -> ServerError {
    ServerError::UnknownRoute(request.into_parts().0.uri)
}

pub type Result<T, E = ServerError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Unknown route requested: {0}")]
    UnknownRoute(Uri),
    #[error("Path rejected: {0}")]
    PathRejection(#[from] PathRejection),
    #[error("Query rejected: {0}")]
    QueryRejection(#[from] QueryRejection),
    #[error("Incoming JSON rejected: {0}")]
    JsonRejection(#[from] JsonRejection),
    #[error("JSON response could not be serialized: {0}")]
    JsonResponse(#[from] serde_json::Error),
    #[error("Login required to access {0}")]
    LoginRequired(Uri),
    #[error("The session token could not be hashed: {0}")]
    SessionTokenHash(#[from] SessionTokenHashError),
    #[error("The password could not be hashed: {0}")]
    PasswordHash(#[from] PasswordHashError),
    #[error("Invalid handle or password")]
    BadCredentials,
    #[error("One or more fields were rejected")]
    Validation(ValidationError),
    #[error(transparent)]
    Database(#[from] DbError),
    #[error("Post with id {0} was not found.")]
    PostByIdNotFound(Id<PostMarker>),
    #[error("Group with slug {0} was not found.")]
    GroupBySlugNotFound(GroupSlug),
    #[error("User with handle {0} was not found.")]
    UserByHandleNotFound(UserHandle),
    #[error("Only the author of post {0} may edit it")]
    NotPostAuthor(Id<PostMarker>),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::UnknownRoute(_)
            | ServerError::PathRejection(_)
            | ServerError::PostByIdNotFound(_)
            | ServerError::GroupBySlugNotFound(_)
            | ServerError::UserByHandleNotFound(_) => StatusCode::NOT_FOUND,
            ServerError::LoginRequired(_) | ServerError::NotPostAuthor(_) => {
                StatusCode::SEE_OTHER
            }
            ServerError::BadCredentials => StatusCode::UNAUTHORIZED,
            ServerError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServerError::QueryRejection(_) | ServerError::JsonRejection(_) => {
                StatusCode::BAD_REQUEST
            }
            ServerError::JsonResponse(_)
            | ServerError::Database(_)
            | ServerError::SessionTokenHash(_)
            | ServerError::PasswordHash(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
struct ErrorResponse {
    status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<ValidationError>,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();

        error!(error = %self, %status, "Replying with error");

        let errors = match self {
            ServerError::LoginRequired(next) => {
                let login = format!("{}?next={next}", LoginPath::PATH);
                return Redirect::to(&login).into_response();
            }
            ServerError::NotPostAuthor(post_id) => {
                let detail = GetPostPath { id: post_id }.to_uri();
                return Redirect::to(&detail.to_string()).into_response();
            }
            ServerError::Validation(errors) => Some(errors),
            _ => None,
        };

        let error_response = ErrorResponse {
            status: status.as_u16(),
            errors,
        };
        (status, Json(error_response)).into_response()
    }
}
