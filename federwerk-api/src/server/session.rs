use crate::server::ServerError;
use axum::{
    extract::{FromRef, FromRequestParts, OptionalFromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::cookie::CookieJar;
use federwerk_common::model::{
    Id,
    auth::{SessionToken, SessionTokenHash},
    user::UserMarker,
};
use federwerk_db::client::DbClient;
use std::sync::Arc;
use time::UtcDateTime;

pub const SESSION_COOKIE: &str = "federwerk_session";

/// A request proven to come from a logged-in user.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct SessionUser {
    id: Id<UserMarker>,
    token_hash: SessionTokenHash,
}

impl SessionUser {
    #[must_use]
    pub fn user_id(&self) -> Id<UserMarker> {
        self.id
    }

    #[must_use]
    pub fn token_hash(&self) -> &SessionTokenHash {
        &self.token_hash
    }
}

/// `Ok(None)` is an anonymous request; only infrastructure failures err.
/// A cookie that fails to decode reads as anonymous, like any stale or
/// tampered session.
async fn session_user<S>(parts: &Parts, state: &S) -> Result<Option<SessionUser>, ServerError>
where
    Arc<DbClient>: FromRef<S>,
    S: Send + Sync,
{
    let jar = CookieJar::from_headers(&parts.headers);
    let Some(cookie) = jar.get(SESSION_COOKIE) else {
        return Ok(None);
    };
    let Ok(token) = cookie.value().parse::<SessionToken>() else {
        return Ok(None);
    };

    let token_hash = token.hash()?;
    let Some(session) = Arc::<DbClient>::from_ref(state)
        .fetch_session(&token_hash)
        .await?
    else {
        return Ok(None);
    };

    if session.is_expired(UtcDateTime::now()) {
        return Ok(None);
    }

    Ok(Some(SessionUser {
        id: session.user,
        token_hash,
    }))
}

impl<S> FromRequestParts<S> for SessionUser
where
    Arc<DbClient>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        session_user(parts, state)
            .await?
            .ok_or_else(|| ServerError::LoginRequired(parts.uri.clone()))
    }
}

impl<S> OptionalFromRequestParts<S> for SessionUser
where
    Arc<DbClient>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        session_user(parts, state).await
    }
}
