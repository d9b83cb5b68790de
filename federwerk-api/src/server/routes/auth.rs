use crate::server::{
    Result, ServerConfig, ServerError, ServerRouter,
    json::Json,
    session::{SESSION_COOKIE, SessionUser},
};
use axum::{extract::State, http::StatusCode};
use axum_extra::{
    extract::cookie::{Cookie, CookieJar, SameSite},
    routing::{RouterExt, TypedPath},
};
use federwerk_common::model::{
    Id,
    auth::{HashedPassword, Session, SessionToken},
    user::{LoginUser, PASSWORD_MIN_LEN, RegisterUser, User, UserHandle, UserMarker},
    validation::ValidationError,
};
use federwerk_db::client::DbClient;
use serde::Deserialize;
use std::sync::Arc;
use time::UtcDateTime;

pub fn routes() -> ServerRouter {
    ServerRouter::new()
        .typed_post(register)
        .typed_post(login)
        .typed_post(logout)
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/auth/register", rejection(ServerError))]
struct RegisterPath();

async fn register(
    RegisterPath(): RegisterPath,
    State(db): State<Arc<DbClient>>,
    State(config): State<ServerConfig>,
    jar: CookieJar,
    Json(registration): Json<RegisterUser>,
) -> Result<(StatusCode, CookieJar, Json<User>)> {
    let handle = validate_registration(&db, &registration).await?;

    let password_hash = HashedPassword::hash(&registration.password)?;
    let user = db.create_user(&handle, &password_hash).await?;
    let jar = open_session(&db, config, user.id, jar).await?;

    Ok((StatusCode::CREATED, jar, Json(user)))
}

async fn validate_registration(
    db: &DbClient,
    registration: &RegisterUser,
) -> Result<UserHandle> {
    let mut errors = ValidationError::default();

    let handle = match UserHandle::new(registration.handle.clone()) {
        Ok(handle) => {
            // Uniqueness is checked here rather than left to the unique
            // index, so it surfaces as a field error like the rest.
            if db.fetch_user_by_handle(&handle).await?.is_some() {
                errors.add_error("handle", "already taken");
            }
            Some(handle)
        }
        Err(_) => {
            errors.add_error("handle", "must be between 1 and 50 characters");
            None
        }
    };

    if registration.password.get().chars().count() < PASSWORD_MIN_LEN {
        errors.add_error(
            "password",
            format!("must be at least {PASSWORD_MIN_LEN} characters"),
        );
    }

    match handle {
        Some(handle) => {
            errors.into_result().map_err(ServerError::Validation)?;
            Ok(handle)
        }
        None => Err(ServerError::Validation(errors)),
    }
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/auth/login", rejection(ServerError))]
pub(crate) struct LoginPath();

async fn login(
    LoginPath(): LoginPath,
    State(db): State<Arc<DbClient>>,
    State(config): State<ServerConfig>,
    jar: CookieJar,
    Json(login): Json<LoginUser>,
) -> Result<(CookieJar, Json<User>)> {
    let handle =
        UserHandle::new(login.handle.clone()).map_err(|_| ServerError::BadCredentials)?;
    let (user, password_hash) = db
        .fetch_credentials(&handle)
        .await?
        .ok_or(ServerError::BadCredentials)?;

    if !password_hash.verify(&login.password)? {
        return Err(ServerError::BadCredentials);
    }

    let jar = open_session(&db, config, user.id, jar).await?;
    Ok((jar, Json(user)))
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/auth/logout", rejection(ServerError))]
struct LogoutPath();

async fn logout(
    LogoutPath(): LogoutPath,
    State(db): State<Arc<DbClient>>,
    user: SessionUser,
    jar: CookieJar,
) -> Result<(StatusCode, CookieJar)> {
    db.delete_session(user.token_hash()).await?;

    let removal = Cookie::build(SESSION_COOKIE).path("/").build();
    Ok((StatusCode::NO_CONTENT, jar.remove(removal)))
}

async fn open_session(
    db: &DbClient,
    config: ServerConfig,
    user_id: Id<UserMarker>,
    jar: CookieJar,
) -> Result<CookieJar> {
    let token = SessionToken::generate_random(user_id);
    let session = Session {
        user: user_id,
        token_hash: token.hash()?,
        created_at: UtcDateTime::now(),
        expires_after: config.session_lifetime,
    };
    db.create_session(&session).await?;

    let cookie = Cookie::build((SESSION_COOKIE, token.as_cookie_value()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .build();

    Ok(jar.add(cookie))
}
