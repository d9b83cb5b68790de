pub(crate) mod auth;
mod feed;
mod groups;
pub(crate) mod posts;
mod profiles;

use crate::server::{ServerError, ServerRouter};
use axum::{extract::FromRequestParts, extract::Query, http::request::Parts};
use serde::{Deserialize, Deserializer};

pub fn routes() -> ServerRouter {
    ServerRouter::new()
        .merge(posts::routes())
        .merge(groups::routes())
        .merge(profiles::routes())
        .merge(feed::routes())
        .merge(auth::routes())
}

/// The `?page=` query parameter of every paginated listing.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize)]
pub(crate) struct PageQuery {
    #[serde(default, deserialize_with = "lenient_page_number")]
    pub page: Option<u32>,
}

/// An unparsable page number resolves like any other out-of-range request
/// instead of failing the whole request.
fn lenient_page_number<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|raw| raw.parse().ok()))
}

impl<S: Send + Sync> FromRequestParts<S> for PageQuery {
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::try_from_uri(&parts.uri)?;
        Ok(query)
    }
}
