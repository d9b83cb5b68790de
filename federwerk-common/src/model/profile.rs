use crate::model::user::User;
use serde::{Deserialize, Serialize};

/// An author as seen by a viewer. `following` is `None` for anonymous
/// viewers, `Some` with the actual edge state for logged-in ones.
#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize, Serialize)]
pub struct Profile {
    pub author: User,
    pub following: Option<bool>,
}
