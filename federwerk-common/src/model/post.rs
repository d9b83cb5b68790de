use crate::model::{
    Id,
    group::{Group, GroupMarker},
    user::{User, UserMarker},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::UtcDateTime;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct PostMarker;

/// A post with its author and group resolved, as listings and the detail
/// view present it.
#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize, Serialize)]
pub struct Post {
    pub id: Id<PostMarker>,
    pub author: User,
    pub group: Option<Group>,
    pub text: String,
    pub image: Option<String>,
    pub published_at: UtcDateTime,
}

/// A freshly written row, before the author join is worth doing.
#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize, Serialize)]
pub struct PartialPost {
    pub id: Id<PostMarker>,
    pub author_id: Id<UserMarker>,
    pub group_id: Option<Id<GroupMarker>>,
    pub text: String,
    pub image: Option<String>,
    pub published_at: UtcDateTime,
}

/// What a create or edit request carries. The author and the publication
/// timestamp are never part of it.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
pub struct PostDraft {
    pub text: String,
    #[serde(default)]
    pub group: Option<Id<GroupMarker>>,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Error)]
#[error("The post text must not be empty")]
pub struct InvalidPostTextError;

impl PostDraft {
    /// Whitespace-only text is as good as no text.
    pub fn checked_text(&self) -> Result<&str, InvalidPostTextError> {
        if self.text.trim().is_empty() {
            Err(InvalidPostTextError)
        } else {
            Ok(&self.text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_text_must_not_be_blank() {
        let draft = PostDraft {
            text: "  \n\t ".to_owned(),
            ..PostDraft::default()
        };
        assert_eq!(draft.checked_text(), Err(InvalidPostTextError));

        let draft = PostDraft {
            text: "first!".to_owned(),
            ..PostDraft::default()
        };
        assert_eq!(draft.checked_text(), Ok("first!"));
    }
}
