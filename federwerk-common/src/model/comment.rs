use crate::model::{
    Id,
    post::PostMarker,
    user::User,
};
use serde::{
    Deserialize, Deserializer, Serialize,
    de::{Error, Unexpected},
};
use thiserror::Error;
use time::UtcDateTime;

pub const COMMENT_TEXT_MAX_LEN: usize = 200;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct CommentMarker;

#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize, Serialize)]
pub struct Comment {
    pub id: Id<CommentMarker>,
    pub post_id: Id<PostMarker>,
    pub author: User,
    pub text: CommentText,
    pub created_at: UtcDateTime,
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
pub struct CommentDraft {
    pub text: String,
}

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Serialize)]
#[serde(transparent)]
pub struct CommentText(String);

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, Error)]
pub enum InvalidCommentTextError {
    #[error("The comment text must not be empty")]
    Empty,
    #[error("The comment text must be at most {COMMENT_TEXT_MAX_LEN} characters")]
    TooLong,
}

impl CommentText {
    pub fn new(text: String) -> Result<Self, InvalidCommentTextError> {
        if text.trim().is_empty() {
            Err(InvalidCommentTextError::Empty)
        } else if text.chars().count() > COMMENT_TEXT_MAX_LEN {
            Err(InvalidCommentTextError::TooLong)
        } else {
            Ok(CommentText(text))
        }
    }

    #[must_use]
    pub fn get(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for CommentText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let inner = String::deserialize(deserializer)?;
        CommentText::new(inner.clone())
            .map_err(|_| Error::invalid_value(Unexpected::Str(&inner), &"CommentText"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comment_text_bounds() {
        assert!(CommentText::new("nice post".to_owned()).is_ok());
        assert!(CommentText::new("щ".repeat(COMMENT_TEXT_MAX_LEN)).is_ok());

        assert_eq!(
            CommentText::new("  ".to_owned()),
            Err(InvalidCommentTextError::Empty)
        );
        assert_eq!(
            CommentText::new("x".repeat(COMMENT_TEXT_MAX_LEN + 1)),
            Err(InvalidCommentTextError::TooLong)
        );
    }
}
