// Feedback form data
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MAX_COMMENT_LEN: usize = 1000;

#[derive(Debug, Error, PartialEq)]
pub enum FeedbackError {
    #[error("rating must be between 1 and 5, got {0}")]
    RatingOutOfRange(u8),
    #[error("comment is longer than 1000 characters")]
    CommentTooLong,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feedback {
    pub id: String,
    pub rating: u8,
    pub comment: Option<String>,
    pub submitted_at: String, // ISO 8601
}

impl Feedback {
    pub fn new(rating: u8, comment: Option<String>) -> Result<Self, FeedbackError> {
        if !(1..=5).contains(&rating) {
            return Err(FeedbackError::RatingOutOfRange(rating));
        }

        let comment = comment
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        if comment
            .as_ref()
            .map_or(false, |c| c.chars().count() > MAX_COMMENT_LEN)
        {
            return Err(FeedbackError::CommentTooLong);
        }

        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            rating,
            comment,
            submitted_at: chrono::Utc::now().to_rfc3339(),
        })
    }
}
