// Feedback form. There is no submission endpoint; entries are only logged.
use crate::models::{Feedback, FeedbackError};
use log::info;

pub fn submit_feedback(rating: u8, comment: Option<String>) -> Result<Feedback, FeedbackError> {
    let feedback = Feedback::new(rating, comment)?;

    info!(
        "Feedback {} received: rating={} comment={:?}",
        feedback.id, feedback.rating, feedback.comment
    );

    Ok(feedback)
}
