//! Merchant feedback form: free text plus a 1-5 star rating.

use crate::notice::{Notice, FEEDBACK_NOTICE_MS};
use log::info;

pub const MAX_RATING: u8 = 5;

/// Form state. A rating of 0 means "not rated yet".
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FeedbackForm {
    pub feedback: String,
    pub rating: u8,
}

impl FeedbackForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_rating(&mut self, rating: u8) -> Result<(), String> {
        if rating > MAX_RATING {
            return Err(format!("rating must be between 0 and {}", MAX_RATING));
        }
        self.rating = rating;
        Ok(())
    }

    /// Validates and submits the form.
    ///
    /// Missing text with a rating clears the rating; text without a rating clears the
    /// text. A successful submit clears both.
    pub fn submit(&mut self) -> Result<Notice, Notice> {
        let has_text = !self.feedback.trim().is_empty();
        let has_rating = self.rating != 0;
        match (has_text, has_rating) {
            (false, false) => Err(warning("Please submit both feedback and rating.")),
            (false, true) => {
                self.rating = 0;
                Err(warning("Please write some feedback."))
            }
            (true, false) => {
                self.feedback.clear();
                Err(warning("Please select a rating."))
            }
            (true, true) => {
                info!(
                    "feedback received rating={} length={}",
                    self.rating,
                    self.feedback.trim().len()
                );
                self.feedback.clear();
                self.rating = 0;
                Ok(Notice::info("Feedback", "Thank you for your feedback!")
                    .with_duration(FEEDBACK_NOTICE_MS))
            }
        }
    }
}

fn warning(description: &str) -> Notice {
    Notice::warning("Feedback", description).with_duration(FEEDBACK_NOTICE_MS)
}
