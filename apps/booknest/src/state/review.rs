//! # Review State
//!
//! Reader reviews for the book being viewed. In memory only.

use std::sync::Mutex;

use booknest_core::validation::{validate_comment, validate_rating};
use booknest_core::Review;
use chrono::Utc;

use super::lock;
use crate::error::AppResult;

/// Username attached to reviews written on this device.
pub const OWN_REVIEW_USERNAME: &str = "You";

const SAMPLE_REVIEWS: &[(&str, u8, &str)] = &[
    ("Alice", 5, "Absolutely loved this book!"),
    ("Brian", 4, "Great read but a bit slow in the middle."),
    ("Cynthia", 3, "Average story but good characters."),
];

/// State holder for the reviews screen.
#[derive(Debug)]
pub struct ReviewState {
    reviews: Mutex<Vec<Review>>,
}

impl ReviewState {
    /// Starts with the sample reviews.
    pub fn new() -> Self {
        let now = Utc::now();
        let reviews = SAMPLE_REVIEWS
            .iter()
            .map(|(username, rating, comment)| Review {
                username: username.to_string(),
                rating: *rating,
                comment: comment.to_string(),
                posted_at: now,
            })
            .collect();

        ReviewState {
            reviews: Mutex::new(reviews),
        }
    }

    /// Posts a review as [`OWN_REVIEW_USERNAME`], newest first.
    ///
    /// Rejects ratings outside 1..=5 and blank comments; the list is left
    /// unchanged in that case.
    pub fn submit(&self, rating: u8, comment: &str) -> AppResult<Review> {
        validate_rating(rating)?;
        let comment = comment.trim();
        validate_comment(comment)?;

        let review = Review {
            username: OWN_REVIEW_USERNAME.to_string(),
            rating,
            comment: comment.to_string(),
            posted_at: Utc::now(),
        };
        lock(&self.reviews).insert(0, review.clone());

        Ok(review)
    }

    pub fn reviews(&self) -> Vec<Review> {
        lock(&self.reviews).clone()
    }

    /// Mean star rating, or `None` when there are no reviews.
    pub fn average_rating(&self) -> Option<f32> {
        let reviews = lock(&self.reviews);
        if reviews.is_empty() {
            return None;
        }
        let total: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
        Some(total as f32 / reviews.len() as f32)
    }
}

impl Default for ReviewState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_starts_with_samples() {
        let state = ReviewState::new();
        let names: Vec<_> = state.reviews().into_iter().map(|r| r.username).collect();
        assert_eq!(names, vec!["Alice", "Brian", "Cynthia"]);
        assert_eq!(state.average_rating(), Some(4.0));
    }

    #[test]
    fn test_submit_goes_to_front() {
        let state = ReviewState::new();
        let review = state.submit(5, "  Could not put it down.  ").unwrap();

        assert_eq!(review.username, "You");
        assert_eq!(review.comment, "Could not put it down.");

        let reviews = state.reviews();
        assert_eq!(reviews.len(), 4);
        assert_eq!(reviews[0], review);
    }

    #[test]
    fn test_invalid_submissions_are_rejected() {
        let state = ReviewState::new();

        let err = state.submit(0, "Nice").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(state.submit(6, "Nice").is_err());
        assert!(state.submit(4, "   ").is_err());

        assert_eq!(state.reviews().len(), 3);
    }
}
