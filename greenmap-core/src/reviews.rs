use crate::dashboard::Notice;
use crate::error::ValidationError;
use crate::model::{CityQuery, MutationAck, NewReview, Review};
use crate::orchestrator::CityQueryOrchestrator;

/// Drives the rendered review list and its per-item delete action.
///
/// Deletion asks for confirmation first, and on success re-runs the
/// weather, heatmap, reviews and properties pipelines for the entered
/// city. A delete the server reports as unsuccessful is treated as
/// "already deleted", not as an error, and the list is left unchanged.
#[derive(Debug)]
pub struct ReviewListController<'a> {
    orchestrator: &'a mut CityQueryOrchestrator,
}

impl<'a> ReviewListController<'a> {
    pub fn new(orchestrator: &'a mut CityQueryOrchestrator) -> Self {
        Self { orchestrator }
    }

    /// The reviews currently held for the displayed city.
    pub fn reviews(&self) -> &[Review] {
        &self.orchestrator.dashboard.reviews
    }

    pub async fn delete_review(
        &mut self,
        city: &str,
        id: &str,
        confirm: impl FnOnce() -> bool,
    ) -> Result<(), ValidationError> {
        let city = CityQuery::new(city)?;

        if !confirm() {
            return Ok(());
        }

        let ack = self.orchestrator.source().delete_review(id).await;
        match ack {
            Ok(MutationAck { success: true }) => {
                self.orchestrator
                    .dashboard
                    .push_notice(Notice::info("reviews", "Review deleted successfully!"));
                self.orchestrator.refresh_after_review_change(city.name()).await?;
            }
            Ok(MutationAck { success: false }) => {
                self.orchestrator
                    .dashboard
                    .push_notice(Notice::info("reviews", "Review not found or already deleted."));
            }
            Err(err) => {
                log::warn!("review delete failed: {err}");
                self.orchestrator
                    .dashboard
                    .push_notice(Notice::error("reviews", "Error deleting review."));
            }
        }

        Ok(())
    }
}

/// Holds the review form's draft text and rating and submits them.
///
/// The rating stays a raw string until validation so a non-numeric entry
/// is caught before any network call. A successful submission clears both
/// fields and re-runs the full city query; any failure leaves the drafts
/// intact for resubmission.
#[derive(Debug, Default)]
pub struct ReviewSubmissionController {
    pub text: String,
    pub rating: String,
}

impl ReviewSubmissionController {
    pub fn new(text: impl Into<String>, rating: impl Into<String>) -> Self {
        Self { text: text.into(), rating: rating.into() }
    }

    /// Checks the drafts against `city` without touching the network.
    pub fn validate(&self, city: &str) -> Result<NewReview, ValidationError> {
        let city = CityQuery::new(city)?;

        let text = self.text.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyReviewText);
        }

        let rating: i32 =
            self.rating.trim().parse().map_err(|_| ValidationError::InvalidRating)?;

        Ok(NewReview { city: city.name().to_string(), text: text.to_string(), rating })
    }

    pub async fn submit(
        &mut self,
        city: &str,
        orchestrator: &mut CityQueryOrchestrator,
    ) -> Result<(), ValidationError> {
        let review = self.validate(city)?;

        let ack = orchestrator.source().submit_review(&review).await;
        match ack {
            Ok(MutationAck { success: true }) => {
                self.text.clear();
                self.rating.clear();
                orchestrator
                    .dashboard
                    .push_notice(Notice::info("reviews", "Review submitted successfully!"));
                orchestrator.run_query(&review.city).await?;
            }
            Ok(MutationAck { success: false }) => {
                orchestrator
                    .dashboard
                    .push_notice(Notice::error("reviews", "Failed to submit review."));
            }
            Err(err) => {
                log::warn!("review submission failed: {err}");
                orchestrator
                    .dashboard
                    .push_notice(Notice::error("reviews", "Error submitting review."));
            }
        }

        Ok(())
    }
}
