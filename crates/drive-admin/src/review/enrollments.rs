use std::sync::Arc;

use tracing::{info, warn};

use crate::api::{AdminGateway, ApiError, RequestScope};
use crate::domain::{Enrollment, EnrollmentId};

use super::filters::{enrollment_matches, DocumentFilter};
use super::QueueError;

/// Which mutation an admin applied to an enrollment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrollmentDecision {
    Approve,
    Reject,
}

impl EnrollmentDecision {
    pub fn past_tense(self) -> &'static str {
        match self {
            EnrollmentDecision::Approve => "approved",
            EnrollmentDecision::Reject => "rejected",
        }
    }
}

/// Pending enrollments screen: list, local filter, detail dialog, approve/reject.
///
/// Dropping the queue cancels its scope so late responses are discarded.
pub struct EnrollmentQueue<G> {
    gateway: Arc<G>,
    scope: RequestScope,
    enrollments: Vec<Enrollment>,
    loading: bool,
    selected: Option<Enrollment>,
    filter: DocumentFilter,
    search: String,
    notice: Option<String>,
}

impl<G> EnrollmentQueue<G>
where
    G: AdminGateway,
{
    pub fn new(gateway: Arc<G>, scope: RequestScope) -> Self {
        Self {
            gateway,
            scope,
            enrollments: Vec::new(),
            loading: false,
            selected: None,
            filter: DocumentFilter::All,
            search: String::new(),
            notice: None,
        }
    }

    pub fn enrollments(&self) -> &[Enrollment] {
        &self.enrollments
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn filter(&self) -> DocumentFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: DocumentFilter) {
        self.filter = filter;
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    /// Rows passing the document filter and the search box.
    pub fn visible(&self) -> Vec<&Enrollment> {
        self.enrollments
            .iter()
            .filter(|enrollment| enrollment_matches(enrollment, self.filter, &self.search))
            .collect()
    }

    pub async fn refresh(&mut self) -> Result<(), QueueError> {
        if self.loading {
            return Err(QueueError::Busy);
        }

        self.loading = true;
        let result = self.scope.run(self.gateway.pending_enrollments()).await;
        self.loading = false;

        match result {
            Ok(enrollments) => {
                self.enrollments = enrollments;
                self.notice = None;
                Ok(())
            }
            Err(err) => Err(self.surface(err, "Failed to load pending enrollments.")),
        }
    }

    /// Open the detail dialog for a loaded record. No request is made.
    pub fn select(&mut self, id: &EnrollmentId) -> Result<&Enrollment, QueueError> {
        let enrollment = self
            .enrollments
            .iter()
            .find(|enrollment| &enrollment.id == id)
            .cloned()
            .ok_or_else(|| QueueError::NotFound(id.0.clone()))?;
        Ok(&*self.selected.insert(enrollment))
    }

    pub fn selected(&self) -> Option<&Enrollment> {
        self.selected.as_ref()
    }

    pub fn close(&mut self) {
        self.selected = None;
    }

    pub async fn approve(&mut self, id: &EnrollmentId) -> Result<(), QueueError> {
        self.decide(id, EnrollmentDecision::Approve).await
    }

    pub async fn reject(&mut self, id: &EnrollmentId) -> Result<(), QueueError> {
        self.decide(id, EnrollmentDecision::Reject).await
    }

    async fn decide(
        &mut self,
        id: &EnrollmentId,
        decision: EnrollmentDecision,
    ) -> Result<(), QueueError> {
        if self.loading {
            return Err(QueueError::Busy);
        }

        self.loading = true;
        let result = match decision {
            EnrollmentDecision::Approve => {
                self.scope.run(self.gateway.approve_enrollment(id)).await
            }
            EnrollmentDecision::Reject => self.scope.run(self.gateway.reject_enrollment(id)).await,
        };
        self.loading = false;

        if let Err(err) = result {
            let fallback = match decision {
                EnrollmentDecision::Approve => "Failed to approve enrollment.",
                EnrollmentDecision::Reject => "Failed to reject enrollment.",
            };
            return Err(self.surface(err, fallback));
        }

        info!(enrollment = %id, decision = decision.past_tense(), "enrollment decided");
        if self.selected.as_ref().is_some_and(|selected| &selected.id == id) {
            self.selected = None;
        }
        self.refresh().await
    }

    fn surface(&mut self, err: ApiError, fallback: &str) -> QueueError {
        if !err.is_cancelled() {
            warn!(error = %err, "enrollment queue request failed");
            self.notice = Some(err.user_message(fallback));
        }
        QueueError::Api(err)
    }
}

impl<G> Drop for EnrollmentQueue<G> {
    fn drop(&mut self) {
        self.scope.cancel();
    }
}
