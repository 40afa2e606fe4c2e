use std::sync::Arc;

use tracing::{info, warn};

use crate::api::{AdminGateway, ApiError, RequestScope};
use crate::domain::{
    RegistrationDetail, RegistrationId, RegistrationSummary, VerificationDecision,
    VerificationVerdict,
};

use super::filters::{registration_matches, StatusFilter};
use super::QueueError;

/// The verification dialog: the full record plus the remark being typed.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationDialog {
    pub record: RegistrationDetail,
    pub remark: String,
}

/// Document verification screen. Every call here needs a signed-in session.
pub struct RegistrationQueue<G> {
    gateway: Arc<G>,
    scope: RequestScope,
    rows: Vec<RegistrationSummary>,
    loading: bool,
    dialog: Option<RegistrationDialog>,
    dialog_loading: bool,
    filter: StatusFilter,
    search: String,
    notice: Option<String>,
}

impl<G> RegistrationQueue<G>
where
    G: AdminGateway,
{
    pub fn new(gateway: Arc<G>, scope: RequestScope) -> Self {
        Self {
            gateway,
            scope,
            rows: Vec::new(),
            loading: false,
            dialog: None,
            dialog_loading: false,
            filter: StatusFilter::Any,
            search: String::new(),
            notice: None,
        }
    }

    pub fn rows(&self) -> &[RegistrationSummary] {
        &self.rows
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_dialog_loading(&self) -> bool {
        self.dialog_loading
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn filter(&self) -> StatusFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: StatusFilter) {
        self.filter = filter;
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn visible(&self) -> Vec<&RegistrationSummary> {
        self.rows
            .iter()
            .filter(|row| registration_matches(row, self.filter, &self.search))
            .collect()
    }

    pub async fn refresh(&mut self) -> Result<(), QueueError> {
        if self.loading {
            return Err(QueueError::Busy);
        }

        self.loading = true;
        let result = self.scope.run(self.gateway.pending_registrations()).await;
        self.loading = false;

        match result {
            Ok(rows) => {
                self.rows = rows;
                self.notice = None;
                Ok(())
            }
            Err(err) => Err(self.surface(err, "Failed to load pending registrations.")),
        }
    }

    /// Fetch the full record and open the dialog on it.
    pub async fn open(&mut self, id: &RegistrationId) -> Result<&RegistrationDialog, QueueError> {
        if self.dialog_loading {
            return Err(QueueError::Busy);
        }

        self.dialog_loading = true;
        let result = self.scope.run(self.gateway.registration_detail(id)).await;
        self.dialog_loading = false;

        match result {
            Ok(record) => Ok(&*self.dialog.insert(RegistrationDialog {
                record,
                remark: String::new(),
            })),
            Err(err) => Err(self.surface(err, "Failed to load registration details.")),
        }
    }

    pub fn dialog(&self) -> Option<&RegistrationDialog> {
        self.dialog.as_ref()
    }

    pub fn set_remark(&mut self, remark: impl Into<String>) -> Result<(), QueueError> {
        let dialog = self.dialog.as_mut().ok_or(QueueError::NothingOpen)?;
        dialog.remark = remark.into();
        Ok(())
    }

    pub fn close(&mut self) {
        self.dialog = None;
    }

    /// Post the decision for the open record, then close the dialog and re-fetch.
    pub async fn verify(&mut self, decision: VerificationDecision) -> Result<(), QueueError> {
        if self.dialog_loading || self.loading {
            return Err(QueueError::Busy);
        }
        let (id, verdict) = match &self.dialog {
            Some(dialog) => (
                dialog.record.id.clone(),
                VerificationVerdict {
                    status: decision,
                    remark: dialog.remark.clone(),
                },
            ),
            None => return Err(QueueError::NothingOpen),
        };

        self.dialog_loading = true;
        let result = self
            .scope
            .run(self.gateway.verify_registration(&id, &verdict))
            .await;
        self.dialog_loading = false;

        if let Err(err) = result {
            return Err(self.surface(err, "Failed to update verification status."));
        }

        info!(registration = %id, decision = decision.label(), "registration verified");
        self.dialog = None;
        self.refresh().await
    }

    fn surface(&mut self, err: ApiError, fallback: &str) -> QueueError {
        if !err.is_cancelled() {
            warn!(error = %err, "registration queue request failed");
            self.notice = Some(err.user_message(fallback));
        }
        QueueError::Api(err)
    }
}

impl<G> Drop for RegistrationQueue<G> {
    fn drop(&mut self) {
        self.scope.cancel();
    }
}
