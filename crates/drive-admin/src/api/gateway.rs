use crate::domain::{
    AdminAccount, Credentials, Enrollment, EnrollmentId, LoginGrant, RegistrationDetail,
    RegistrationId, RegistrationSummary, SignupReceipt, TeacherAccount, VerificationVerdict,
};
use crate::reports::ReportPayload;

use super::error::ApiError;

/// Binary body returned by the report endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDownload {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// One method per backend operation, so views and forms can be exercised against
/// an in-memory double. Each call is a single attempt with no retry.
#[allow(async_fn_in_trait)]
pub trait AdminGateway {
    async fn admin_signup(&self, account: &AdminAccount) -> Result<SignupReceipt, ApiError>;
    async fn teacher_signup(&self, account: &TeacherAccount) -> Result<SignupReceipt, ApiError>;
    async fn login(&self, credentials: &Credentials) -> Result<LoginGrant, ApiError>;

    async fn pending_registrations(&self) -> Result<Vec<RegistrationSummary>, ApiError>;
    async fn registration_detail(&self, id: &RegistrationId)
        -> Result<RegistrationDetail, ApiError>;
    async fn verify_registration(
        &self,
        id: &RegistrationId,
        verdict: &VerificationVerdict,
    ) -> Result<(), ApiError>;

    async fn pending_enrollments(&self) -> Result<Vec<Enrollment>, ApiError>;
    async fn approve_enrollment(&self, id: &EnrollmentId) -> Result<(), ApiError>;
    async fn reject_enrollment(&self, id: &EnrollmentId) -> Result<(), ApiError>;

    async fn generate_report(&self, payload: &ReportPayload) -> Result<ReportDownload, ApiError>;
}
