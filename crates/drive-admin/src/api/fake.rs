use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use serde_json::{json, Value};

use crate::domain::{
    AdminAccount, Credentials, Enrollment, EnrollmentId, LoginGrant, RegistrationDetail,
    RegistrationId, RegistrationSummary, SignupReceipt, TeacherAccount, VerificationVerdict,
};
use crate::reports::ReportPayload;

use super::error::ApiError;
use super::gateway::{AdminGateway, ReportDownload};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    AdminSignup(AdminAccount),
    TeacherSignup(TeacherAccount),
    Login(Credentials),
    PendingRegistrations,
    RegistrationDetail(RegistrationId),
    VerifyRegistration(RegistrationId, VerificationVerdict),
    PendingEnrollments,
    ApproveEnrollment(EnrollmentId),
    RejectEnrollment(EnrollmentId),
    GenerateReport(Value),
}

/// In-memory gateway recording every call. Failures are queued per call kind
/// with [`FakeGateway::fail_next`].
#[derive(Default)]
pub(crate) struct FakeGateway {
    calls: Mutex<Vec<Call>>,
    failures: Mutex<HashMap<&'static str, VecDeque<ApiError>>>,
    enrollments: Mutex<Vec<Enrollment>>,
    registrations: Mutex<Vec<RegistrationSummary>>,
    details: Mutex<HashMap<RegistrationId, RegistrationDetail>>,
    report: Mutex<Option<ReportDownload>>,
}

impl FakeGateway {
    pub(crate) fn with_enrollments(enrollments: Vec<Enrollment>) -> Self {
        let gateway = Self::default();
        *gateway.enrollments.lock().expect("fake mutex poisoned") = enrollments;
        gateway
    }

    pub(crate) fn with_registrations(
        registrations: Vec<RegistrationSummary>,
        details: Vec<RegistrationDetail>,
    ) -> Self {
        let gateway = Self::default();
        *gateway.registrations.lock().expect("fake mutex poisoned") = registrations;
        *gateway.details.lock().expect("fake mutex poisoned") = details
            .into_iter()
            .map(|detail| (detail.id.clone(), detail))
            .collect();
        gateway
    }

    pub(crate) fn set_report(&self, download: ReportDownload) {
        *self.report.lock().expect("fake mutex poisoned") = Some(download);
    }

    pub(crate) fn set_enrollments(&self, enrollments: Vec<Enrollment>) {
        *self.enrollments.lock().expect("fake mutex poisoned") = enrollments;
    }

    /// Make the next call named `operation` fail with `error`.
    pub(crate) fn fail_next(&self, operation: &'static str, error: ApiError) {
        self.failures
            .lock()
            .expect("fake mutex poisoned")
            .entry(operation)
            .or_default()
            .push_back(error);
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("fake mutex poisoned").clone()
    }

    pub(crate) fn count(&self, matches: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|call| matches(call)).count()
    }

    fn record(&self, operation: &'static str, call: Call) -> Result<(), ApiError> {
        self.calls.lock().expect("fake mutex poisoned").push(call);
        match self
            .failures
            .lock()
            .expect("fake mutex poisoned")
            .get_mut(operation)
            .and_then(VecDeque::pop_front)
        {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

pub(crate) fn server_error(status: u16, message: Option<&str>) -> ApiError {
    ApiError::Status {
        status,
        message: message.map(str::to_string),
        content_type: message.map(|_| "application/json".to_string()),
    }
}

impl AdminGateway for FakeGateway {
    async fn admin_signup(&self, account: &AdminAccount) -> Result<SignupReceipt, ApiError> {
        self.record("admin_signup", Call::AdminSignup(account.clone()))?;
        Ok(json!({ "id": "admin-1", "email": account.email }))
    }

    async fn teacher_signup(&self, account: &TeacherAccount) -> Result<SignupReceipt, ApiError> {
        self.record("teacher_signup", Call::TeacherSignup(account.clone()))?;
        Ok(json!({ "id": "teacher-1", "email": account.email }))
    }

    async fn login(&self, credentials: &Credentials) -> Result<LoginGrant, ApiError> {
        self.record("login", Call::Login(credentials.clone()))?;
        Ok(LoginGrant {
            token: format!("token-for-{}", credentials.email),
        })
    }

    async fn pending_registrations(&self) -> Result<Vec<RegistrationSummary>, ApiError> {
        self.record("pending_registrations", Call::PendingRegistrations)?;
        Ok(self.registrations.lock().expect("fake mutex poisoned").clone())
    }

    async fn registration_detail(
        &self,
        id: &RegistrationId,
    ) -> Result<RegistrationDetail, ApiError> {
        self.record("registration_detail", Call::RegistrationDetail(id.clone()))?;
        self.details
            .lock()
            .expect("fake mutex poisoned")
            .get(id)
            .cloned()
            .ok_or_else(|| server_error(404, Some("Registration not found")))
    }

    async fn verify_registration(
        &self,
        id: &RegistrationId,
        verdict: &VerificationVerdict,
    ) -> Result<(), ApiError> {
        self.record(
            "verify_registration",
            Call::VerifyRegistration(id.clone(), verdict.clone()),
        )?;
        self.registrations
            .lock()
            .expect("fake mutex poisoned")
            .retain(|row| &row.registration_id != id);
        Ok(())
    }

    async fn pending_enrollments(&self) -> Result<Vec<Enrollment>, ApiError> {
        self.record("pending_enrollments", Call::PendingEnrollments)?;
        Ok(self.enrollments.lock().expect("fake mutex poisoned").clone())
    }

    async fn approve_enrollment(&self, id: &EnrollmentId) -> Result<(), ApiError> {
        self.record("approve_enrollment", Call::ApproveEnrollment(id.clone()))?;
        self.enrollments
            .lock()
            .expect("fake mutex poisoned")
            .retain(|enrollment| &enrollment.id != id);
        Ok(())
    }

    async fn reject_enrollment(&self, id: &EnrollmentId) -> Result<(), ApiError> {
        self.record("reject_enrollment", Call::RejectEnrollment(id.clone()))?;
        self.enrollments
            .lock()
            .expect("fake mutex poisoned")
            .retain(|enrollment| &enrollment.id != id);
        Ok(())
    }

    async fn generate_report(&self, payload: &ReportPayload) -> Result<ReportDownload, ApiError> {
        let body = serde_json::to_value(payload).map_err(|err| ApiError::Decode(err.to_string()))?;
        self.record("generate_report", Call::GenerateReport(body))?;
        Ok(self
            .report
            .lock()
            .expect("fake mutex poisoned")
            .clone()
            .unwrap_or_else(|| ReportDownload {
                content_type: "application/pdf".to_string(),
                bytes: b"%PDF-1.7 fake".to_vec(),
            }))
    }
}
