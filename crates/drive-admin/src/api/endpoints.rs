use std::fmt;

use reqwest::Method;

use crate::domain::{EnrollmentId, RegistrationId};

/// Every backend route the console calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    AdminSignup,
    TeacherSignup,
    Login,
    PendingRegistrations,
    RegistrationDetail(RegistrationId),
    VerifyRegistration(RegistrationId),
    PendingEnrollments,
    ApproveEnrollment(EnrollmentId),
    RejectEnrollment(EnrollmentId),
    GenerateReport,
}

impl Endpoint {
    pub fn method(&self) -> Method {
        match self {
            Endpoint::PendingRegistrations
            | Endpoint::RegistrationDetail(_)
            | Endpoint::PendingEnrollments => Method::GET,
            Endpoint::AdminSignup
            | Endpoint::TeacherSignup
            | Endpoint::Login
            | Endpoint::VerifyRegistration(_)
            | Endpoint::ApproveEnrollment(_)
            | Endpoint::RejectEnrollment(_)
            | Endpoint::GenerateReport => Method::POST,
        }
    }

    /// Path segments below the base URL. Ids are single segments and get
    /// percent-encoded when the URL is built.
    pub fn segments(&self) -> Vec<&str> {
        match self {
            Endpoint::AdminSignup => vec!["api", "admin", "signup"],
            Endpoint::TeacherSignup => vec!["api", "teachers", "signup"],
            Endpoint::Login => vec!["api", "admin", "login"],
            Endpoint::PendingRegistrations => vec!["api", "admin", "registrations", "pending"],
            Endpoint::RegistrationDetail(id) => {
                vec!["api", "admin", "registration", id.0.as_str()]
            }
            Endpoint::VerifyRegistration(id) => {
                vec!["api", "admin", "registration", id.0.as_str(), "verify"]
            }
            Endpoint::PendingEnrollments => vec!["api", "admin", "enrollments", "pending"],
            Endpoint::ApproveEnrollment(id) => {
                vec!["api", "admin", "enrollments", id.0.as_str(), "approve"]
            }
            Endpoint::RejectEnrollment(id) => {
                vec!["api", "admin", "enrollments", id.0.as_str(), "reject"]
            }
            Endpoint::GenerateReport => vec!["api", "reports", "reports"],
        }
    }

    /// Whether the call must carry the session's bearer token.
    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Endpoint::PendingRegistrations
                | Endpoint::RegistrationDetail(_)
                | Endpoint::VerifyRegistration(_)
                | Endpoint::GenerateReport
        )
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} /{}", self.method(), self.segments().join("/"))
    }
}
