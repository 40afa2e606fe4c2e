use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifier wrapper for pending enrollments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnrollmentId(pub String);

impl EnrollmentId {
    /// Shortened form shown in list rows.
    pub fn short(&self) -> String {
        shorten(&self.0)
    }
}

impl fmt::Display for EnrollmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for submitted registrations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegistrationId(pub String);

impl fmt::Display for RegistrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// First eight characters followed by an ellipsis when the value is longer.
pub fn shorten(value: &str) -> String {
    if value.chars().count() <= 8 {
        return value.to_string();
    }
    let head: String = value.chars().take(8).collect();
    format!("{head}...")
}

/// A student's request to join a course. The backend only lists pending ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: EnrollmentId,
    #[serde(default)]
    pub course_id: Option<String>,
    #[serde(default)]
    pub student_id: Option<String>,
    #[serde(default)]
    pub enrolled_at: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Enrollment {
    pub fn has_documents(&self) -> bool {
        self.student_id.is_some()
    }

    pub fn status_label(&self) -> &'static str {
        "Pending"
    }
}

/// Row of the pending registrations list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationSummary {
    pub registration_id: RegistrationId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub verification_status: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl RegistrationSummary {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Full registration record shown in the verification dialog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationDetail {
    pub id: RegistrationId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub age: Option<Value>,
    #[serde(default)]
    pub sex: Option<String>,
    #[serde(default)]
    pub verification_status: Option<String>,
    #[serde(default)]
    pub user_image_url: Option<String>,
    #[serde(default)]
    pub national_id_url: Option<String>,
    #[serde(default)]
    pub educational_certificate_url: Option<String>,
    #[serde(default)]
    pub medical_report_url: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl RegistrationDetail {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Labelled document links in dialog order; missing documents are skipped.
    pub fn documents(&self) -> Vec<(&'static str, &str)> {
        [
            ("User Photo", self.user_image_url.as_deref()),
            ("National ID", self.national_id_url.as_deref()),
            (
                "Educational Certificate",
                self.educational_certificate_url.as_deref(),
            ),
            ("Medical Report", self.medical_report_url.as_deref()),
        ]
        .into_iter()
        .filter_map(|(label, url)| url.map(|url| (label, url)))
        .collect()
    }

    pub fn age_label(&self) -> String {
        match &self.age {
            Some(Value::String(age)) => age.clone(),
            Some(Value::Null) | None => "-".to_string(),
            Some(other) => other.to_string(),
        }
    }
}

/// Outcome an admin records for a registration's documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationDecision {
    Approved,
    Rejected,
}

impl VerificationDecision {
    pub fn label(self) -> &'static str {
        match self {
            VerificationDecision::Approved => "approved",
            VerificationDecision::Rejected => "rejected",
        }
    }
}

impl FromStr for VerificationDecision {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "approved" | "approve" => Ok(Self::Approved),
            "rejected" | "reject" => Ok(Self::Rejected),
            other => Err(format!("unknown decision '{other}' (expected approved or rejected)")),
        }
    }
}

/// Body posted to the verify endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationVerdict {
    pub status: VerificationDecision,
    pub remark: String,
}

/// Admin account submitted at signup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminAccount {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Teacher account submitted at signup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherAccount {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Token handed out by the login endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginGrant {
    #[serde(alias = "accessToken")]
    pub token: String,
}

/// Whatever the signup endpoints answer; shown to the admin verbatim.
pub type SignupReceipt = Value;
