use chrono::NaiveDate;
use serde::{Serialize, Serializer};

use super::catalog::{FilterField, ReportFormat, ReportKind};
use super::ReportError;

/// Every filter input the panel can show. Only the fields of the selected report
/// type ever reach the payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterDraft {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub verification_status: String,
    pub course_id: String,
    pub status: String,
    pub verified: String,
    pub teacher_id: String,
}

impl FilterDraft {
    /// Set one field from user input. Dates use `YYYY-MM-DD`; an empty value
    /// clears the field.
    pub fn set(&mut self, field: FilterField, value: &str) -> Result<(), ReportError> {
        let value = value.trim();
        if !field.accepts(value) {
            return Err(invalid(field, value));
        }

        match field {
            FilterField::StartDate => self.start_date = parse_date(field, value)?,
            FilterField::EndDate => self.end_date = parse_date(field, value)?,
            FilterField::VerificationStatus => self.verification_status = value.to_string(),
            FilterField::CourseId => self.course_id = value.to_string(),
            FilterField::Status => self.status = value.to_string(),
            FilterField::Verified => self.verified = value.to_string(),
            FilterField::TeacherId => self.teacher_id = value.to_string(),
        }
        Ok(())
    }
}

fn parse_date(field: FilterField, value: &str) -> Result<Option<NaiveDate>, ReportError> {
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| invalid(field, value))
}

fn invalid(field: FilterField, value: &str) -> ReportError {
    ReportError::InvalidFilter {
        field: field.label(),
        value: value.to_string(),
    }
}

/// Filters of one report type, exactly as they are posted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ReportRequest {
    #[serde(rename_all = "camelCase")]
    UserRegistrations {
        #[serde(serialize_with = "midnight_utc", skip_serializing_if = "Option::is_none")]
        start_date: Option<NaiveDate>,
        #[serde(serialize_with = "midnight_utc", skip_serializing_if = "Option::is_none")]
        end_date: Option<NaiveDate>,
        verification_status: String,
    },
    #[serde(rename_all = "camelCase")]
    CourseEnrollments { course_id: String, status: String },
    #[serde(rename_all = "camelCase")]
    PaymentStatus {
        #[serde(serialize_with = "midnight_utc", skip_serializing_if = "Option::is_none")]
        start_date: Option<NaiveDate>,
        #[serde(serialize_with = "midnight_utc", skip_serializing_if = "Option::is_none")]
        end_date: Option<NaiveDate>,
        verified: bool,
    },
    DocumentVerification { status: String },
    #[serde(rename_all = "camelCase")]
    TeacherAssignments { teacher_id: String },
}

impl ReportRequest {
    /// Project the draft onto the fields `kind` uses; everything else is dropped.
    pub fn from_draft(kind: ReportKind, draft: &FilterDraft) -> Self {
        match kind {
            ReportKind::UserRegistrations => ReportRequest::UserRegistrations {
                start_date: draft.start_date,
                end_date: draft.end_date,
                verification_status: draft.verification_status.clone(),
            },
            ReportKind::CourseEnrollments => ReportRequest::CourseEnrollments {
                course_id: draft.course_id.clone(),
                status: draft.status.clone(),
            },
            ReportKind::PaymentStatus => ReportRequest::PaymentStatus {
                start_date: draft.start_date,
                end_date: draft.end_date,
                verified: draft.verified == "true",
            },
            ReportKind::DocumentVerification => ReportRequest::DocumentVerification {
                status: draft.status.clone(),
            },
            ReportKind::TeacherAssignments => ReportRequest::TeacherAssignments {
                teacher_id: draft.teacher_id.clone(),
            },
        }
    }

    pub fn kind(&self) -> ReportKind {
        match self {
            ReportRequest::UserRegistrations { .. } => ReportKind::UserRegistrations,
            ReportRequest::CourseEnrollments { .. } => ReportKind::CourseEnrollments,
            ReportRequest::PaymentStatus { .. } => ReportKind::PaymentStatus,
            ReportRequest::DocumentVerification { .. } => ReportKind::DocumentVerification,
            ReportRequest::TeacherAssignments { .. } => ReportKind::TeacherAssignments,
        }
    }

    pub fn into_payload(self, format: ReportFormat) -> ReportPayload {
        ReportPayload {
            format,
            report_type: self.kind(),
            filters: self,
        }
    }
}

fn midnight_utc<S: Serializer>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error> {
    match date {
        Some(date) => serializer.collect_str(&date.format("%Y-%m-%dT00:00:00.000Z")),
        None => serializer.serialize_none(),
    }
}

/// Body of `POST /api/reports/reports`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPayload {
    pub format: ReportFormat,
    pub report_type: ReportKind,
    pub filters: ReportRequest,
}
