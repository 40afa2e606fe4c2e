use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Report types the backend can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportKind {
    UserRegistrations,
    CourseEnrollments,
    PaymentStatus,
    DocumentVerification,
    TeacherAssignments,
}

impl ReportKind {
    pub const ALL: [ReportKind; 5] = [
        ReportKind::UserRegistrations,
        ReportKind::CourseEnrollments,
        ReportKind::PaymentStatus,
        ReportKind::DocumentVerification,
        ReportKind::TeacherAssignments,
    ];

    /// Wire value sent as `reportType`.
    pub fn value(self) -> &'static str {
        match self {
            ReportKind::UserRegistrations => "user-registrations",
            ReportKind::CourseEnrollments => "course-enrollments",
            ReportKind::PaymentStatus => "payment-status",
            ReportKind::DocumentVerification => "document-verification",
            ReportKind::TeacherAssignments => "teacher-assignments",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReportKind::UserRegistrations => "User Registrations",
            ReportKind::CourseEnrollments => "Course Enrollments",
            ReportKind::PaymentStatus => "Payment Status",
            ReportKind::DocumentVerification => "Document Verification",
            ReportKind::TeacherAssignments => "Teacher Assignments",
        }
    }

    /// Filter inputs shown once this type is selected, in display order.
    pub fn filters(self) -> &'static [FilterField] {
        match self {
            ReportKind::UserRegistrations => &[
                FilterField::StartDate,
                FilterField::EndDate,
                FilterField::VerificationStatus,
            ],
            ReportKind::CourseEnrollments => &[FilterField::CourseId, FilterField::Status],
            ReportKind::PaymentStatus => &[
                FilterField::StartDate,
                FilterField::EndDate,
                FilterField::Verified,
            ],
            ReportKind::DocumentVerification => &[FilterField::Status],
            ReportKind::TeacherAssignments => &[FilterField::TeacherId],
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

impl FromStr for ReportKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim().to_ascii_lowercase();
        ReportKind::ALL
            .into_iter()
            .find(|kind| kind.value() == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = ReportKind::ALL.iter().map(|kind| kind.value()).collect();
                format!("unknown report type '{wanted}' (expected one of {})", known.join(", "))
            })
    }
}

/// One entry of a select-style filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterOption {
    pub value: &'static str,
    pub label: &'static str,
}

const VERIFICATION_STATUS_OPTIONS: &[FilterOption] = &[
    FilterOption { value: "pending", label: "Pending" },
    FilterOption { value: "approved", label: "Approved" },
    FilterOption { value: "rejected", label: "Rejected" },
];

const STATUS_OPTIONS: &[FilterOption] = &[
    FilterOption { value: "approved", label: "Accepted" },
    FilterOption { value: "pending", label: "Pending" },
    FilterOption { value: "rejected", label: "Rejected" },
];

const VERIFIED_OPTIONS: &[FilterOption] = &[
    FilterOption { value: "true", label: "Verified" },
    FilterOption { value: "false", label: "Unverified" },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    StartDate,
    EndDate,
    VerificationStatus,
    CourseId,
    Status,
    Verified,
    TeacherId,
}

impl FilterField {
    pub fn label(self) -> &'static str {
        match self {
            FilterField::StartDate => "Start Date",
            FilterField::EndDate => "End Date",
            FilterField::VerificationStatus => "Verification Status",
            FilterField::CourseId => "Course ID",
            FilterField::Status => "Status",
            FilterField::Verified => "Payment Verified",
            FilterField::TeacherId => "Teacher ID",
        }
    }

    /// Fixed choices for select inputs; empty for free text and dates.
    pub fn options(self) -> &'static [FilterOption] {
        match self {
            FilterField::VerificationStatus => VERIFICATION_STATUS_OPTIONS,
            FilterField::Status => STATUS_OPTIONS,
            FilterField::Verified => VERIFIED_OPTIONS,
            FilterField::StartDate
            | FilterField::EndDate
            | FilterField::CourseId
            | FilterField::TeacherId => &[],
        }
    }

    pub fn accepts(self, value: &str) -> bool {
        let options = self.options();
        options.is_empty() || value.is_empty() || options.iter().any(|option| option.value == value)
    }
}

/// Output format of a generated report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Pdf,
    Excel,
    Docx,
}

impl ReportFormat {
    pub const ALL: [ReportFormat; 3] = [ReportFormat::Pdf, ReportFormat::Excel, ReportFormat::Docx];

    pub fn value(self) -> &'static str {
        match self {
            ReportFormat::Pdf => "pdf",
            ReportFormat::Excel => "excel",
            ReportFormat::Docx => "docx",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReportFormat::Pdf => "PDF",
            ReportFormat::Excel => "Excel",
            ReportFormat::Docx => "Word",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ReportFormat::Pdf => "pdf",
            ReportFormat::Excel => "xlsx",
            ReportFormat::Docx => "docx",
        }
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pdf" => Ok(Self::Pdf),
            "excel" | "xlsx" => Ok(Self::Excel),
            "docx" | "word" => Ok(Self::Docx),
            other => Err(format!("unknown format '{other}' (expected pdf, excel or docx)")),
        }
    }
}
