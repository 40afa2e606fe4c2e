use std::str::FromStr;

use crate::domain::{Enrollment, RegistrationSummary};

/// Enrollment filter on whether the student has submitted documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentFilter {
    #[default]
    All,
    WithDocuments,
    WithoutDocuments,
}

impl DocumentFilter {
    pub fn label(self) -> &'static str {
        match self {
            DocumentFilter::All => "All",
            DocumentFilter::WithDocuments => "With Documents",
            DocumentFilter::WithoutDocuments => "Without Documents",
        }
    }

    pub fn matches(self, enrollment: &Enrollment) -> bool {
        match self {
            DocumentFilter::All => true,
            DocumentFilter::WithDocuments => enrollment.has_documents(),
            DocumentFilter::WithoutDocuments => !enrollment.has_documents(),
        }
    }
}

impl FromStr for DocumentFilter {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "with-docs" | "with-documents" | "withdocs" => Ok(Self::WithDocuments),
            "without-docs" | "without-documents" | "withoutdocs" => Ok(Self::WithoutDocuments),
            other => Err(format!(
                "unknown document filter '{other}' (expected all, with-docs or without-docs)"
            )),
        }
    }
}

/// Registration filter on the verification status the backend reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    Any,
    Pending,
    Approved,
    Rejected,
}

impl StatusFilter {
    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::Any => "Any",
            StatusFilter::Pending => "Pending",
            StatusFilter::Approved => "Approved",
            StatusFilter::Rejected => "Rejected",
        }
    }

    /// Rows without a status count as pending.
    pub fn matches(self, status: Option<&str>) -> bool {
        let status = status
            .map(|raw| raw.trim().to_ascii_lowercase())
            .filter(|raw| !raw.is_empty())
            .unwrap_or_else(|| "pending".to_string());
        match self {
            StatusFilter::Any => true,
            StatusFilter::Pending => status == "pending",
            StatusFilter::Approved => status == "approved",
            StatusFilter::Rejected => status == "rejected",
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "any" | "all" => Ok(Self::Any),
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(format!(
                "unknown status '{other}' (expected any, pending, approved or rejected)"
            )),
        }
    }
}

/// Case-insensitive substring match over any of `haystacks`; an empty needle
/// matches everything.
pub(crate) fn search_matches<'a>(
    needle: &str,
    haystacks: impl IntoIterator<Item = Option<&'a str>>,
) -> bool {
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    haystacks
        .into_iter()
        .flatten()
        .any(|haystack| haystack.to_lowercase().contains(&needle))
}

pub(crate) fn enrollment_matches(
    enrollment: &Enrollment,
    filter: DocumentFilter,
    search: &str,
) -> bool {
    filter.matches(enrollment)
        && search_matches(
            search,
            [
                enrollment.course_id.as_deref(),
                enrollment.enrolled_at.as_deref(),
            ],
        )
}

pub(crate) fn registration_matches(
    row: &RegistrationSummary,
    filter: StatusFilter,
    search: &str,
) -> bool {
    let name = row.full_name();
    filter.matches(row.verification_status.as_deref())
        && search_matches(search, [Some(name.as_str()), Some(row.email.as_str())])
}
