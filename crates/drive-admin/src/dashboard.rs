//! Dashboard shell: navigation sections and the overview panel.

use std::fmt;
use std::str::FromStr;

use tracing::warn;

use crate::api::{AdminGateway, ApiError, RequestScope};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    Dashboard,
    Reports,
    Users,
    Notifications,
    ModLogs,
    RegisterTeacher,
    PendingEnrollments,
    DocumentVerification,
}

impl Section {
    pub const ALL: [Section; 8] = [
        Section::Dashboard,
        Section::Reports,
        Section::Users,
        Section::Notifications,
        Section::ModLogs,
        Section::RegisterTeacher,
        Section::PendingEnrollments,
        Section::DocumentVerification,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Section::Dashboard => "Dashboard",
            Section::Reports => "Reports",
            Section::Users => "Users",
            Section::Notifications => "Notifications",
            Section::ModLogs => "Mod Logs",
            Section::RegisterTeacher => "Register Teacher",
            Section::PendingEnrollments => "Pending Enrollments",
            Section::DocumentVerification => "Document Verification",
        }
    }

    /// Kebab-case name used on the command line.
    pub fn slug(self) -> &'static str {
        match self {
            Section::Dashboard => "dashboard",
            Section::Reports => "reports",
            Section::Users => "users",
            Section::Notifications => "notifications",
            Section::ModLogs => "mod-logs",
            Section::RegisterTeacher => "register-teacher",
            Section::PendingEnrollments => "pending-enrollments",
            Section::DocumentVerification => "document-verification",
        }
    }

    /// Console command that opens the screen behind a section, when it has one.
    pub fn command_hint(self) -> Option<&'static str> {
        match self {
            Section::Reports => Some("drive-admin report generate --type <TYPE>"),
            Section::RegisterTeacher => Some("drive-admin signup teacher"),
            Section::PendingEnrollments => Some("drive-admin enrollments list"),
            Section::DocumentVerification => Some("drive-admin registrations list"),
            Section::Dashboard | Section::Users | Section::Notifications | Section::ModLogs => None,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for Section {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim().to_ascii_lowercase().replace([' ', '_'], "-");
        Section::ALL
            .into_iter()
            .find(|section| section.slug() == wanted)
            .ok_or_else(|| format!("unknown section '{value}'"))
    }
}

/// A count shown on the overview panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tally {
    Count(usize),
    /// The count needs a session and none is active.
    SignInRequired,
    Unavailable(String),
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tally::Count(count) => write!(f, "{count}"),
            Tally::SignInRequired => f.write_str("sign in to view"),
            Tally::Unavailable(reason) => write!(f, "unavailable ({reason})"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overview {
    pub pending_enrollments: Tally,
    pub pending_registrations: Tally,
}

/// Fetch the overview counts. A failing count is reported on its own line and
/// never aborts the other one.
pub async fn load_overview<G: AdminGateway>(
    gateway: &G,
    scope: &RequestScope,
    signed_in: bool,
) -> Overview {
    let pending_enrollments = tally(
        "pending enrollments",
        scope.run(gateway.pending_enrollments()).await.map(|rows| rows.len()),
    );
    let pending_registrations = if signed_in {
        tally(
            "pending registrations",
            scope
                .run(gateway.pending_registrations())
                .await
                .map(|rows| rows.len()),
        )
    } else {
        Tally::SignInRequired
    };

    Overview {
        pending_enrollments,
        pending_registrations,
    }
}

fn tally(what: &str, result: Result<usize, ApiError>) -> Tally {
    match result {
        Ok(count) => Tally::Count(count),
        Err(err) => {
            warn!(count = what, error = %err, "overview count unavailable");
            Tally::Unavailable(err.to_string())
        }
    }
}
