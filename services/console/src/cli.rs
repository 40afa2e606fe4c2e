use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use drive_admin::dashboard::Section;
use drive_admin::domain::VerificationDecision;
use drive_admin::error::AppError;
use drive_admin::reports::{ReportFormat, ReportKind};
use drive_admin::review::{DocumentFilter, StatusFilter};

use crate::commands::{account, dashboard, enrollments, registrations, reports};
use crate::infra::Console;

#[derive(Parser, Debug)]
#[command(
    name = "drive-admin",
    about = "Administer the driving school: sign-ups, enrollments, document checks and reports",
    version
)]
struct Cli {
    /// Override the backend base URL (defaults to ADMIN_API_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and store the session for later commands
    Login(LoginArgs),
    /// Forget the stored session
    Logout,
    /// Show who is signed in
    Whoami,
    /// Register a new admin or teacher account
    Signup {
        #[command(subcommand)]
        command: SignupCommand,
    },
    /// Review pending course enrollments
    Enrollments {
        #[command(subcommand)]
        command: EnrollmentCommand,
    },
    /// Verify submitted registration documents
    Registrations {
        #[command(subcommand)]
        command: RegistrationCommand,
    },
    /// Generate and download reports
    Report {
        #[command(subcommand)]
        command: ReportCommand,
    },
    /// Show the dashboard navigation and overview
    Dashboard(DashboardArgs),
}

#[derive(Args, Debug)]
pub(crate) struct LoginArgs {
    #[arg(long)]
    pub(crate) email: String,
    /// Prompted for when omitted
    #[arg(long)]
    pub(crate) password: Option<String>,
}

#[derive(Subcommand, Debug)]
enum SignupCommand {
    /// Register an admin account
    Admin(AdminSignupArgs),
    /// Register a teacher account
    Teacher(TeacherSignupArgs),
}

#[derive(Args, Debug)]
pub(crate) struct AdminSignupArgs {
    #[arg(long)]
    pub(crate) first_name: String,
    #[arg(long)]
    pub(crate) last_name: String,
    #[arg(long)]
    pub(crate) email: String,
    /// Prompted for when omitted
    #[arg(long)]
    pub(crate) password: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct TeacherSignupArgs {
    #[arg(long)]
    pub(crate) first_name: String,
    #[arg(long)]
    pub(crate) last_name: String,
    #[arg(long)]
    pub(crate) email: String,
    #[arg(long)]
    pub(crate) phone: String,
    /// Prompted for when omitted
    #[arg(long)]
    pub(crate) password: Option<String>,
}

#[derive(Subcommand, Debug)]
enum EnrollmentCommand {
    /// List pending enrollments
    List(EnrollmentListArgs),
    /// Show one pending enrollment
    Show { id: String },
    /// Approve a pending enrollment
    Approve { id: String },
    /// Reject a pending enrollment
    Reject { id: String },
}

#[derive(Args, Debug)]
pub(crate) struct EnrollmentListArgs {
    /// all, with-docs or without-docs
    #[arg(long, default_value = "all")]
    pub(crate) filter: DocumentFilter,
    /// Match course id or enrollment date
    #[arg(long)]
    pub(crate) search: Option<String>,
}

#[derive(Subcommand, Debug)]
enum RegistrationCommand {
    /// List registrations awaiting verification
    List(RegistrationListArgs),
    /// Show a registration with its document links
    Show { id: String },
    /// Record a verification decision
    Verify(VerifyArgs),
}

#[derive(Args, Debug)]
pub(crate) struct RegistrationListArgs {
    /// any, pending, approved or rejected
    #[arg(long, default_value = "any")]
    pub(crate) status: StatusFilter,
    /// Match name or email
    #[arg(long)]
    pub(crate) search: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct VerifyArgs {
    pub(crate) id: String,
    /// approved or rejected
    #[arg(long)]
    pub(crate) decision: VerificationDecision,
    #[arg(long, default_value = "")]
    pub(crate) remark: String,
}

#[derive(Subcommand, Debug)]
enum ReportCommand {
    /// List report types, their filters and the output formats
    Types,
    /// Generate a report and save it to disk
    Generate(ReportGenerateArgs),
}

#[derive(Args, Debug)]
pub(crate) struct ReportGenerateArgs {
    #[arg(long = "type")]
    pub(crate) kind: ReportKind,
    /// pdf, excel or docx
    #[arg(long, default_value = "pdf")]
    pub(crate) format: ReportFormat,
    /// YYYY-MM-DD
    #[arg(long)]
    pub(crate) start_date: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    pub(crate) end_date: Option<String>,
    #[arg(long)]
    pub(crate) verification_status: Option<String>,
    #[arg(long)]
    pub(crate) course_id: Option<String>,
    #[arg(long)]
    pub(crate) status: Option<String>,
    /// true or false
    #[arg(long)]
    pub(crate) verified: Option<String>,
    #[arg(long)]
    pub(crate) teacher_id: Option<String>,
    /// Directory the report is saved in (defaults to ADMIN_DOWNLOAD_DIR)
    #[arg(long)]
    pub(crate) output_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct DashboardArgs {
    /// Section to open, e.g. pending-enrollments
    #[arg(long, default_value = "dashboard")]
    pub(crate) section: Section,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let console = Console::load(cli.base_url)?;

    match cli.command {
        Command::Login(args) => account::login(&console, args).await,
        Command::Logout => account::logout(&console),
        Command::Whoami => account::whoami(&console),
        Command::Signup {
            command: SignupCommand::Admin(args),
        } => account::signup_admin(&console, args).await,
        Command::Signup {
            command: SignupCommand::Teacher(args),
        } => account::signup_teacher(&console, args).await,
        Command::Enrollments { command } => match command {
            EnrollmentCommand::List(args) => enrollments::list(&console, args).await,
            EnrollmentCommand::Show { id } => enrollments::show(&console, id).await,
            EnrollmentCommand::Approve { id } => enrollments::approve(&console, id).await,
            EnrollmentCommand::Reject { id } => enrollments::reject(&console, id).await,
        },
        Command::Registrations { command } => match command {
            RegistrationCommand::List(args) => registrations::list(&console, args).await,
            RegistrationCommand::Show { id } => registrations::show(&console, id).await,
            RegistrationCommand::Verify(args) => registrations::verify(&console, args).await,
        },
        Command::Report { command } => match command {
            ReportCommand::Types => {
                reports::types();
                Ok(())
            }
            ReportCommand::Generate(args) => reports::generate(&console, args).await,
        },
        Command::Dashboard(args) => dashboard::show(&console, args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("drive-admin").chain(args.iter().copied()))
            .expect("arguments parse")
    }

    #[test]
    fn command_tree_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_report_generation_filters() {
        let cli = parse(&[
            "report",
            "generate",
            "--type",
            "course-enrollments",
            "--format",
            "excel",
            "--verified",
            "true",
            "--start-date",
            "2025-04-01",
        ]);

        let args = match cli.command {
            Command::Report { command: ReportCommand::Generate(args) } => args,
            other => panic!("expected report generate, got {other:?}"),
        };
        assert_eq!(args.kind, ReportKind::CourseEnrollments);
        assert_eq!(args.format, ReportFormat::Excel);
        assert_eq!(args.verified.as_deref(), Some("true"));
        assert_eq!(args.start_date.as_deref(), Some("2025-04-01"));
        assert_eq!(args.output_dir, None);
    }

    #[test]
    fn parses_registration_verdicts() {
        let cli = parse(&[
            "registrations",
            "verify",
            "reg-7",
            "--decision",
            "approved",
            "--remark",
            "All documents clear",
        ]);

        let args = match cli.command {
            Command::Registrations { command: RegistrationCommand::Verify(args) } => args,
            other => panic!("expected registrations verify, got {other:?}"),
        };
        assert_eq!(args.id, "reg-7");
        assert_eq!(args.decision, VerificationDecision::Approved);
        assert_eq!(args.remark, "All documents clear");
    }

    #[test]
    fn base_url_is_accepted_after_the_subcommand() {
        let cli = parse(&[
            "enrollments",
            "list",
            "--filter",
            "with-docs",
            "--base-url",
            "http://localhost:8080",
        ]);

        assert_eq!(cli.base_url.as_deref(), Some("http://localhost:8080"));
        let args = match cli.command {
            Command::Enrollments { command: EnrollmentCommand::List(args) } => args,
            other => panic!("expected enrollments list, got {other:?}"),
        };
        assert_eq!(args.filter, DocumentFilter::WithDocuments);
        assert_eq!(args.search, None);
    }

    #[test]
    fn rejects_unknown_values() {
        assert!(Cli::try_parse_from(["drive-admin", "report", "generate", "--type", "payroll"]).is_err());
        assert!(Cli::try_parse_from([
            "drive-admin",
            "registrations",
            "verify",
            "reg-7",
            "--decision",
            "maybe"
        ])
        .is_err());
        assert!(Cli::try_parse_from(["drive-admin", "dashboard", "--section", "settings"]).is_err());
    }

    #[test]
    fn dashboard_defaults_to_the_overview() {
        let cli = parse(&["dashboard"]);
        let args = match cli.command {
            Command::Dashboard(args) => args,
            other => panic!("expected dashboard, got {other:?}"),
        };
        assert_eq!(args.section, Section::Dashboard);
        assert_eq!(cli.base_url, None);
    }
}
