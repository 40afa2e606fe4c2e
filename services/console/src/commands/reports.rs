use drive_admin::error::AppError;
use drive_admin::reports::{FilterField, ReportBuilder, ReportFormat, ReportKind};

use crate::cli::ReportGenerateArgs;
use crate::infra::Console;

pub(crate) fn types() {
    println!("Report types");
    for kind in ReportKind::ALL {
        println!("  {:<24} {}", kind.value(), kind.label());
        for field in kind.filters() {
            let options: Vec<String> = field
                .options()
                .iter()
                .map(|option| format!("{} ({})", option.value, option.label))
                .collect();
            if options.is_empty() {
                println!("      --{:<22} {}", flag(*field), field.label());
            } else {
                println!(
                    "      --{:<22} {}: {}",
                    flag(*field),
                    field.label(),
                    options.join(", ")
                );
            }
        }
    }

    println!("Formats");
    for format in ReportFormat::ALL {
        println!(
            "  {:<24} {} (.{})",
            format.value(),
            format.label(),
            format.extension()
        );
    }
}

pub(crate) async fn generate(console: &Console, args: ReportGenerateArgs) -> Result<(), AppError> {
    let download_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| console.config.storage.download_dir.clone());
    let mut builder = ReportBuilder::new(console.gateway()?, console.scope.child(), download_dir);
    builder.select(args.kind)?;
    builder.set_format(args.format);

    let supplied = [
        (FilterField::StartDate, args.start_date),
        (FilterField::EndDate, args.end_date),
        (FilterField::VerificationStatus, args.verification_status),
        (FilterField::CourseId, args.course_id),
        (FilterField::Status, args.status),
        (FilterField::Verified, args.verified),
        (FilterField::TeacherId, args.teacher_id),
    ];
    for (field, value) in supplied {
        if let Some(value) = value {
            builder.set_filter(field, &value)?;
        }
    }

    println!(
        "Generating {} report as {}...",
        args.kind.label(),
        args.format.label()
    );
    match builder.generate().await {
        Ok(saved) => {
            println!(
                "Saved {} ({} bytes, {})",
                saved.path.display(),
                saved.size,
                saved.content_type
            );
            Ok(())
        }
        Err(err) => Err(AppError::Rejected(err.user_message())),
    }
}

fn flag(field: FilterField) -> &'static str {
    match field {
        FilterField::StartDate => "start-date",
        FilterField::EndDate => "end-date",
        FilterField::VerificationStatus => "verification-status",
        FilterField::CourseId => "course-id",
        FilterField::Status => "status",
        FilterField::Verified => "verified",
        FilterField::TeacherId => "teacher-id",
    }
}
