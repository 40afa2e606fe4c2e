use drive_admin::dashboard::{load_overview, Section};
use drive_admin::error::AppError;

use crate::cli::DashboardArgs;
use crate::infra::Console;

pub(crate) async fn show(console: &Console, args: DashboardArgs) -> Result<(), AppError> {
    let current = args.section;
    println!("Admin Dashboard");
    for section in Section::ALL {
        let marker = if section == current { ">" } else { " " };
        println!("  {marker} {:<24} {}", section.title(), section.slug());
    }
    println!();
    println!("{}", current.title());

    if current != Section::Dashboard {
        match current.command_hint() {
            Some(hint) => println!("  Run `{hint}`"),
            None => println!("  Nothing to show here yet."),
        }
        return Ok(());
    }

    let gateway = console.gateway()?;
    let overview = load_overview(
        gateway.as_ref(),
        &console.scope.child(),
        console.session.is_some(),
    )
    .await;
    println!("  Pending enrollments   : {}", overview.pending_enrollments);
    println!("  Pending registrations : {}", overview.pending_registrations);
    match &console.session {
        Some(session) => println!("  Signed in as {}", session.email()),
        None => println!("  Not signed in"),
    }
    Ok(())
}
