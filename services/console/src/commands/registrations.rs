use drive_admin::domain::{RegistrationDetail, RegistrationId};
use drive_admin::error::AppError;
use drive_admin::review::RegistrationQueue;

use super::{or_dash, queue_failure};
use crate::cli::{RegistrationListArgs, VerifyArgs};
use crate::infra::Console;

pub(crate) async fn list(console: &Console, args: RegistrationListArgs) -> Result<(), AppError> {
    let mut queue = RegistrationQueue::new(console.gateway()?, console.scope.child());
    if let Err(err) = queue.refresh().await {
        return Err(queue_failure(queue.notice(), err));
    }
    queue.set_filter(args.status);
    queue.set_search(args.search.unwrap_or_default());

    let visible = queue.visible();
    println!(
        "Document verification ({} of {}, status: {})",
        visible.len(),
        queue.rows().len(),
        queue.filter().label()
    );
    if visible.is_empty() {
        println!("  No registrations match.");
        return Ok(());
    }

    println!("  {:<38} {:<28} {:<32} {}", "ID", "Name", "Email", "Status");
    for row in visible {
        println!(
            "  {:<38} {:<28} {:<32} {}",
            row.registration_id,
            row.full_name(),
            row.email,
            or_dash(row.verification_status.as_deref())
        );
    }
    Ok(())
}

pub(crate) async fn show(console: &Console, id: String) -> Result<(), AppError> {
    let mut queue = RegistrationQueue::new(console.gateway()?, console.scope.child());
    match queue.open(&RegistrationId(id)).await {
        Ok(dialog) => {
            render_detail(&dialog.record);
            Ok(())
        }
        Err(err) => Err(queue_failure(queue.notice(), err)),
    }
}

pub(crate) async fn verify(console: &Console, args: VerifyArgs) -> Result<(), AppError> {
    let VerifyArgs {
        id,
        decision,
        remark,
    } = args;
    let id = RegistrationId(id);

    let mut queue = RegistrationQueue::new(console.gateway()?, console.scope.child());
    if let Err(err) = queue.open(&id).await {
        return Err(queue_failure(queue.notice(), err));
    }
    queue.set_remark(remark)?;
    if let Err(err) = queue.verify(decision).await {
        return Err(queue_failure(queue.notice(), err));
    }

    println!("Registration {id} marked {}.", decision.label());
    println!("{} registrations awaiting verification.", queue.rows().len());
    Ok(())
}

fn render_detail(record: &RegistrationDetail) {
    println!("Verify Documents: {}", record.full_name());
    println!("  ID           : {}", record.id);
    println!("  Email        : {}", record.email);
    println!("  Age          : {}", record.age_label());
    println!("  Sex          : {}", or_dash(record.sex.as_deref()));
    println!(
        "  Status       : {}",
        or_dash(record.verification_status.as_deref())
    );

    let documents = record.documents();
    if documents.is_empty() {
        println!("  No documents uploaded.");
        return;
    }
    println!("  Documents");
    for (label, url) in documents {
        println!("    {label:<24} {url}");
    }
}
