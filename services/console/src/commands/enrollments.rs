use drive_admin::domain::{shorten, Enrollment, EnrollmentId};
use drive_admin::error::AppError;
use drive_admin::review::EnrollmentQueue;

use super::{or_dash, queue_failure};
use crate::cli::EnrollmentListArgs;
use crate::infra::Console;

pub(crate) async fn list(console: &Console, args: EnrollmentListArgs) -> Result<(), AppError> {
    let mut queue = EnrollmentQueue::new(console.gateway()?, console.scope.child());
    if let Err(err) = queue.refresh().await {
        return Err(queue_failure(queue.notice(), err));
    }
    queue.set_filter(args.filter);
    queue.set_search(args.search.unwrap_or_default());

    let visible = queue.visible();
    println!(
        "Pending enrollments ({} of {}, filter: {})",
        visible.len(),
        queue.enrollments().len(),
        queue.filter().label()
    );
    if visible.is_empty() {
        println!("  No pending enrollments match.");
        return Ok(());
    }

    println!(
        "  {:<12} {:<12} {:<24} {:<10} {}",
        "ID", "Course", "Enrolled", "Documents", "Status"
    );
    for enrollment in visible {
        println!(
            "  {:<12} {:<12} {:<24} {:<10} {}",
            enrollment.id.short(),
            shorten(or_dash(enrollment.course_id.as_deref())),
            or_dash(enrollment.enrolled_at.as_deref()),
            if enrollment.has_documents() { "yes" } else { "no" },
            enrollment.status_label()
        );
    }
    Ok(())
}

pub(crate) async fn show(console: &Console, id: String) -> Result<(), AppError> {
    let mut queue = EnrollmentQueue::new(console.gateway()?, console.scope.child());
    if let Err(err) = queue.refresh().await {
        return Err(queue_failure(queue.notice(), err));
    }
    let enrollment = queue.select(&EnrollmentId(id))?;
    render_detail(enrollment);
    Ok(())
}

pub(crate) async fn approve(console: &Console, id: String) -> Result<(), AppError> {
    let id = EnrollmentId(id);
    let mut queue = EnrollmentQueue::new(console.gateway()?, console.scope.child());
    if let Err(err) = queue.approve(&id).await {
        return Err(queue_failure(queue.notice(), err));
    }
    println!("Enrollment {id} approved.");
    println!("{} enrollments still pending.", queue.enrollments().len());
    Ok(())
}

pub(crate) async fn reject(console: &Console, id: String) -> Result<(), AppError> {
    let id = EnrollmentId(id);
    let mut queue = EnrollmentQueue::new(console.gateway()?, console.scope.child());
    if let Err(err) = queue.reject(&id).await {
        return Err(queue_failure(queue.notice(), err));
    }
    println!("Enrollment {id} rejected.");
    println!("{} enrollments still pending.", queue.enrollments().len());
    Ok(())
}

fn render_detail(enrollment: &Enrollment) {
    println!("Enrollment Details");
    println!("  Enrollment ID : {}", enrollment.id);
    println!("  Course ID     : {}", or_dash(enrollment.course_id.as_deref()));
    println!("  Student ID    : {}", or_dash(enrollment.student_id.as_deref()));
    println!("  Enrolled at   : {}", or_dash(enrollment.enrolled_at.as_deref()));
    println!("  Status        : {}", enrollment.status_label());
    for (key, value) in &enrollment.extra {
        println!("  {key:<14}: {value}");
    }
}
