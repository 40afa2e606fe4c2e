pub(crate) mod account;
pub(crate) mod dashboard;
pub(crate) mod enrollments;
pub(crate) mod registrations;
pub(crate) mod reports;

use drive_admin::error::AppError;
use drive_admin::forms::{FormController, SubmitOutcome};
use drive_admin::review::QueueError;

/// Print the outcome of a form submission the way the screen would show it.
pub(crate) fn finish_form<T>(
    controller: &FormController,
    outcome: SubmitOutcome<T>,
) -> Result<T, AppError> {
    match outcome {
        SubmitOutcome::Succeeded(value) => {
            if let Some(message) = controller.success_message() {
                println!("{message}");
            }
            Ok(value)
        }
        SubmitOutcome::Invalid => {
            for (field, message) in controller.errors() {
                println!("  {:<14} {}", field.label(), message);
            }
            Err(AppError::Rejected("please fix the fields above".to_string()))
        }
        SubmitOutcome::Busy => Err(AppError::Rejected(
            "a submission is already in flight".to_string(),
        )),
        SubmitOutcome::Failed(err) => Err(AppError::Rejected(
            controller
                .error_message()
                .map(str::to_string)
                .unwrap_or_else(|| err.to_string()),
        )),
    }
}

/// Turn a queue failure into the banner text the screen showed.
pub(crate) fn queue_failure(notice: Option<&str>, err: QueueError) -> AppError {
    match notice {
        Some(notice) => AppError::Rejected(notice.to_string()),
        None => AppError::Queue(err),
    }
}

pub(crate) fn or_dash(value: Option<&str>) -> &str {
    value.filter(|value| !value.is_empty()).unwrap_or("-")
}
