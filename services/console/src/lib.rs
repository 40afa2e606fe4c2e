mod cli;
mod commands;
mod infra;

use drive_admin::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
