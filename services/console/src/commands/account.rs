use drive_admin::forms::{AdminSignupForm, LoginForm, TeacherSignupForm};
use drive_admin::error::AppError;
use drive_admin::validation::FormField;
use tracing::info;

use super::finish_form;
use crate::cli::{AdminSignupArgs, LoginArgs, TeacherSignupArgs};
use crate::infra::{password_or_prompt, Console};

pub(crate) async fn login(console: &Console, args: LoginArgs) -> Result<(), AppError> {
    let password = password_or_prompt(args.password)?;
    let gateway = console.gateway()?;

    let mut form = LoginForm::default();
    let controller = form.controller_mut();
    controller.set_value(FormField::Email, args.email);
    controller.set_value(FormField::Password, password);
    let outcome = form.submit(gateway.as_ref(), &console.scope).await;
    let session = finish_form(form.controller(), outcome)?;

    console.store.save(&session)?;
    info!(email = session.email(), "signed in");
    println!("Signed in as {}", session.email());
    Ok(())
}

pub(crate) fn logout(console: &Console) -> Result<(), AppError> {
    if console.store.clear()? {
        println!("Signed out.");
    } else {
        println!("No active session.");
    }
    Ok(())
}

pub(crate) fn whoami(console: &Console) -> Result<(), AppError> {
    match &console.session {
        Some(session) => println!(
            "Signed in as {} since {}",
            session.email(),
            session
                .signed_in_at()
                .with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M")
        ),
        None => println!("Not signed in. Run `drive-admin login --email <EMAIL>`."),
    }
    Ok(())
}

pub(crate) async fn signup_admin(console: &Console, args: AdminSignupArgs) -> Result<(), AppError> {
    let password = password_or_prompt(args.password)?;
    let gateway = console.gateway()?;

    let mut form = AdminSignupForm::default();
    let controller = form.controller_mut();
    controller.set_value(FormField::FirstName, args.first_name);
    controller.set_value(FormField::LastName, args.last_name);
    controller.set_value(FormField::Email, args.email);
    controller.set_value(FormField::Password, password);
    let outcome = form.submit(gateway.as_ref(), &console.scope).await;
    let receipt = finish_form(form.controller(), outcome)?;

    print_receipt(&receipt);
    Ok(())
}

pub(crate) async fn signup_teacher(
    console: &Console,
    args: TeacherSignupArgs,
) -> Result<(), AppError> {
    let password = password_or_prompt(args.password)?;
    let gateway = console.gateway()?;

    let mut form = TeacherSignupForm::default();
    let controller = form.controller_mut();
    controller.set_value(FormField::FirstName, args.first_name);
    controller.set_value(FormField::LastName, args.last_name);
    controller.set_value(FormField::Email, args.email);
    controller.set_value(FormField::PhoneNumber, args.phone);
    controller.set_value(FormField::Password, password);
    let outcome = form.submit(gateway.as_ref(), &console.scope).await;
    let receipt = finish_form(form.controller(), outcome)?;

    print_receipt(&receipt);
    Ok(())
}

fn print_receipt(receipt: &serde_json::Value) {
    match receipt {
        serde_json::Value::Null => {}
        serde_json::Value::String(text) => println!("{text}"),
        other => {
            if let Ok(pretty) = serde_json::to_string_pretty(other) {
                println!("{pretty}");
            }
        }
    }
}
