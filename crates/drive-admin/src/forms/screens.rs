use chrono::Utc;

use crate::api::{AdminGateway, RequestScope};
use crate::domain::{AdminAccount, Credentials, SignupReceipt, TeacherAccount};
use crate::session::{AuthToken, Session};
use crate::validation::{validate_field, validate_presence, FormField};

use super::controller::{FormController, FormSchema, SubmitOutcome};

pub static ADMIN_SIGNUP: FormSchema = FormSchema {
    name: "admin_signup",
    fields: &[
        FormField::FirstName,
        FormField::LastName,
        FormField::Email,
        FormField::Password,
    ],
    validator: validate_field,
    success_message: "Admin registered successfully!",
    fallback_error: "Signup failed. Please try again.",
};

pub static TEACHER_SIGNUP: FormSchema = FormSchema {
    name: "teacher_signup",
    fields: &[
        FormField::FirstName,
        FormField::LastName,
        FormField::Email,
        FormField::PhoneNumber,
        FormField::Password,
    ],
    validator: validate_field,
    success_message: "Teacher registered successfully!",
    fallback_error: "Registration failed.",
};

pub static LOGIN: FormSchema = FormSchema {
    name: "login",
    fields: &[FormField::Email, FormField::Password],
    validator: validate_presence,
    success_message: "Signed in.",
    fallback_error: "Login failed. Check your credentials.",
};

/// Admin registration screen.
#[derive(Debug)]
pub struct AdminSignupForm {
    controller: FormController,
}

impl Default for AdminSignupForm {
    fn default() -> Self {
        Self {
            controller: FormController::new(&ADMIN_SIGNUP),
        }
    }
}

impl AdminSignupForm {
    pub fn controller(&self) -> &FormController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut FormController {
        &mut self.controller
    }

    pub async fn submit<G: AdminGateway>(
        &mut self,
        gateway: &G,
        scope: &RequestScope,
    ) -> SubmitOutcome<SignupReceipt> {
        self.controller
            .submit(move |values| async move {
                let account = AdminAccount {
                    first_name: values.owned(FormField::FirstName),
                    last_name: values.owned(FormField::LastName),
                    email: values.owned(FormField::Email),
                    password: values.owned(FormField::Password),
                };
                scope.run(gateway.admin_signup(&account)).await
            })
            .await
    }
}

/// Teacher registration screen.
#[derive(Debug)]
pub struct TeacherSignupForm {
    controller: FormController,
}

impl Default for TeacherSignupForm {
    fn default() -> Self {
        Self {
            controller: FormController::new(&TEACHER_SIGNUP),
        }
    }
}

impl TeacherSignupForm {
    pub fn controller(&self) -> &FormController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut FormController {
        &mut self.controller
    }

    pub async fn submit<G: AdminGateway>(
        &mut self,
        gateway: &G,
        scope: &RequestScope,
    ) -> SubmitOutcome<SignupReceipt> {
        self.controller
            .submit(move |values| async move {
                let account = TeacherAccount {
                    first_name: values.owned(FormField::FirstName),
                    last_name: values.owned(FormField::LastName),
                    email: values.owned(FormField::Email),
                    phone_number: values.owned(FormField::PhoneNumber),
                    password: values.owned(FormField::Password),
                };
                scope.run(gateway.teacher_signup(&account)).await
            })
            .await
    }
}

/// Sign-in screen. A successful submission yields the new [`Session`]; storing it
/// is up to the caller.
#[derive(Debug)]
pub struct LoginForm {
    controller: FormController,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            controller: FormController::new(&LOGIN),
        }
    }
}

impl LoginForm {
    pub fn controller(&self) -> &FormController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut FormController {
        &mut self.controller
    }

    pub async fn submit<G: AdminGateway>(
        &mut self,
        gateway: &G,
        scope: &RequestScope,
    ) -> SubmitOutcome<Session> {
        self.controller
            .submit(move |values| async move {
                let credentials = Credentials {
                    email: values.owned(FormField::Email),
                    password: values.owned(FormField::Password),
                };
                let grant = scope.run(gateway.login(&credentials)).await?;
                Ok(Session::new(
                    AuthToken::new(grant.token),
                    credentials.email,
                    Utc::now(),
                ))
            })
            .await
    }
}
