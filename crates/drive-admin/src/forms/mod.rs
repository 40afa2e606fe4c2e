//! Form state and submission for the signup and login screens.

pub mod controller;
pub mod screens;

pub use controller::{FormController, FormSchema, FormValues, SubmitOutcome};
pub use screens::{
    AdminSignupForm, LoginForm, TeacherSignupForm, ADMIN_SIGNUP, LOGIN, TEACHER_SIGNUP,
};
