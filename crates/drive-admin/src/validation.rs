//! Field-level rules shared by every console form.
//!
//! Validators are pure: they take a field and its raw value and either accept it
//! (`None`) or return the message to show next to the field.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

/// Minimum password length, counted in characters.
pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    FirstName,
    LastName,
    Email,
    PhoneNumber,
    Password,
}

impl FormField {
    pub fn label(self) -> &'static str {
        match self {
            FormField::FirstName => "First Name",
            FormField::LastName => "Last Name",
            FormField::Email => "Email",
            FormField::PhoneNumber => "Phone Number",
            FormField::Password => "Password",
        }
    }

    /// Passwords are checked and submitted exactly as typed.
    pub fn is_trimmed(self) -> bool {
        !matches!(self, FormField::Password)
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z]{2,}$").expect("name pattern compiles"))
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
    })
}

fn phone_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\+?[0-9][0-9 \-]{5,}[0-9]$").expect("phone pattern compiles")
    })
}

/// Full signup rules for a single field.
pub fn validate_field(field: FormField, value: &str) -> Option<&'static str> {
    match field {
        FormField::FirstName => validate_name(
            value,
            "First name is required",
            "First name must contain only letters and be at least 2 characters",
        ),
        FormField::LastName => validate_name(
            value,
            "Last name is required",
            "Last name must contain only letters and be at least 2 characters",
        ),
        FormField::Email => validate_email(value),
        FormField::PhoneNumber => validate_phone(value),
        FormField::Password => validate_password(value),
    }
}

/// Presence-only rules used by the login form, where the password policy is the
/// backend's business.
pub fn validate_presence(field: FormField, value: &str) -> Option<&'static str> {
    match field {
        FormField::Email => validate_email(value),
        FormField::Password if value.is_empty() => Some("Password is required"),
        FormField::Password => None,
        other => validate_field(other, value),
    }
}

fn validate_name(
    value: &str,
    missing: &'static str,
    invalid: &'static str,
) -> Option<&'static str> {
    let value = value.trim();
    if value.is_empty() {
        Some(missing)
    } else if !name_pattern().is_match(value) {
        Some(invalid)
    } else {
        None
    }
}

pub fn validate_email(value: &str) -> Option<&'static str> {
    let value = value.trim();
    if value.is_empty() {
        Some("Email is required")
    } else if !email_pattern().is_match(value) {
        Some("Please enter a valid email address")
    } else {
        None
    }
}

pub fn validate_password(value: &str) -> Option<&'static str> {
    if value.is_empty() {
        Some("Password is required")
    } else if value.chars().count() < MIN_PASSWORD_LEN {
        Some("Password must be at least 8 characters")
    } else if !value.chars().any(|c| c.is_ascii_alphabetic())
        || !value.chars().any(|c| c.is_ascii_digit())
    {
        Some("Password must contain at least one letter and one number")
    } else {
        None
    }
}

pub fn validate_phone(value: &str) -> Option<&'static str> {
    let value = value.trim();
    if value.is_empty() {
        Some("Phone number is required")
    } else if !phone_pattern().is_match(value) {
        Some("Please enter a valid phone number")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_passwords_always_fail() {
        for candidate in ["", "a", "a1", "abc123", "abcd12!", "Ab1Ab1A"] {
            assert!(
                validate_password(candidate).is_some(),
                "'{candidate}' should be rejected"
            );
        }
        assert_eq!(
            validate_password("abc1234"),
            Some("Password must be at least 8 characters")
        );
    }

    #[test]
    fn long_passwords_need_letter_and_digit() {
        for candidate in ["abcdefgh", "12345678", "!!!!!!!!", "ABCDEFGHIJ", "        "] {
            assert_eq!(
                validate_password(candidate),
                Some("Password must contain at least one letter and one number"),
                "'{candidate}' should be rejected"
            );
        }
        assert_eq!(validate_password("drive2024"), None);
        assert_eq!(validate_password("12345678x"), None);
    }

    #[test]
    fn password_length_counts_characters() {
        // Seven characters but more than eight bytes.
        assert!(validate_password("pässwö1").is_some());
        assert_eq!(validate_password("pässwör1"), None);
    }

    #[test]
    fn emails_need_at_sign_and_domain_dot() {
        for candidate in [
            "user.example.com",
            "user@example",
            "@example.com",
            "user@.com",
            "us er@example.com",
            "user@@example.com",
        ] {
            assert_eq!(
                validate_email(candidate),
                Some("Please enter a valid email address"),
                "'{candidate}' should be rejected"
            );
        }
        assert_eq!(validate_email("   "), Some("Email is required"));
        assert_eq!(validate_email(" admin@school.et "), None);
    }

    #[test]
    fn names_require_two_letters() {
        assert_eq!(
            validate_field(FormField::FirstName, ""),
            Some("First name is required")
        );
        assert_eq!(
            validate_field(FormField::LastName, "K"),
            Some("Last name must contain only letters and be at least 2 characters")
        );
        assert!(validate_field(FormField::FirstName, "Jo3").is_some());
        assert!(validate_field(FormField::FirstName, "Mary Ann").is_some());
        assert_eq!(validate_field(FormField::FirstName, "  Li "), None);
    }

    #[test]
    fn phone_numbers_accept_common_shapes() {
        assert_eq!(validate_phone("+251 911 234 567"), None);
        assert_eq!(validate_phone("0911-234567"), None);
        assert_eq!(validate_phone(""), Some("Phone number is required"));
        assert!(validate_phone("12345").is_some());
        assert!(validate_phone("call me").is_some());
    }

    #[test]
    fn login_only_checks_password_presence() {
        assert_eq!(validate_presence(FormField::Password, "short"), None);
        assert_eq!(
            validate_presence(FormField::Password, ""),
            Some("Password is required")
        );
        assert!(validate_presence(FormField::Email, "nope").is_some());
    }
}
