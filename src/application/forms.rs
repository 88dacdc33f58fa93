//! Sign-in and sign-up form validation.
//!
//! Runs synchronously before any identity-service call; a failed validation
//! blocks submission entirely. `Display` text is the exact copy shown under
//! the form.

use thiserror::Error;

/// Client-side validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Please fill in all fields.")]
    MissingFields,

    #[error("Passwords do not match.")]
    PasswordMismatch,
}

/// The sign-in form's fields.
#[derive(Debug, Clone)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    /// Creates a form from the raw field values.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Checks every field is filled in.
    pub fn validate(&self) -> Result<(), FormError> {
        if self.email.is_empty() || self.password.is_empty() {
            return Err(FormError::MissingFields);
        }
        Ok(())
    }
}

/// The sign-up form's fields.
#[derive(Debug, Clone)]
pub struct SignupForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignupForm {
    /// Creates a form from the raw field values.
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            confirm_password: confirm_password.into(),
        }
    }

    /// Checks every field is filled in and the passwords agree.
    pub fn validate(&self) -> Result<(), FormError> {
        if self.email.is_empty() || self.password.is_empty() || self.confirm_password.is_empty() {
            return Err(FormError::MissingFields);
        }
        if self.password != self.confirm_password {
            return Err(FormError::PasswordMismatch);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_form_accepts_filled_fields() {
        let form = LoginForm::new("alice@example.com", "hunter22");
        assert!(form.validate().is_ok());
    }

    #[test]
    fn login_form_rejects_empty_email() {
        let form = LoginForm::new("", "hunter22");
        assert_eq!(form.validate(), Err(FormError::MissingFields));
    }

    #[test]
    fn login_form_rejects_empty_password() {
        let form = LoginForm::new("alice@example.com", "");
        assert_eq!(form.validate(), Err(FormError::MissingFields));
    }

    #[test]
    fn signup_form_accepts_matching_passwords() {
        let form = SignupForm::new("alice@example.com", "hunter22", "hunter22");
        assert!(form.validate().is_ok());
    }

    #[test]
    fn signup_form_rejects_mismatched_passwords() {
        let form = SignupForm::new("alice@example.com", "abc", "xyz");
        assert_eq!(form.validate(), Err(FormError::PasswordMismatch));
    }

    #[test]
    fn signup_form_reports_missing_fields_before_mismatch() {
        let form = SignupForm::new("alice@example.com", "", "xyz");
        assert_eq!(form.validate(), Err(FormError::MissingFields));
    }

    #[test]
    fn form_error_messages_are_the_display_copy() {
        assert_eq!(
            FormError::MissingFields.to_string(),
            "Please fill in all fields."
        );
        assert_eq!(
            FormError::PasswordMismatch.to_string(),
            "Passwords do not match."
        );
    }
}
