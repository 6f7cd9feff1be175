use lazy_static::lazy_static;
use regex::Regex;

use crate::auth::dto::{ConfirmResetRequest, ResetPasswordRequest, SignInRequest, SignUpRequest};
use crate::validation::ValidationErrors;

pub const MIN_PASSWORD_LEN: usize = 6;

const INVALID_EMAIL: &str = "Adresse e-mail invalide";
const PASSWORD_TOO_SHORT: &str = "Le mot de passe doit contenir au moins 6 caractères";
const PASSWORD_REQUIRED: &str = "Le mot de passe est requis";
const PASSWORDS_DIFFER: &str = "Les mots de passe ne correspondent pas";
const TOKEN_REQUIRED: &str = "Le jeton est requis";

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex =
            Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex compiles");
    }
    EMAIL_RE.is_match(email)
}

fn check_email(raw: &str, errors: &mut ValidationErrors) -> String {
    let email = normalize_email(raw);
    if !is_valid_email(&email) {
        errors.push("email", INVALID_EMAIL);
    }
    email
}

fn check_new_password(password: &str, confirm: Option<&str>, errors: &mut ValidationErrors) {
    if password.chars().count() < MIN_PASSWORD_LEN {
        errors.push("password", PASSWORD_TOO_SHORT);
    }
    if let Some(confirm) = confirm {
        if confirm != password {
            errors.push("confirmPassword", PASSWORDS_DIFFER);
        }
    }
}

/// Returns the normalized email on success.
pub fn validate_sign_up(req: &SignUpRequest) -> Result<String, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let email = check_email(&req.email, &mut errors);
    check_new_password(&req.password, req.confirm_password.as_deref(), &mut errors);
    errors.finish(Some(email))
}

pub fn validate_sign_in(req: &SignInRequest) -> Result<String, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let email = check_email(&req.email, &mut errors);
    if req.password.is_empty() {
        errors.push("password", PASSWORD_REQUIRED);
    }
    errors.finish(Some(email))
}

pub fn validate_reset(req: &ResetPasswordRequest) -> Result<String, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let email = check_email(&req.email, &mut errors);
    errors.finish(Some(email))
}

pub fn validate_confirm_reset(req: &ConfirmResetRequest) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    if req.token.trim().is_empty() {
        errors.push("token", TOKEN_REQUIRED);
    }
    check_new_password(&req.password, req.confirm_password.as_deref(), &mut errors);
    errors.finish(Some(()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign_up(email: &str, password: &str, confirm: Option<&str>) -> SignUpRequest {
        SignUpRequest {
            email: email.into(),
            password: password.into(),
            confirm_password: confirm.map(Into::into),
        }
    }

    #[test]
    fn email_is_trimmed_and_lowercased() {
        let email = validate_sign_up(&sign_up("  Alice@Example.COM ", "secret1", None)).unwrap();
        assert_eq!(email, "alice@example.com");
    }

    #[test]
    fn email_regex() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.d"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn sign_up_reports_every_problem() {
        let errors = validate_sign_up(&sign_up("nope", "123", Some("1234"))).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors.messages_for("email").next(), Some(INVALID_EMAIL));
        assert_eq!(errors.messages_for("password").next(), Some(PASSWORD_TOO_SHORT));
        assert_eq!(
            errors.messages_for("confirmPassword").next(),
            Some(PASSWORDS_DIFFER)
        );
    }

    #[test]
    fn confirm_password_is_optional() {
        assert!(validate_sign_up(&sign_up("a@b.co", "secret1", None)).is_ok());
        assert!(validate_sign_up(&sign_up("a@b.co", "secret1", Some("secret1"))).is_ok());
    }

    #[test]
    fn password_length_counts_characters() {
        assert!(validate_sign_up(&sign_up("a@b.co", "éééééé", None)).is_ok());
        assert!(validate_sign_up(&sign_up("a@b.co", "ééééé", None)).is_err());
    }

    #[test]
    fn sign_in_requires_password() {
        let errors = validate_sign_in(&SignInRequest {
            email: "a@b.co".into(),
            password: String::new(),
        })
        .unwrap_err();
        assert_eq!(errors.messages_for("password").next(), Some(PASSWORD_REQUIRED));
    }

    #[test]
    fn confirm_reset_requires_token() {
        let errors = validate_confirm_reset(&ConfirmResetRequest {
            token: " ".into(),
            password: "secret1".into(),
            confirm_password: None,
        })
        .unwrap_err();
        assert_eq!(errors.messages_for("token").next(), Some(TOKEN_REQUIRED));
    }
}
