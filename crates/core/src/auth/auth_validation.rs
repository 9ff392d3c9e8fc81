//! Checks run on auth forms before submission. The server repeats them.

use crate::errors::ValidationError;

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_PASSWORD_LEN: usize = 100;
pub const TWO_FACTOR_CODE_LEN: usize = 6;

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .map(|(host, tld)| !host.is_empty() && !tld.is_empty())
                    .unwrap_or(false)
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(ValidationError::field(
            "email",
            "Please enter a valid email address",
        ))
    }
}

/// Sign-up strength rules: length, one uppercase, one lowercase, one digit.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    let rule = |ok: bool, message: &str| {
        if ok {
            Ok(())
        } else {
            Err(ValidationError::field("password", message))
        }
    };

    rule(
        password.chars().count() >= MIN_PASSWORD_LEN,
        "Password must be at least 8 characters",
    )?;
    rule(
        password.chars().count() <= MAX_PASSWORD_LEN,
        "Password must be at most 100 characters",
    )?;
    rule(
        password.chars().any(|c| c.is_ascii_uppercase()),
        "Password must contain at least one uppercase letter",
    )?;
    rule(
        password.chars().any(|c| c.is_ascii_lowercase()),
        "Password must contain at least one lowercase letter",
    )?;
    rule(
        password.chars().any(|c| c.is_ascii_digit()),
        "Password must contain at least one digit",
    )
}

pub fn validate_two_factor_code(code: &str) -> Result<(), ValidationError> {
    let code = code.trim();
    if code.len() == TWO_FACTOR_CODE_LEN && code.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::field(
            "code",
            "Please enter the 6-digit code from your authenticator app",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_email() {
        assert!(validate_email("demo@tunicoin.local").is_ok());
        assert!(validate_email("  first.last@example.co.uk ").is_ok());
    }

    #[test]
    fn rejects_malformed_email() {
        for bad in ["", "demo", "@example.com", "demo@", "demo@localhost", "a@b@c.com"] {
            assert!(validate_email(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn password_rules_report_first_failure() {
        let msg = |p: &str| validate_password(p).unwrap_err().to_string();
        assert_eq!(msg("Ab1"), "Password must be at least 8 characters");
        assert_eq!(
            msg("securepass123"),
            "Password must contain at least one uppercase letter"
        );
        assert_eq!(
            msg("SECUREPASS123"),
            "Password must contain at least one lowercase letter"
        );
        assert_eq!(msg("SecurePass"), "Password must contain at least one digit");
        assert!(validate_password("SecurePass123").is_ok());
    }

    #[test]
    fn two_factor_code_is_six_digits() {
        assert!(validate_two_factor_code("123456").is_ok());
        assert!(validate_two_factor_code(" 123456 ").is_ok());
        assert!(validate_two_factor_code("12345").is_err());
        assert!(validate_two_factor_code("12a456").is_err());
    }
}
