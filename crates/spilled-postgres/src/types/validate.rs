//! Pure validation helpers shared by the repositories.
//!
//! Database constraints remain the backstop; these helpers reject bad input
//! before it reaches the database and produce field-level errors.

use std::borrow::Cow;

use crate::types::constants::guy;
use crate::{PgError, PgResult};

/// Rejects values that are empty or whitespace-only.
pub fn require_non_empty(field: &'static str, value: &str) -> PgResult<()> {
    if value.trim().is_empty() {
        return Err(PgError::Invalid {
            field: Cow::Borrowed(field),
            reason: Cow::Borrowed("must not be empty"),
        });
    }
    Ok(())
}

/// Rejects values longer than `max` characters.
pub fn validate_length_max(field: &'static str, value: &str, max: usize) -> PgResult<()> {
    if value.chars().count() > max {
        return Err(PgError::Invalid {
            field: Cow::Borrowed(field),
            reason: Cow::Owned(format!("must be at most {max} characters")),
        });
    }
    Ok(())
}

/// Rejects email addresses without a plausible `local@domain` shape.
pub fn validate_email(value: &str) -> PgResult<()> {
    require_non_empty("email_address", value)?;

    let valid = value
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !valid {
        return Err(PgError::Invalid {
            field: Cow::Borrowed("email_address"),
            reason: Cow::Borrowed("must be a valid email address"),
        });
    }
    Ok(())
}

/// Rejects phone numbers with non-dialable characters or implausible length.
pub fn validate_phone(value: &str) -> PgResult<()> {
    require_non_empty("phone_number", value)?;

    let digits = value
        .chars()
        .filter(|character| character.is_ascii_digit())
        .count();
    let dialable = value
        .chars()
        .all(|character| character.is_ascii_digit() || matches!(character, '+' | '-' | ' '));
    if !dialable || !(7..=15).contains(&digits) {
        return Err(PgError::Invalid {
            field: Cow::Borrowed("phone_number"),
            reason: Cow::Borrowed("must be a valid phone number"),
        });
    }
    Ok(())
}

/// Rejects ages outside the accepted range.
pub fn validate_age(age: i32) -> PgResult<()> {
    if !(guy::AGE_MIN..=guy::AGE_MAX).contains(&age) {
        return Err(PgError::Invalid {
            field: Cow::Borrowed("age"),
            reason: Cow::Owned(format!(
                "must be between {} and {}",
                guy::AGE_MIN,
                guy::AGE_MAX
            )),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invalid_field(result: PgResult<()>) -> String {
        match result {
            Err(PgError::Invalid { field, .. }) => field.into_owned(),
            other => panic!("expected invalid error, got {other:?}"),
        }
    }

    #[test]
    fn non_empty_rejects_whitespace() {
        assert!(require_non_empty("body", "hello").is_ok());
        assert_eq!(invalid_field(require_non_empty("body", "")), "body");
        assert_eq!(invalid_field(require_non_empty("body", "   ")), "body");
    }

    #[test]
    fn length_max_counts_characters() {
        assert!(validate_length_max("body", &"a".repeat(1000), 1000).is_ok());
        assert_eq!(
            invalid_field(validate_length_max("body", &"a".repeat(1001), 1000)),
            "body"
        );
    }

    #[test]
    fn email_shape() {
        assert!(validate_email("amara@example.com").is_ok());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("amara@nodot").is_err());
    }

    #[test]
    fn phone_shape() {
        assert!(validate_phone("+254 712 345 678").is_ok());
        assert!(validate_phone("0712345678").is_ok());
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("not-a-phone").is_err());
    }

    #[test]
    fn age_bounds() {
        assert!(validate_age(0).is_ok());
        assert!(validate_age(150).is_ok());
        assert!(validate_age(-1).is_err());
        assert!(validate_age(200).is_err());
    }
}
