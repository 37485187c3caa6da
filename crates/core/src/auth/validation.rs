use super::{Credentials, Registration, ValidationError};

/// Shortest password accepted at sign-up.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Trims and lowercases an email address so lookups are case-insensitive.
///
/// # Examples
///
/// ```
/// use leaguehub_core::auth::normalize_email;
///
/// assert_eq!(normalize_email("  Fan@Example.COM "), "fan@example.com");
/// ```
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(char::is_whitespace)
}

/// Validates a sign-up payload and returns it normalized.
///
/// The name is trimmed and the email is trimmed and lowercased. The password
/// is left untouched.
pub fn validate_registration(
    name: &str,
    email: &str,
    password: &str,
) -> Result<Registration, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::MissingField("name"));
    }

    let email = normalize_email(email);
    if email.is_empty() {
        return Err(ValidationError::MissingField("email"));
    }
    if !is_plausible_email(&email) {
        return Err(ValidationError::InvalidEmail(email));
    }

    if password.is_empty() {
        return Err(ValidationError::MissingField("password"));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort(MIN_PASSWORD_LEN));
    }

    Ok(Registration {
        name: name.to_string(),
        email,
        password: password.to_string(),
    })
}

/// Validates a sign-in payload. Only presence is checked here; the
/// credentials themselves are verified against the stored hash.
pub fn validate_login(email: &str, password: &str) -> Result<Credentials, ValidationError> {
    let email = normalize_email(email);
    if email.is_empty() {
        return Err(ValidationError::MissingField("email"));
    }
    if password.is_empty() {
        return Err(ValidationError::MissingField("password"));
    }
    Ok(Credentials {
        email,
        password: password.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_normalizes_name_and_email() {
        let reg = validate_registration("  Bukayo ", " B.Saka@Arsenal.COM ", "secret1").unwrap();
        assert_eq!(reg.name, "Bukayo");
        assert_eq!(reg.email, "b.saka@arsenal.com");
        assert_eq!(reg.password, "secret1");
    }

    #[test]
    fn registration_requires_every_field() {
        assert_eq!(
            validate_registration(" ", "a@b.com", "secret1"),
            Err(ValidationError::MissingField("name"))
        );
        assert_eq!(
            validate_registration("Ann", "   ", "secret1"),
            Err(ValidationError::MissingField("email"))
        );
        assert_eq!(
            validate_registration("Ann", "a@b.com", ""),
            Err(ValidationError::MissingField("password"))
        );
    }

    #[test]
    fn registration_rejects_malformed_emails() {
        for bad in ["plainaddress", "@example.com", "user@", "user@localhost", "a@b@c.com", "a b@c.com", "a@.com"] {
            assert!(
                matches!(
                    validate_registration("Ann", bad, "secret1"),
                    Err(ValidationError::InvalidEmail(_))
                ),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn registration_rejects_short_passwords() {
        assert_eq!(
            validate_registration("Ann", "ann@example.com", "12345"),
            Err(ValidationError::PasswordTooShort(MIN_PASSWORD_LEN))
        );
    }

    #[test]
    fn login_lowercases_email() {
        let creds = validate_login("ANN@Example.com", "pw").unwrap();
        assert_eq!(creds.email, "ann@example.com");
    }

    #[test]
    fn login_requires_email_and_password() {
        assert_eq!(
            validate_login("", "pw"),
            Err(ValidationError::MissingField("email"))
        );
        assert_eq!(
            validate_login("ann@example.com", ""),
            Err(ValidationError::MissingField("password"))
        );
    }
}
