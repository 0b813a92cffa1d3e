use validator::ValidationError;

/// Only one mail provider is accepted: `local@gmail.com` where the local part
/// is non-empty and limited to `[A-Za-z0-9._%+-]`.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let Some(local) = email.strip_suffix("@gmail.com") else {
        return Err(ValidationError::new("email_domain_not_allowed"));
    };

    if local.is_empty() {
        return Err(ValidationError::new("email_local_part_empty"));
    }

    if !local
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '%' | '+' | '-'))
    {
        return Err(ValidationError::new("email_invalid_characters"));
    }

    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.len() < 8 {
        return Err(ValidationError::new("password_too_short"));
    }

    if !password.chars().any(|c| c.is_ascii_alphabetic()) {
        return Err(ValidationError::new("password_needs_letter"));
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(ValidationError::new("password_needs_number"));
    }

    Ok(())
}

pub fn validate_role(role: &str) -> Result<(), ValidationError> {
    match role {
        "leader" | "member" => Ok(()),
        _ => Err(ValidationError::new("invalid_role")),
    }
}
