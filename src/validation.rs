use validator::ValidationError;

fn failure(code: &'static str, message: &'static str, value: &str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error.add_param("value".into(), &value);
    error
}

/// Rejects values that are empty or whitespace-only.
pub fn non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(failure(
            "non_blank",
            "Value cannot be empty or whitespace",
            value,
        ));
    }
    Ok(())
}

/// Rejects values whose trimmed length is under four characters.
///
/// Length is measured after trimming so padding a short value with
/// whitespace does not get it past the rule.
pub fn trimmed_min_4(value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(failure(
            "non_blank",
            "Value cannot be empty or whitespace",
            value,
        ));
    }
    if trimmed.chars().count() < 4 {
        return Err(failure(
            "trimmed_length",
            "Value must be at least 4 characters long",
            value,
        ));
    }
    Ok(())
}
