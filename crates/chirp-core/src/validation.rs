use crate::error::{ServiceError, ServiceResult};

pub(crate) const MIN_USERNAME_LEN: usize = 3;
pub(crate) const MAX_TITLE_LEN: usize = 100;

pub(crate) fn require(field: &str, value: &str) -> ServiceResult<()> {
    if value.trim().is_empty() {
        return Err(ServiceError::validation(format!("{} is required", field)));
    }
    Ok(())
}

pub(crate) fn max_chars(field: &str, value: &str, max: usize) -> ServiceResult<()> {
    if value.chars().count() > max {
        return Err(ServiceError::validation(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }
    Ok(())
}

pub(crate) fn min_chars(field: &str, value: &str, min: usize) -> ServiceResult<()> {
    if value.chars().count() < min {
        return Err(ServiceError::validation(format!(
            "{} must be at least {} characters",
            field, min
        )));
    }
    Ok(())
}

/// `local@domain.tld`, no whitespace. Deliverability is not checked.
pub(crate) fn email(value: &str) -> ServiceResult<()> {
    require("email", value)?;
    let invalid = || ServiceError::validation("email is not a valid address");

    if value.contains(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = value.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    let (host, tld) = domain.rsplit_once('.').ok_or_else(invalid)?;
    if host.is_empty() || tld.is_empty() {
        return Err(invalid());
    }
    Ok(())
}
