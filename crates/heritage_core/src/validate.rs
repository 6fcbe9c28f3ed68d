//! Boundary validation helpers.

use heritage_error::ValidationError;

/// Schema checks applied by the caller before a payload reaches the store.
pub trait Validate {
    /// Check every field, returning the first violation.
    fn validate(&self) -> Result<(), ValidationError>;
}

#[track_caller]
pub(crate) fn non_empty(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "must not be empty"));
    }
    Ok(())
}

#[track_caller]
pub(crate) fn http_url(field: &str, value: &str) -> Result<(), ValidationError> {
    match url::Url::parse(value) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
        Ok(parsed) => Err(ValidationError::new(
            field,
            format!("unsupported URL scheme '{}'", parsed.scheme()),
        )),
        Err(e) => Err(ValidationError::new(field, format!("not a valid URL: {}", e))),
    }
}

#[track_caller]
pub(crate) fn within(field: &str, value: f64, bound: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value.abs() > bound {
        return Err(ValidationError::new(
            field,
            format!("must be within -{bound}..={bound}, got {value}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_url_rejects_other_schemes() {
        assert!(http_url("link", "https://example.org/book").is_ok());
        assert!(http_url("link", "ftp://example.org/book").is_err());
        assert!(http_url("link", "not a url").is_err());
    }

    #[test]
    fn within_rejects_nan_and_out_of_range() {
        assert!(within("lat", 47.6, 90.0).is_ok());
        assert!(within("lat", -90.0, 90.0).is_ok());
        assert!(within("lat", 90.5, 90.0).is_err());
        assert!(within("lat", f64::NAN, 90.0).is_err());
    }

    #[test]
    fn non_empty_trims_whitespace() {
        assert!(non_empty("title", "  ").is_err());
        assert!(non_empty("title", "Fort Ward").is_ok());
    }
}
