use url::Url;

/// Result of the URL form checks applied before a submission is dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlInput {
    /// Nothing but whitespace; silently ignored.
    Empty,
    /// Not an absolute URL with a host.
    Invalid(String),
    Valid,
}

/// Form-level checks for the URL field: non-empty and syntactically an
/// absolute URL with a host. The remote service stays the authority on
/// whether the URL is acceptable.
pub fn check_url_input(raw: &str) -> UrlInput {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return UrlInput::Empty;
    }
    match Url::parse(trimmed) {
        Ok(url) if url.has_host() => UrlInput::Valid,
        Ok(_) => UrlInput::Invalid("url has no host".to_string()),
        Err(err) => UrlInput::Invalid(err.to_string()),
    }
}
