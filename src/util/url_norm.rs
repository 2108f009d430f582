use url::Url;

use crate::error::{AppError, AppResult};

pub const MISSING_WEBSITE: &str = "Missing website in URL.";
pub const INVALID_URL: &str = "Invalid URL provided.";

/// Turns the request path into the page to fetch. The leading slash is
/// dropped, a scheme-less target gets `http://`, and the result must parse.
pub fn target_from_path(path: &str) -> AppResult<Url> {
    let website = path.strip_prefix('/').unwrap_or(path);
    if website.trim().is_empty() {
        return Err(AppError::BadRequest(MISSING_WEBSITE.to_string()));
    }

    let candidate = if has_http_scheme(website) {
        website.to_string()
    } else {
        format!("http://{website}")
    };

    Url::parse(&candidate).map_err(|err| {
        tracing::debug!(input = website, error = %err, "unparsable website");
        AppError::BadRequest(INVALID_URL.to_string())
    })
}

fn has_http_scheme(input: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        input
            .get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejection(path: &str) -> String {
        match target_from_path(path) {
            Err(AppError::BadRequest(msg)) => msg,
            other => panic!("expected bad request for {path:?}, got {other:?}"),
        }
    }

    #[test]
    fn bare_host_gets_http_scheme() {
        let url = target_from_path("/example.com").unwrap();
        assert_eq!(url.as_str(), "http://example.com/");
    }

    #[test]
    fn explicit_scheme_is_kept_case_insensitively() {
        assert_eq!(
            target_from_path("/HTTPS://example.com/a/b").unwrap().as_str(),
            "https://example.com/a/b"
        );
        assert_eq!(
            target_from_path("/http://example.com").unwrap().as_str(),
            "http://example.com/"
        );
    }

    #[test]
    fn nested_path_is_preserved() {
        let url = target_from_path("/blog.example.org/posts/42").unwrap();
        assert_eq!(url.as_str(), "http://blog.example.org/posts/42");
    }

    #[test]
    fn empty_or_blank_path_is_missing_website() {
        assert_eq!(rejection(""), MISSING_WEBSITE);
        assert_eq!(rejection("/"), MISSING_WEBSITE);
        assert_eq!(rejection("/   "), MISSING_WEBSITE);
    }

    #[test]
    fn garbage_is_invalid_url() {
        assert_eq!(rejection("/not a url::::"), INVALID_URL);
        assert_eq!(rejection("/not%20a%20url::::"), INVALID_URL);
    }
}
