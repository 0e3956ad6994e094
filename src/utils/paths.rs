use std::path::{Path, PathBuf};

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};

// Characters percent-encoded inside a file-URL path. Path separators stay
// literal.
const ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'?')
    .add(b'{')
    .add(b'}');

/// Encode an absolute filesystem path as a `file://` URL
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use pkgindex::utils::path_to_file_url;
///
/// assert_eq!(path_to_file_url(Path::new("/data/acme survey")), "file:///data/acme%20survey");
/// ```
pub fn path_to_file_url(path: &Path) -> String {
    let path_str = path.to_string_lossy();
    format!("file://{}", utf8_percent_encode(&path_str, ENCODE_SET))
}

/// Decode a `file://` URL back to a filesystem path
///
/// Returns `None` for URLs of any other scheme, so callers can fall back to
/// showing the URL itself.
pub fn file_url_to_path(url: &str) -> Option<PathBuf> {
    let rest = url.strip_prefix("file://")?;

    // file:///path has an empty authority; file://host/path carries one
    let path = if rest.starts_with('/') {
        rest
    } else {
        match rest.find('/') {
            Some(i) => &rest[i..],
            None => return None,
        }
    };

    Some(PathBuf::from(percent_decode_str(path).decode_utf8_lossy().into_owned()))
}

/// Extract the search key from a user-supplied term.
///
/// A plain term is used verbatim. A locator term (`index:acme-survey`,
/// `file:///data/acme-survey.zip`) contributes its percent-decoded path
/// component instead.
pub fn search_key(term: &str) -> String {
    let Some((scheme, rest)) = term.split_once(':') else {
        return term.to_string();
    };

    let scheme_like = scheme.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
        && scheme.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '.' | '-'));
    if !scheme_like {
        return term.to_string();
    }

    let path = match rest.strip_prefix("//") {
        // Skip the authority component when one is present
        Some(authority) => match authority.find('/') {
            Some(i) => &authority[i..],
            None => authority,
        },
        None => rest,
    };

    percent_decode_str(path).decode_utf8_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_url_round_trip() {
        let path = Path::new("/data/packages/acme-survey-1.zip");
        let url = path_to_file_url(path);
        assert_eq!(url, "file:///data/packages/acme-survey-1.zip");
        assert_eq!(file_url_to_path(&url).unwrap(), path);
    }

    #[test]
    fn test_path_url_encodes_spaces() {
        let path = Path::new("/data/acme survey");
        let url = path_to_file_url(path);
        assert_eq!(url, "file:///data/acme%20survey");
        assert_eq!(file_url_to_path(&url).unwrap(), path);
    }

    #[test]
    fn test_non_file_urls_have_no_path() {
        assert_eq!(file_url_to_path("https://example.com/pkg.zip"), None);
    }

    #[test]
    fn test_search_key_plain_term_is_verbatim() {
        assert_eq!(search_key("acme-survey"), "acme-survey");
    }

    #[test]
    fn test_search_key_strips_scheme() {
        assert_eq!(search_key("index:acme-survey"), "acme-survey");
        assert_eq!(search_key("file:///data/acme-survey.zip"), "/data/acme-survey.zip");
        assert_eq!(search_key("file://host/data/pkg"), "/data/pkg");
    }

    #[test]
    fn test_search_key_ignores_non_scheme_colons() {
        // A leading digit rules out a URL scheme
        assert_eq!(search_key("2019:census"), "2019:census");
    }
}
