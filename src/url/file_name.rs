use crate::url::AbsoluteImageUrl;
use crate::{UrlError, UrlResult};
use url::Url;

/// Derives the on-disk file name for an image URL
///
/// The name is the final segment of the URL path exactly as written in the
/// URL: raw characters stay raw and percent escapes are not decoded. Query
/// strings and fragments play no part, so the same image always maps to the
/// same file.
///
/// # Errors
///
/// * `UrlError::Parse` - The URL is not a valid absolute URL
/// * `UrlError::MissingFileName` - The path is empty, ends with `/`, or ends
///   with a `.` or `..` segment
///
/// # Examples
///
/// ```
/// use cover_grab::url::{file_name_for, normalize_image_src};
///
/// let url = normalize_image_src("/wp-content/uploads/a.jpg?ver=2", "https://example.com");
/// assert_eq!(file_name_for(&url).unwrap(), "a.jpg");
/// ```
pub fn file_name_for(url: &AbsoluteImageUrl) -> UrlResult<String> {
    let raw = url.as_str();
    Url::parse(raw).map_err(|e| UrlError::Parse(format!("{}: {}", url, e)))?;

    let missing = || UrlError::MissingFileName(url.to_string());

    // Parsing succeeded, so anything without "://" has no hierarchical path
    let after_scheme = raw.split_once("://").map(|(_, rest)| rest).ok_or_else(missing)?;
    let without_query = after_scheme.split(['?', '#']).next().unwrap_or_default();
    let path = without_query
        .find('/')
        .map(|start| &without_query[start..])
        .ok_or_else(missing)?;

    match path.rsplit('/').next() {
        Some(name) if !name.is_empty() && name != "." && name != ".." => Ok(name.to_string()),
        _ => Err(missing()),
    }
}
