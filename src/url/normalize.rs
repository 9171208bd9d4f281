use std::fmt;

/// An image URL after normalization
///
/// Protocol-relative (`//host/path`) and root-relative (`/path`) references
/// never survive normalization. Anything else is passed through unchanged, so a
/// malformed absolute reference is only rejected when it is downloaded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AbsoluteImageUrl(String);

impl AbsoluteImageUrl {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AbsoluteImageUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AbsoluteImageUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Turns a raw `src` attribute into an absolute image URL
///
/// # Normalization Rules
///
/// Applied in order, first match wins:
///
/// 1. `//host/path` becomes `https://host/path`
/// 2. `/path` becomes `{base_url}/path`
/// 3. Anything else is returned unchanged
///
/// A trailing slash on `base_url` is ignored so the result never contains a
/// doubled slash at the join.
///
/// # Examples
///
/// ```
/// use cover_grab::url::normalize_image_src;
///
/// let url = normalize_image_src("//cdn.example.com/a.jpg", "https://example.com");
/// assert_eq!(url.as_str(), "https://cdn.example.com/a.jpg");
///
/// let url = normalize_image_src("/img/a.jpg", "https://example.com");
/// assert_eq!(url.as_str(), "https://example.com/img/a.jpg");
/// ```
pub fn normalize_image_src(raw_src: &str, base_url: &str) -> AbsoluteImageUrl {
    if raw_src.starts_with("//") {
        return AbsoluteImageUrl(format!("https:{}", raw_src));
    }

    if raw_src.starts_with('/') {
        return AbsoluteImageUrl(format!("{}{}", base_url.trim_end_matches('/'), raw_src));
    }

    AbsoluteImageUrl(raw_src.to_string())
}
