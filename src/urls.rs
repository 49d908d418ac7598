//! URL helpers: authority extraction, href absolutization, and the
//! site's stream-page URL scheme.

use url::Url;

use crate::error::{Error, Result};

/// Reduce a URL to `scheme://host`.
///
/// The port is dropped on purpose: the site serves both listing and stream
/// pages on default ports, and the referer check on the extraction endpoint
/// matches the bare authority.
pub fn base_url(url: &str) -> Result<String> {
    let parsed = Url::parse(url).map_err(|_| Error::InvalidUrl(url.to_string()))?;
    let host = parsed
        .host_str()
        .ok_or_else(|| Error::InvalidUrl(url.to_string()))?;
    Ok(format!("{}://{}", parsed.scheme(), host))
}

/// Make a scraped href absolute against the discovered site root.
///
/// Protocol-relative hrefs get `https:`; already-absolute hrefs pass through.
pub fn absolutize(root: &str, href: &str) -> String {
    if href.starts_with("http") {
        href.to_string()
    } else if href.starts_with("//") {
        format!("https:{href}")
    } else {
        format!(
            "{}/{}",
            root.trim_end_matches('/'),
            href.trim_start_matches('/')
        )
    }
}

/// Build the stream page URL for a channel id.
///
/// An id that is already an absolute URL under the site root is used
/// unchanged; anything else is treated as a bare channel id.
pub fn fix_channel_url(root: &str, id: &str) -> String {
    if id.starts_with(root) {
        id.to_string()
    } else {
        format!("{root}/stream/stream-{id}.php")
    }
}
