// src/utils/url.rs

//! URL manipulation utilities.

use url::Url;

/// Resolve a potentially relative URL against a base URL.
///
/// # Examples
/// ```
/// use url::Url;
/// use pouetspy::utils::url::resolve_url;
///
/// let base = Url::parse("https://www.pouet.net/groups.php?which=253").unwrap();
/// assert_eq!(
///     resolve_url(&base, "prod.php?which=1"),
///     "https://www.pouet.net/prod.php?which=1"
/// );
/// ```
pub fn resolve_url(base: &Url, href: &str) -> String {
    base.join(href)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}

/// Extract the production identifier (`which` query parameter) from a link.
pub fn extract_prod_id(link: &str) -> Option<String> {
    let parsed = Url::parse(link).ok()?;
    parsed
        .query_pairs()
        .find(|(key, value)| key == "which" && !value.is_empty())
        .map(|(_, value)| value.into_owned())
}

/// Listing section name from a page title such as `"Benediction :: pouet.net"`.
pub fn title_before_separator(page_title: &str) -> &str {
    page_title
        .split(" ::")
        .next()
        .unwrap_or_default()
        .trim()
}
