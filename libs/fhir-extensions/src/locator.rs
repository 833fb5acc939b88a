//! Extension lookup by url
//!
//! Lookups never fail: a missing element, a missing `extension` array and an
//! unmatched url all come back as `None` (or `false`).

use ferrum_models::common::{Extension, HasExtensions, HasExtensionsMut};

/// First extension on `element` with the given url.
pub fn get_extension<'a, E>(element: &'a E, url: &str) -> Option<&'a Extension>
where
    E: HasExtensions + ?Sized,
{
    element.extension()?.iter().find(|ext| ext.url == url)
}

/// All extensions with the given url, in document order.
///
/// Returns `None` rather than an empty vector when nothing matches.
pub fn get_extensions<'a, E>(element: &'a E, url: &str) -> Option<Vec<&'a Extension>>
where
    E: HasExtensions + ?Sized,
{
    let matches: Vec<&Extension> = element
        .extension()?
        .iter()
        .filter(|ext| ext.url == url)
        .collect();

    (!matches.is_empty()).then_some(matches)
}

/// Mutable access to the first extension with the given url
pub fn get_extension_mut<'a, E>(element: &'a mut E, url: &str) -> Option<&'a mut Extension>
where
    E: HasExtensionsMut + ?Sized,
{
    element
        .extension_mut()
        .as_mut()?
        .iter_mut()
        .find(|ext| ext.url == url)
}

/// True if `element` has at least one extension with the given url.
pub fn has_extension<E>(element: &E, url: &str) -> bool
where
    E: HasExtensions + ?Sized,
{
    get_extension(element, url).is_some()
}

/// True if any extension's url is one of `urls`.
pub fn has_extension_any<E, S>(element: &E, urls: &[S]) -> bool
where
    E: HasExtensions + ?Sized,
    S: AsRef<str>,
{
    element.extension().is_some_and(|extensions| {
        extensions
            .iter()
            .any(|ext| urls.iter().any(|url| url.as_ref() == ext.url))
    })
}

/// Distinct urls present on `element`, in first-seen order
pub fn get_extension_urls<E>(element: &E) -> Vec<&str>
where
    E: HasExtensions + ?Sized,
{
    let mut urls: Vec<&str> = Vec::new();
    for ext in element.extension().unwrap_or_default() {
        if !urls.contains(&ext.url.as_str()) {
            urls.push(&ext.url);
        }
    }
    urls
}
