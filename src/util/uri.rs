//! Path arithmetic over archive entry names.
//!
//! Entry names always use `/` separators and never carry a leading `/`
//! once resolved; an href starting with `/` is treated as already absolute.

use std::borrow::Cow;

/// Schemes that point outside the archive or are already embedded.
const EXTERNAL_SCHEMES: &[&str] = &["http:", "https:", "data:", "blob:", "mailto:", "file:"];

/// Resolves `relative` against `base`.
///
/// `base` may name either a directory or a file; a last segment containing a
/// `.` is treated as a filename and dropped before resolution.
pub(crate) fn resolve(base: &str, relative: &str) -> String {
    if relative.starts_with('/') {
        return relative.to_owned();
    }

    let mut stack = segments(base);
    if stack.last().is_some_and(|last| last.contains('.')) {
        stack.pop();
    }

    for segment in relative.split('/').filter(|s| !s.is_empty()) {
        match segment {
            ".." => {
                stack.pop();
            }
            "." => {}
            _ => stack.push(segment),
        }
    }

    stack.join("/")
}

/// The directory portion of `path`, using the same filename rule as [`resolve`].
pub(crate) fn base_dir(path: &str) -> String {
    resolve(path, "")
}

/// Splits `href` into its path and optional fragment (without the `#`).
pub(crate) fn split_fragment(href: &str) -> (&str, Option<&str>) {
    match href.find('#') {
        Some(index) => (&href[..index], Some(&href[index + 1..])),
        None => (href, None),
    }
}

/// The href with any query (`?`) and fragment (`#`) removed.
pub(crate) fn path(href: &str) -> &str {
    href.find(['?', '#']).map_or(href, |index| &href[..index])
}

pub(crate) fn decode(encoded: &str) -> Cow<'_, str> {
    percent_encoding::percent_decode_str(encoded).decode_utf8_lossy()
}

/// Lower-cased file extension of `href`, ignoring any query or fragment.
pub(crate) fn extension(href: &str) -> Option<String> {
    let path = path(href);
    let filename = path.rsplit('/').next().unwrap_or(path);

    filename
        .rfind('.')
        .map(|index| filename[index + 1..].to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
}

/// `true` if `href` points outside the archive (`http:`, `data:`, `blob:`, ...).
pub(crate) fn is_external(href: &str) -> bool {
    let href = href.trim_start();

    EXTERNAL_SCHEMES.iter().any(|scheme| {
        href.len() >= scheme.len() && href[..scheme.len()].eq_ignore_ascii_case(scheme)
    })
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}
