/// Whitespace that collapses in rendered text; U+00A0 (`&nbsp;`) is kept.
pub(crate) fn is_collapsible(c: char) -> bool {
    c.is_whitespace() && c != '\u{a0}'
}

/// Collapses every run of collapsible whitespace (including newlines)
/// into one space.
///
/// Leading and trailing whitespace is kept as a single space so adjacent
/// inline runs do not squeeze together.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    let mut collapsed = String::with_capacity(text.len());
    let mut in_space = false;

    for c in text.chars() {
        if is_collapsible(c) {
            if !in_space {
                collapsed.push(' ');
                in_space = true;
            }
        } else {
            collapsed.push(c);
            in_space = false;
        }
    }
    collapsed
}

/// `true` if the whitespace-separated `list` contains `token`.
pub(crate) fn has_token(list: &str, token: &str) -> bool {
    list.split_ascii_whitespace().any(|t| t == token)
}
