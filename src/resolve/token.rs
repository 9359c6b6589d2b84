//! Whole-token matching
//!
//! An alias counts as present only when it occurs as a whole token:
//! bounded on each side by the string edge or by a character that is
//! neither alphanumeric nor underscore. This is what keeps `cpu` from
//! matching inside `cpufoo`.

/// Test whether `token` occurs in `message` as a whole token
pub fn contains_token(message: &str, token: &str) -> bool {
    if token.is_empty() {
        return false;
    }

    let mut from = 0;
    while let Some(rel) = message[from..].find(token) {
        let at = from + rel;
        let before = message[..at].chars().next_back();
        let after = message[at + token.len()..].chars().next();
        if is_boundary(before) && is_boundary(after) {
            return true;
        }
        // Advance one character so a later bounded occurrence is still seen
        from = at
            + message[at..]
                .chars()
                .next()
                .map(char::len_utf8)
                .unwrap_or(1);
    }

    false
}

/// Test whether any of `tokens` occurs in `message` as a whole token
pub fn contains_any_token(message: &str, tokens: &[String]) -> bool {
    tokens.iter().any(|t| contains_token(message, t))
}

fn is_boundary(c: Option<char>) -> bool {
    match c {
        None => true,
        Some(c) => !(c.is_ascii_alphanumeric() || c == '_'),
    }
}
