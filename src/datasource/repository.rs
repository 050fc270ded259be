pub mod downloads;
pub mod episode;
pub mod genre;
pub mod movie;
pub mod season;
pub mod series;

/// Escapes `ILIKE` metacharacters so user input matches as literal
/// substring text. Postgres treats `\` as the escape character by default.
pub(crate) fn escape_like(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len());
    for c in query.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::escape_like;

    #[test]
    fn percent_and_underscore_are_escaped() {
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("snake_case"), "snake\\_case");
    }

    #[test]
    fn backslash_is_escaped_first() {
        assert_eq!(escape_like(r"a\b"), r"a\\b");
        assert_eq!(escape_like(r"\%"), r"\\\%");
    }

    #[test]
    fn plain_text_is_untouched() {
        assert_eq!(escape_like("heat"), "heat");
    }
}
