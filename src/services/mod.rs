pub mod assessment_service;
pub mod candidate_service;
pub mod job_service;
pub mod note_service;
pub mod stats_service;
pub mod team_service;
pub mod timeline_service;

/// `LIKE` pattern matching `term` anywhere, with wildcards in `term` escaped.
/// Pair it with `ESCAPE '\'` in the query. Only ASCII is lowercased, the same
/// folding SQLite's `LOWER()` applies to the column.
pub(crate) fn like_contains(term: &str) -> String {
    let escaped = term
        .to_ascii_lowercase()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[cfg(test)]
mod tests {
    use super::like_contains;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_contains("Rust"), "%rust%");
        assert_eq!(like_contains("100%_done"), "%100\\%\\_done%");
    }

    #[test]
    fn like_pattern_folds_ascii_only() {
        assert_eq!(like_contains("ÉMILIE"), "%Émilie%");
    }
}
