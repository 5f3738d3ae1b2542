// src/projector/search.rs

/// Lines of `text` containing `query`, case-insensitively, in document order.
///
/// An empty query matches every line, blank ones included. Empty text has no lines.
pub fn keyword_search<'a>(text: &'a str, query: &str) -> Vec<&'a str> {
    if text.is_empty() {
        return Vec::new();
    }

    let needle = query.to_lowercase();
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| line.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "Built cloud infra\nLed a team\nWrote Python scripts";

    #[test]
    fn test_query_matches_single_line() {
        assert_eq!(keyword_search(DOC, "python"), vec!["Wrote Python scripts"]);
    }

    #[test]
    fn test_query_is_case_insensitive() {
        assert_eq!(keyword_search(DOC, "PYTHON"), keyword_search(DOC, "python"));
    }

    #[test]
    fn test_empty_query_returns_every_line() {
        assert_eq!(
            keyword_search(DOC, ""),
            vec!["Built cloud infra", "Led a team", "Wrote Python scripts"]
        );
    }

    #[test]
    fn test_blank_lines_only_match_empty_query() {
        let text = "Rust\n\nGo\r\n";
        assert_eq!(keyword_search(text, ""), vec!["Rust", "", "Go", ""]);
        assert_eq!(keyword_search(text, "go"), vec!["Go"]);
    }

    #[test]
    fn test_no_match_and_empty_text() {
        assert!(keyword_search(DOC, "kubernetes").is_empty());
        assert!(keyword_search("", "").is_empty());
    }

    #[test]
    fn test_substring_not_whole_word() {
        assert_eq!(keyword_search(DOC, "ea"), vec!["Led a team"]);
    }
}
