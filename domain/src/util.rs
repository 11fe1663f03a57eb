//! Shared utility functions.

/// Deduplicate a list of texts, preserving first-seen order.
///
/// Matching is case-sensitive exact match; blank and whitespace-only entries
/// are dropped. Idempotent under re-application.
pub fn dedupe(items: &[String]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    items
        .iter()
        .filter(|item| !item.trim().is_empty())
        .filter(|item| seen.insert(item.as_str()))
        .cloned()
        .collect()
}

/// Sanitize a text into a filename slug.
///
/// Keeps ASCII alphanumerics, `_`, and `-`; replaces everything else with `_`;
/// truncates to `max_len` characters and strips leading/trailing underscores.
pub fn slugify(text: &str, max_len: usize) -> String {
    let slug: String = text
        .chars()
        .take(max_len)
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    slug.trim_matches('_').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn dedupe_preserves_first_seen_order() {
        let input = strings(&["b", "a", "b", "c", "a"]);
        assert_eq!(dedupe(&input), strings(&["b", "a", "c"]));
    }

    #[test]
    fn dedupe_drops_blanks() {
        let input = strings(&["idea", "", "   ", "idea", "\t"]);
        assert_eq!(dedupe(&input), strings(&["idea"]));
    }

    #[test]
    fn dedupe_is_case_sensitive() {
        let input = strings(&["Idea", "idea"]);
        assert_eq!(dedupe(&input), strings(&["Idea", "idea"]));
    }

    #[test]
    fn dedupe_is_idempotent() {
        let input = strings(&["a", "b", "a", " ", "c"]);
        let once = dedupe(&input);
        let twice = dedupe(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn slugify_replaces_special_chars() {
        assert_eq!(slugify("A smart idea! (v2)", 40), "A_smart_idea___v2");
    }

    #[test]
    fn slugify_truncates_then_trims_underscores() {
        assert_eq!(slugify("??abc??", 40), "abc");
        assert_eq!(slugify("abcdefgh", 4), "abcd");
    }

    #[test]
    fn slugify_empty_input() {
        assert_eq!(slugify("", 40), "");
        assert_eq!(slugify("!!!", 40), "");
    }
}
