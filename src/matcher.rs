use crate::data_models::SearchItem;
use crate::fuzzy::weighted_ratio;

/// Minimum fuzzy similarity (0-100) for a keyword to count as present.
pub const FUZZY_CUTOFF: f64 = 90.0;

/// True if any pattern occurs in `text`, ignoring case. Empty text never matches.
pub fn matches_pattern<S: AsRef<str>>(text: &str, patterns: &[S]) -> bool {
    if text.is_empty() {
        return false;
    }
    let text = text.to_lowercase();
    patterns
        .iter()
        .any(|pattern| text.contains(&pattern.as_ref().to_lowercase()))
}

/// Whether the item's link, title or snippet carries the keywords, using the
/// default fuzzy cutoff. See [`keyword_in_search_with_cutoff`].
pub fn keyword_in_search<S: AsRef<str>>(
    item: &SearchItem,
    keywords: &[S],
    must_contain_all: bool,
) -> bool {
    keyword_in_search_with_cutoff(item, keywords, must_contain_all, FUZZY_CUTOFF)
}

/// Visits link, title and snippet in order, skipping empty fields. On each
/// field the keywords are first tested by case-insensitive containment and,
/// failing that, by fuzzy similarity against the whole field. `must_contain_all`
/// requires every keyword to hit the same field; otherwise one is enough.
/// Returns on the first field that satisfies either test.
pub fn keyword_in_search_with_cutoff<S: AsRef<str>>(
    item: &SearchItem,
    keywords: &[S],
    must_contain_all: bool,
    fuzzy_cutoff: f64,
) -> bool {
    let combine = |hit: &dyn Fn(&str) -> bool| -> bool {
        if must_contain_all {
            keywords.iter().all(|k| hit(k.as_ref()))
        } else {
            keywords.iter().any(|k| hit(k.as_ref()))
        }
    };

    for field in item.text_fields() {
        if field.is_empty() {
            continue;
        }

        let folded = field.to_lowercase();
        if combine(&|keyword: &str| folded.contains(&keyword.to_lowercase())) {
            return true;
        }

        if combine(&|keyword: &str| weighted_ratio(keyword, field) >= fuzzy_cutoff) {
            return true;
        }
    }

    false
}

#[test]
fn test_matches_pattern() {
    assert!(matches_pattern("https://example.com/Docs/intro", &["/docs/"]));
    assert!(matches_pattern("Python API Reference", &["api"]));
    assert!(!matches_pattern("https://example.com/blog", &["/docs/", "/reference/"]));
    assert!(!matches_pattern("", &["docs"]));
    assert!(!matches_pattern::<&str>("anything", &[]));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(link: &str, title: &str, snippet: &str) -> SearchItem {
        SearchItem::new(link, title, snippet)
    }

    #[test]
    fn any_keyword_in_title_matches() {
        let result = item(
            "https://example.com/x",
            "Free Python Course",
            "Learn the basics",
        );
        assert!(keyword_in_search(&result, &["course", "bootcamp"], false));
    }

    #[test]
    fn exact_match_ignores_case() {
        let result = item("https://example.com", "OFFICIAL DOCUMENTATION", "");
        assert!(keyword_in_search(&result, &["documentation"], false));
    }

    #[test]
    fn all_keywords_must_share_a_field() {
        // "code" only in the title and "game" only in the snippet
        let split = item("https://example.com/a", "Learn to code", "A fun game");
        assert!(!keyword_in_search(&split, &["code", "game"], true));

        let together = item("https://example.com/a", "A code game for CSS", "");
        assert!(keyword_in_search(&together, &["code", "game"], true));
    }

    #[test]
    fn empty_fields_are_skipped_not_fatal() {
        let result = item("", "", "a youtube playlist");
        assert!(keyword_in_search(&result, &["youtube"], false));
    }

    #[test]
    fn fuzzy_pass_catches_near_spelling() {
        // exact containment fails, the whole title is one edit away
        let result = item("https://example.com/z", "documantation", "");
        assert!(keyword_in_search(&result, &["documentation"], false));
    }

    #[test]
    fn fuzzy_pass_tolerates_a_split_word() {
        let result = item("https://example.com/x", "boot camp", "");
        assert!(keyword_in_search(&result, &["bootcamp"], false));
    }

    #[test]
    fn cutoff_is_configurable() {
        let result = item("https://example.com/z", "documantation", "");
        assert!(!keyword_in_search_with_cutoff(
            &result,
            &["documentation"],
            false,
            99.0
        ));
    }

    #[test]
    fn nothing_matches_unrelated_text() {
        let result = item("https://example.com/recipes", "Banana bread", "Bake it");
        assert!(!keyword_in_search(&result, &["youtube", "github"], false));
    }
}
