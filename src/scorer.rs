use crate::data_models::{CategoryRule, SearchItem};
use crate::domain::domain_in_search;
use crate::matcher::{FUZZY_CUTOFF, keyword_in_search_with_cutoff, matches_pattern};

/// Score returned outright when a `domain_priority` rule's domain matches.
pub const DOMAIN_PRIORITY_SCORE: u32 = 100;
pub const DOMAIN_SCORE: u32 = 50;
pub const URL_PATTERN_SCORE: u32 = 30;
pub const TITLE_PATTERN_SCORE: u32 = 25;
pub const KEYWORD_SCORE: u32 = 20;

/// An item needs at least this score to be placed in a category.
pub const MIN_INCLUSION_SCORE: u32 = 20;

/// Relevance of `item` to the category described by `rule`, using the default
/// fuzzy cutoff. See [`score_search_item_with_cutoff`].
pub fn score_search_item(item: &SearchItem, rule: &CategoryRule) -> u32 {
    score_search_item_with_cutoff(item, rule, FUZZY_CUTOFF)
}

/// Signals are evaluated in a fixed order and their points summed:
///
/// | signal                               | points |
/// |--------------------------------------|--------|
/// | domain, rule has `domain_priority`   | 100, returned immediately |
/// | domain                               | 50     |
/// | url pattern on the link              | 30     |
/// | title pattern on the title           | 25     |
/// | keywords in link / title / snippet   | 20     |
///
/// A signal whose rule field is empty contributes nothing; in particular an
/// empty `domains` list does not award domain points.
pub fn score_search_item_with_cutoff(
    item: &SearchItem,
    rule: &CategoryRule,
    fuzzy_cutoff: f64,
) -> u32 {
    let mut score = 0;

    if !rule.domains.is_empty() && domain_in_search(item, &rule.domains) {
        if rule.domain_priority {
            return DOMAIN_PRIORITY_SCORE;
        }
        score += DOMAIN_SCORE;
    }

    if !rule.url_patterns.is_empty() && matches_pattern(&item.link, &rule.url_patterns) {
        score += URL_PATTERN_SCORE;
    }

    if !rule.title_patterns.is_empty() && matches_pattern(&item.title, &rule.title_patterns) {
        score += TITLE_PATTERN_SCORE;
    }

    if !rule.keywords.is_empty()
        && keyword_in_search_with_cutoff(
            item,
            &rule.keywords,
            rule.must_contain_all_keywords,
            fuzzy_cutoff,
        )
    {
        score += KEYWORD_SCORE;
    }

    score
}
