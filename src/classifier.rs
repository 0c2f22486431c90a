use std::collections::HashSet;

use crate::data_models::{ClassificationResult, SearchItem};
use crate::matcher::FUZZY_CUTOFF;
use crate::rules::RuleSet;
use crate::scorer::{MIN_INCLUSION_SCORE, score_search_item_with_cutoff};

/// Sorts search results into category tabs.
///
/// Categories are evaluated in rule-set order, items in input order. An item
/// joins a category when it scores at least `min_score` and none of the
/// category's `exclude_if_matched` names has already been recorded for it.
/// Items may land in any number of categories, including none.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: RuleSet,
    min_score: u32,
    fuzzy_cutoff: f64,
}

impl Classifier {
    pub fn new(rules: RuleSet) -> Self {
        Self {
            rules,
            min_score: MIN_INCLUSION_SCORE,
            fuzzy_cutoff: FUZZY_CUTOFF,
        }
    }

    pub fn with_min_score(mut self, min_score: u32) -> Self {
        self.min_score = min_score;
        self
    }

    pub fn with_fuzzy_cutoff(mut self, fuzzy_cutoff: f64) -> Self {
        self.fuzzy_cutoff = fuzzy_cutoff;
        self
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn classify<'a>(&self, items: &'a [SearchItem]) -> ClassificationResult<'a> {
        let mut result = ClassificationResult::new(items);
        // categories each item has been placed in so far, by input index
        let mut matched: Vec<HashSet<&str>> = vec![HashSet::new(); items.len()];

        for rule in &self.rules {
            let mut bucket = Vec::new();

            for (idx, item) in items.iter().enumerate() {
                let score = score_search_item_with_cutoff(item, rule, self.fuzzy_cutoff);
                if score < self.min_score {
                    continue;
                }

                if let Some(blocker) = rule
                    .exclude_if_matched
                    .iter()
                    .find(|c| matched[idx].contains(c.as_str()))
                {
                    log::debug!(
                        "item {idx} scored {score} for {:?} but is excluded by {blocker:?}",
                        rule.name
                    );
                    continue;
                }

                log::debug!("item {idx} scored {score} for {:?}", rule.name);
                bucket.push(item);
                matched[idx].insert(rule.name.as_str());
            }

            result.push_category(&rule.name, bucket);
        }

        result
    }

    /// Raw score of every item in every category, in input order then
    /// rule-set order. Thresholds and exclusions are not applied.
    pub fn score_table(&self, items: &[SearchItem]) -> Vec<Vec<(String, u32)>> {
        items
            .iter()
            .map(|item| {
                self.rules
                    .iter()
                    .map(|rule| {
                        (
                            rule.name.clone(),
                            score_search_item_with_cutoff(item, rule, self.fuzzy_cutoff),
                        )
                    })
                    .collect()
            })
            .collect()
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(RuleSet::default())
    }
}

/// Classifies `items` with the default thresholds.
pub fn classify_search<'a>(items: &'a [SearchItem], rules: &RuleSet) -> ClassificationResult<'a> {
    Classifier::new(rules.clone()).classify(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_models::CategoryRule;

    fn rules(list: Vec<CategoryRule>) -> RuleSet {
        RuleSet::new(list).unwrap()
    }

    #[test]
    fn all_bucket_is_the_input() {
        let items = vec![
            SearchItem::new("https://a.example", "one", ""),
            SearchItem::new("https://b.example", "two", ""),
        ];
        let result = classify_search(&items, &RuleSet::default());
        assert_eq!(result.all(), items.as_slice());
        assert_eq!(result.get("all").unwrap().len(), 2);
    }

    #[test]
    fn empty_input_yields_empty_buckets() {
        let result = classify_search(&[], &RuleSet::default());
        assert!(result.all().is_empty());
        assert_eq!(result.category_names().len(), 7);
        assert!(result.categories().all(|(_, items)| items.is_empty()));
    }

    #[test]
    fn earlier_category_vetoes_later_one() {
        let rule_set = rules(vec![
            CategoryRule::new("a").keywords(["rust"]),
            CategoryRule::new("b").keywords(["rust"]).exclude_if_matched(["a"]),
        ]);
        let items = vec![SearchItem::new("https://example.com", "Rust tips", "")];
        let result = classify_search(&items, &rule_set);
        assert_eq!(result.get("a").unwrap().len(), 1);
        assert!(result.get("b").unwrap().is_empty());
    }

    #[test]
    fn exclusion_toward_later_category_has_no_effect() {
        let rule_set = rules(vec![
            CategoryRule::new("b").keywords(["rust"]).exclude_if_matched(["a"]),
            CategoryRule::new("a").keywords(["rust"]),
        ]);
        let items = vec![SearchItem::new("https://example.com", "Rust tips", "")];
        let result = classify_search(&items, &rule_set);
        assert_eq!(result.get("a").unwrap().len(), 1);
        assert_eq!(result.get("b").unwrap().len(), 1);
    }

    #[test]
    fn min_score_is_configurable() {
        let rule_set = rules(vec![CategoryRule::new("a").keywords(["rust"])]);
        let items = vec![SearchItem::new("https://example.com", "Rust tips", "")];

        let strict = Classifier::new(rule_set.clone()).with_min_score(30);
        assert!(strict.classify(&items).get("a").unwrap().is_empty());

        let lenient = Classifier::new(rule_set);
        assert_eq!(lenient.classify(&items).get("a").unwrap().len(), 1);
    }

    #[test]
    fn score_table_reports_every_pair() {
        let classifier = Classifier::default();
        let items = vec![SearchItem::new("https://youtu.be/abc", "Intro", "")];
        let table = classifier.score_table(&items);
        assert_eq!(table.len(), 1);
        assert_eq!(table[0].len(), 7);
        assert_eq!(table[0][0], ("youtube".to_string(), 100));
    }
}
