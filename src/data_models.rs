use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// Name of the bucket that always holds the complete, unfiltered result list.
pub const ALL_CATEGORY: &str = "all";

/// One organic result returned by the search provider.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SearchItem {
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub snippet: String,

    /// Provider fields we don't interpret (position, displayed_link, ...),
    /// passed through so the rendered item is the one the provider sent.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SearchItem {
    pub fn new(
        link: impl Into<String>,
        title: impl Into<String>,
        snippet: impl Into<String>,
    ) -> SearchItem {
        SearchItem {
            link: link.into(),
            title: title.into(),
            snippet: snippet.into(),
            extra: Map::new(),
        }
    }

    /// The text fields in the order keyword matching visits them.
    pub fn text_fields(&self) -> [&str; 3] {
        [
            self.link.as_str(),
            self.title.as_str(),
            self.snippet.as_str(),
        ]
    }
}

/// Classification rules for a single result tab.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct CategoryRule {
    pub name: String,
    pub domains: Vec<String>,
    /// A domain hit alone is conclusive.
    pub domain_priority: bool,
    pub keywords: Vec<String>,
    pub must_contain_all_keywords: bool,
    pub url_patterns: Vec<String>,
    pub title_patterns: Vec<String>,
    /// Categories that veto this one when they already matched the item.
    pub exclude_if_matched: Vec<String>,
}

impl CategoryRule {
    pub fn new(name: impl Into<String>) -> CategoryRule {
        CategoryRule {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.domains = domains.into_iter().map(Into::into).collect();
        self
    }

    pub fn domain_priority(mut self, priority: bool) -> Self {
        self.domain_priority = priority;
        self
    }

    pub fn keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn must_contain_all_keywords(mut self, all: bool) -> Self {
        self.must_contain_all_keywords = all;
        self
    }

    pub fn url_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.url_patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    pub fn title_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.title_patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    pub fn exclude_if_matched<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_if_matched = categories.into_iter().map(Into::into).collect();
        self
    }

    /// Tab identifier used by the UI, e.g. "stack overflow" -> "stack-overflow".
    pub fn slug(&self) -> String {
        self.name.to_lowercase().replace(' ', "-")
    }
}

/// Items grouped per category. Borrows the items it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationResult<'a> {
    all: &'a [SearchItem],
    categories: Vec<(String, Vec<&'a SearchItem>)>,
}

impl<'a> ClassificationResult<'a> {
    pub(crate) fn new(all: &'a [SearchItem]) -> Self {
        ClassificationResult {
            all,
            categories: Vec::new(),
        }
    }

    pub(crate) fn push_category(&mut self, name: &str, items: Vec<&'a SearchItem>) {
        self.categories.push((name.to_string(), items));
    }

    /// The complete input list, unfiltered.
    pub fn all(&self) -> &'a [SearchItem] {
        self.all
    }

    /// Items of a category, or `None` for a category that isn't configured.
    /// `"all"` returns every item.
    pub fn get(&self, name: &str) -> Option<Vec<&'a SearchItem>> {
        if name == ALL_CATEGORY {
            return Some(self.all.iter().collect());
        }
        self.categories
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, items)| items.clone())
    }

    /// Configured categories in evaluation order (excludes `"all"`).
    pub fn categories(&self) -> impl Iterator<Item = (&str, &[&'a SearchItem])> {
        self.categories
            .iter()
            .map(|(name, items)| (name.as_str(), items.as_slice()))
    }

    pub fn category_names(&self) -> Vec<&str> {
        self.categories.iter().map(|(n, _)| n.as_str()).collect()
    }
}

impl Serialize for ClassificationResult<'_> {
    /// Emits `"all"` first, then every category in evaluation order.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.categories.len() + 1))?;
        map.serialize_entry(ALL_CATEGORY, self.all)?;
        for (name, items) in &self.categories {
            map.serialize_entry(name, items)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_fields_deserialize_as_empty() {
        let item: SearchItem = serde_json::from_value(json!({ "title": "Rust book" })).unwrap();
        assert_eq!(item.link, "");
        assert_eq!(item.title, "Rust book");
        assert_eq!(item.snippet, "");
    }

    #[test]
    fn unknown_provider_fields_survive_a_round_trip() {
        let raw = json!({
            "position": 3,
            "link": "https://doc.rust-lang.org/book/",
            "title": "The Rust Programming Language",
            "snippet": "by Steve Klabnik",
            "displayed_link": "doc.rust-lang.org › book"
        });
        let item: SearchItem = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(item.extra.get("position"), Some(&json!(3)));
        assert_eq!(serde_json::to_value(&item).unwrap(), raw);
    }

    #[test]
    fn rule_fields_default_when_absent() {
        let rule: CategoryRule =
            serde_json::from_value(json!({ "name": "github", "domains": ["github.com"] }))
                .unwrap();
        assert!(!rule.domain_priority);
        assert!(rule.keywords.is_empty());
        assert!(rule.exclude_if_matched.is_empty());
    }

    #[test]
    fn slug_lowercases_and_hyphenates() {
        assert_eq!(CategoryRule::new("Blog Articles").slug(), "blog-articles");
        assert_eq!(CategoryRule::new("youtube").slug(), "youtube");
    }
}
