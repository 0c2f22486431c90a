//! The ordered set of category rules a classifier runs with.
//!
//! Order is evaluation order. A category's `exclude_if_matched` list can only
//! veto it through categories evaluated earlier for the same item, so an
//! exclusion must name a category that comes before it in the list.

use std::collections::HashSet;
use std::path::Path;

use crate::data_models::{ALL_CATEGORY, CategoryRule};
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct RuleSet {
    rules: Vec<CategoryRule>,
}

impl RuleSet {
    /// Validates and wraps `rules`, keeping their order.
    ///
    /// Rejects empty or duplicate names, the reserved name `"all"`, blank
    /// domain entries and exclusions naming unknown categories. Exclusions
    /// naming a later category are accepted with a warning since they can
    /// never fire.
    pub fn new(rules: Vec<CategoryRule>) -> Result<Self> {
        let names: HashSet<&str> = rules.iter().map(|r| r.name.as_str()).collect();
        let mut seen: HashSet<&str> = HashSet::new();

        for rule in &rules {
            let name = rule.name.as_str();
            if name.trim().is_empty() {
                return Err(Error::InvalidRules("category name cannot be empty".into()));
            }
            if name == ALL_CATEGORY {
                return Err(Error::InvalidRules(format!(
                    "category name {ALL_CATEGORY:?} is reserved"
                )));
            }
            if !seen.insert(name) {
                return Err(Error::InvalidRules(format!(
                    "duplicate category {name:?}"
                )));
            }
            if rule.domains.iter().any(|d| d.trim().is_empty()) {
                return Err(Error::InvalidRules(format!(
                    "category {name:?} has a blank domain"
                )));
            }

            for excluded_by in &rule.exclude_if_matched {
                if !names.contains(excluded_by.as_str()) {
                    return Err(Error::InvalidRules(format!(
                        "category {name:?} excludes unknown category {excluded_by:?}"
                    )));
                }
                if !seen.contains(excluded_by.as_str()) || excluded_by == name {
                    log::warn!(
                        "category {name:?} excludes {excluded_by:?}, which is not evaluated before it; the exclusion has no effect"
                    );
                }
            }
        }

        Ok(Self { rules })
    }

    /// Parses a JSON array of rule objects.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let rules: Vec<CategoryRule> = serde_json::from_str(json)?;
        Self::new(rules)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let rule_set = Self::from_json_str(&raw)?;
        log::info!(
            "loaded {} category rules from {}",
            rule_set.len(),
            path.as_ref().display()
        );
        Ok(rule_set)
    }

    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    pub fn get(&self, name: &str) -> Option<&CategoryRule> {
        self.rules.iter().find(|r| r.name == name)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CategoryRule> {
        self.rules.iter()
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a CategoryRule;
    type IntoIter = std::slice::Iter<'a, CategoryRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

impl Default for RuleSet {
    /// The result tabs DevXplore ships with.
    fn default() -> Self {
        Self {
            rules: vec![
                CategoryRule::new("youtube")
                    .domains(["youtube.com", "youtu.be"])
                    .domain_priority(true),
                CategoryRule::new("stack overflow")
                    .domains(["stackoverflow.com", "stackexchange.com"])
                    .domain_priority(true),
                CategoryRule::new("courses")
                    .keywords(["course", "tutorial", "learn", "training", "bootcamp"])
                    .domains([
                        "udemy.com",
                        "udacity.com",
                        "coursera.org",
                        "pluralsight.com",
                        "educative.io",
                        "codecademy.com",
                        "freecodecamp.org",
                    ])
                    .url_patterns(["/course/", "/courses/", "/learn/"]),
                CategoryRule::new("documentation")
                    .keywords(["documentation", "docs", "api reference", "guide"])
                    .domains(["readthedocs.io", "docs.python.org", "developer.mozilla.org"])
                    .url_patterns(["/docs/", "/documentation/", "/reference/"])
                    .title_patterns(["documentation", "docs", "api"]),
                CategoryRule::new("github")
                    .domains(["github.com", "gitlab.com", "bitbucket.org"])
                    .domain_priority(true),
                CategoryRule::new("interactive")
                    .keywords(["playground", "interactive", "practice", "game", "challenge"])
                    .domains([
                        "codepen.io",
                        "jsfiddle.net",
                        "repl.it",
                        "codesandbox.io",
                        "flexboxfroggy.com",
                        "codepip.com",
                    ])
                    .title_patterns(["playground", "interactive", "try online"]),
                CategoryRule::new("blog articles")
                    .keywords(["blog", "article", "guide", "how to", "explained"])
                    .url_patterns(["/blog/", "/article/", "/post/"])
                    .exclude_if_matched(["documentation", "courses"]),
            ],
        }
    }
}
