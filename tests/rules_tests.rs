use anyhow::Result;

use devxplore::classifier::Classifier;
use devxplore::data_models::SearchItem;
use devxplore::error::Error;
use devxplore::rules::RuleSet;

mod test_helpers {
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static TEST_FILE_COUNTER: AtomicUsize = AtomicUsize::new(0);

    pub fn unique_rules_path() -> PathBuf {
        let count = TEST_FILE_COUNTER.fetch_add(1, Ordering::SeqCst);
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_millis();
        std::env::temp_dir().join(format!(
            "devxplore_rules_test_{}_{}_{}.json",
            std::process::id(),
            timestamp,
            count
        ))
    }

    pub fn write_rules(contents: &str) -> anyhow::Result<PathBuf> {
        let path = unique_rules_path();
        std::fs::write(&path, contents)?;
        Ok(path)
    }
}

use test_helpers::*;

/// The rule set the first DevXplore release shipped with.
const LEGACY_RULES: &str = r#"[
    {"name": "youtube", "keywords": ["youtube.com", "youtube"], "domains": ["youtube.com"]},
    {"name": "courses", "keywords": ["courses", "course"], "domains": ["udemy.com", "udacity.com", "coursera.com"]},
    {"name": "tutorials", "keywords": ["tutorials", "tutorial", "get started"], "domains": ["tutorialspoint.com"]},
    {"name": "docs", "keywords": ["docs", "documentation", "official documentation"], "domains": []},
    {"name": "github", "keywords": ["git", "github", "github link"], "domains": ["github.com"]},
    {"name": "code play", "keywords": ["code", "game"], "domains": ["flexboxfroggy.com", "codepip.com"], "must_contain_all_keywords": true}
]"#;

#[test]
fn test_load_rules_from_file() -> Result<()> {
    let path = write_rules(LEGACY_RULES)?;
    let rules = RuleSet::load(&path)?;
    std::fs::remove_file(&path)?;

    let names: Vec<&str> = rules.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        ["youtube", "courses", "tutorials", "docs", "github", "code play"]
    );
    Ok(())
}

#[test]
fn test_missing_rules_file_is_io_error() {
    let err = RuleSet::load(unique_rules_path()).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_invalid_rules_file_is_rejected() -> Result<()> {
    let path = write_rules(r#"[{"name": "all"}]"#)?;
    let err = RuleSet::load(&path).unwrap_err();
    std::fs::remove_file(&path)?;
    assert!(matches!(err, Error::InvalidRules(_)));
    Ok(())
}

#[test]
fn test_legacy_rules_classify() -> Result<()> {
    let classifier = Classifier::new(RuleSet::from_json_str(LEGACY_RULES)?);
    let items = vec![
        SearchItem::new(
            "https://www.udemy.com/course/rust-lang/",
            "Learn Rust by Building Real Applications",
            "Udemy",
        ),
        SearchItem::new(
            "https://codepip.com/games/grid-garden/",
            "Grid Garden",
            "A game for learning CSS grid layout",
        ),
    ];
    let result = classifier.classify(&items);

    // domain (50) + "course" in the link (20)
    assert_eq!(result.get("courses").unwrap().len(), 1);
    // domain match without both keywords in one field still scores 50
    assert_eq!(result.get("code play").unwrap().len(), 1);
    assert!(result.get("youtube").unwrap().is_empty());
    Ok(())
}
