pub mod classifier;
pub mod config;
pub mod data_models;
pub mod domain;
pub mod error;
pub mod fuzzy;
pub mod matcher;
pub mod provider;
pub mod rules;
pub mod scorer;

pub use classifier::{Classifier, classify_search};
pub use data_models::{ALL_CATEGORY, CategoryRule, ClassificationResult, SearchItem};
pub use error::{Error, Result};
pub use rules::RuleSet;
