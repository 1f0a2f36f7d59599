use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use lazy_static::lazy_static;
use thiserror::Error;

use crate::core::config::{ClassifierConfig, ClassifierMode};
use crate::features::firs::models::Priority;
use crate::features::firs::services::SubprocessClassifier;

lazy_static! {
    /// Categories that are always High priority
    static ref CRITICAL_CATEGORIES: HashSet<&'static str> =
        ["cybercrime", "terrorism", "murder"].into_iter().collect();

    /// Categories that are Medium priority unless the description escalates them
    static ref ELEVATED_CATEGORIES: HashSet<&'static str> =
        ["theft", "harassment", "missing"].into_iter().collect();

    /// Description terms that escalate any FIR to High priority
    static ref CRITICAL_KEYWORDS: Vec<&'static str> = vec![
        "fraud",
        "cybercrime",
        "financial scam",
        "hacking",
        "extortion",
        "terror",
    ];
}

/// Reasons a priority could not be derived
#[derive(Debug, Error)]
pub enum ClassificationError {
    #[error("failed to spawn classifier '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to collect classifier output: {0}")]
    Wait(#[source] std::io::Error),

    #[error("classifier did not finish within {0:?}")]
    TimedOut(Duration),

    #[error("classifier exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },

    #[error("classifier output is not an integer: {0:?}")]
    Malformed(String),

    #[error("classifier returned priority {0}, expected 1, 2 or 3")]
    OutOfRange(String),

    #[error("classifier pool is closed")]
    Closed,
}

/// Derives the priority tier of a FIR from its category and description
#[async_trait]
pub trait PriorityClassifier: Send + Sync {
    async fn classify(
        &self,
        category: &str,
        description: &str,
    ) -> Result<Priority, ClassificationError>;

    /// Short name used in logs
    fn name(&self) -> &'static str;
}

/// Built-in category/keyword rules.
///
/// First match wins:
/// 1. critical category -> High
/// 2. critical keyword anywhere in the description -> High
/// 3. elevated category -> Medium
/// 4. anything else -> Low
///
/// A keyword hit therefore promotes an elevated category ("theft") to High.
pub fn assign_priority(category: &str, description: &str) -> Priority {
    let category = category.to_lowercase();
    let description = description.to_lowercase();

    if CRITICAL_CATEGORIES.contains(category.as_str()) {
        return Priority::High;
    }
    if CRITICAL_KEYWORDS
        .iter()
        .any(|keyword| description.contains(keyword))
    {
        return Priority::High;
    }
    if ELEVATED_CATEGORIES.contains(category.as_str()) {
        return Priority::Medium;
    }
    Priority::Low
}

/// Classifier backed by [`assign_priority`]. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedClassifier;

#[async_trait]
impl PriorityClassifier for RuleBasedClassifier {
    async fn classify(
        &self,
        category: &str,
        description: &str,
    ) -> Result<Priority, ClassificationError> {
        Ok(assign_priority(category, description))
    }

    fn name(&self) -> &'static str {
        "rules"
    }
}

/// Build the classifier selected by `CLASSIFIER_MODE`
pub fn classifier_from_config(config: &ClassifierConfig) -> Arc<dyn PriorityClassifier> {
    match config.mode {
        ClassifierMode::Rules => Arc::new(RuleBasedClassifier),
        ClassifierMode::Subprocess => Arc::new(SubprocessClassifier::from_config(config)),
    }
}
