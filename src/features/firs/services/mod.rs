mod fir_service;
mod fir_store;
mod priority_classifier;
mod subprocess_classifier;

pub use fir_service::FirService;
#[cfg(test)]
pub use fir_store::InMemoryFirStore;
pub use fir_store::{FirStore, PgFirStore};
pub use priority_classifier::{
    classifier_from_config, ClassificationError, PriorityClassifier, RuleBasedClassifier,
};
pub use subprocess_classifier::SubprocessClassifier;
