use std::sync::Arc;

use crate::core::error::Result;
use crate::features::firs::dtos::{FirRegisteredDto, FirResponseDto, RegisterFirDto};
use crate::features::firs::models::{NewFir, Priority};
use crate::features::firs::services::{FirStore, PriorityClassifier};

/// Files FIRs and serves the submitter and reviewer views
pub struct FirService {
    store: Arc<dyn FirStore>,
    classifier: Arc<dyn PriorityClassifier>,
}

impl FirService {
    pub fn new(store: Arc<dyn FirStore>, classifier: Arc<dyn PriorityClassifier>) -> Self {
        Self { store, classifier }
    }

    /// Classify and persist a FIR.
    ///
    /// Classification runs before the store is touched, so a classifier
    /// failure leaves nothing behind.
    pub async fn register(&self, dto: RegisterFirDto) -> Result<FirRegisteredDto> {
        let priority = self
            .classifier
            .classify(&dto.category, &dto.description)
            .await
            .inspect_err(|e| {
                tracing::error!(
                    "Classifier '{}' failed for submitter {}: {}",
                    self.classifier.name(),
                    dto.submitter_id,
                    e
                );
            })?;

        let fir = self
            .store
            .create(&NewFir {
                submitter_id: dto.submitter_id,
                category: dto.category,
                description: dto.description,
                location: dto.location,
                priority,
            })
            .await?;

        tracing::info!(
            "Registered FIR {} for submitter {} with priority {}",
            fir.id,
            fir.submitter_id,
            fir.priority
        );

        Ok(FirRegisteredDto {
            id: fir.id,
            priority: fir.priority,
        })
    }

    /// FIRs filed by one submitter, most recent first
    pub async fn list_by_submitter(&self, submitter_id: &str) -> Result<Vec<FirResponseDto>> {
        let firs = self.store.find_by_submitter(submitter_id).await?;
        Ok(firs.into_iter().map(FirResponseDto::from).collect())
    }

    /// Reviewer view: every FIR, High priority first
    pub async fn list_all(&self) -> Result<Vec<FirResponseDto>> {
        let firs = self.store.find_all().await?;
        Ok(firs.into_iter().map(FirResponseDto::from).collect())
    }

    /// High priority FIRs only, most recently filed first
    pub async fn list_priority_alerts(&self) -> Result<Vec<FirResponseDto>> {
        let firs = self.store.find_by_priority(Priority::High).await?;
        Ok(firs.into_iter().map(FirResponseDto::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AppError;
    use crate::features::firs::services::{InMemoryFirStore, RuleBasedClassifier};
    use crate::shared::test_helpers::{register_dto, FailingClassifier, FailingFirStore};

    fn service_with(store: Arc<InMemoryFirStore>) -> FirService {
        FirService::new(store, Arc::new(RuleBasedClassifier))
    }

    #[tokio::test]
    async fn test_register_stores_classified_priority() {
        let store = Arc::new(InMemoryFirStore::new());
        let service = service_with(Arc::clone(&store));

        let registered = service
            .register(register_dto("u1", "theft", "reported financial scam"))
            .await
            .unwrap();

        assert_eq!(registered.priority, Priority::High);
        let stored = store.find_by_submitter("u1").await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, registered.id);
        assert_eq!(stored[0].priority, Priority::High);
        assert_eq!(stored[0].status, "Pending");
    }

    #[tokio::test]
    async fn test_list_all_ranks_high_above_earlier_low() {
        let service = service_with(Arc::new(InMemoryFirStore::new()));
        let low = service
            .register(register_dto("u2", "jaywalking", "nothing unusual"))
            .await
            .unwrap();
        let high = service
            .register(register_dto("u1", "theft", "reported financial scam"))
            .await
            .unwrap();

        let all = service.list_all().await.unwrap();

        let ids: Vec<_> = all.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![high.id, low.id]);
    }

    #[tokio::test]
    async fn test_priority_alerts_only_high_newest_first() {
        let service = service_with(Arc::new(InMemoryFirStore::new()));
        let first = service
            .register(register_dto("u1", "murder", ""))
            .await
            .unwrap();
        let second = service
            .register(register_dto("u2", "other", "hacking of bank account"))
            .await
            .unwrap();
        service
            .register(register_dto("u3", "theft", "wallet"))
            .await
            .unwrap();
        service
            .register(register_dto("u4", "jaywalking", ""))
            .await
            .unwrap();

        let alerts = service.list_priority_alerts().await.unwrap();

        let ids: Vec<_> = alerts.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
        assert!(alerts.iter().all(|f| f.priority == Priority::High));
    }

    #[tokio::test]
    async fn test_list_by_submitter_only_returns_own_firs() {
        let service = service_with(Arc::new(InMemoryFirStore::new()));
        service
            .register(register_dto("u1", "missing", ""))
            .await
            .unwrap();
        service
            .register(register_dto("u2", "missing", ""))
            .await
            .unwrap();

        let own = service.list_by_submitter("u1").await.unwrap();

        assert_eq!(own.len(), 1);
        assert_eq!(own[0].submitter_id, "u1");
        assert_eq!(own[0].priority, Priority::Medium);
    }

    #[tokio::test]
    async fn test_classifier_failure_writes_nothing() {
        let store = Arc::new(InMemoryFirStore::new());
        let service = FirService::new(Arc::clone(&store) as Arc<dyn FirStore>, Arc::new(FailingClassifier));

        let err = service
            .register(register_dto("u1", "theft", "x"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Classification(_)));
        assert!(store.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_is_propagated() {
        let service = FirService::new(Arc::new(FailingFirStore), Arc::new(RuleBasedClassifier));

        let err = service
            .register(register_dto("u1", "theft", "x"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Database(_)));

        let err = service.list_all().await.unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
    }
}
