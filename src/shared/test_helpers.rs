#![cfg(test)]

use async_trait::async_trait;
use std::time::Duration;

use crate::core::error::{AppError, Result};
use crate::features::firs::dtos::RegisterFirDto;
use crate::features::firs::models::{Fir, NewFir, Priority};
use crate::features::firs::services::{ClassificationError, FirStore, PriorityClassifier};

pub fn register_dto(submitter_id: &str, category: &str, description: &str) -> RegisterFirDto {
    RegisterFirDto {
        submitter_id: submitter_id.to_string(),
        category: category.to_string(),
        description: description.to_string(),
        location: "Central Station".to_string(),
    }
}

/// Classifier that always times out
pub struct FailingClassifier;

#[async_trait]
impl PriorityClassifier for FailingClassifier {
    async fn classify(
        &self,
        _category: &str,
        _description: &str,
    ) -> std::result::Result<Priority, ClassificationError> {
        Err(ClassificationError::TimedOut(Duration::from_secs(1)))
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

/// Store whose backend is always unreachable
pub struct FailingFirStore;

#[async_trait]
impl FirStore for FailingFirStore {
    async fn create(&self, _data: &NewFir) -> Result<Fir> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn find_by_submitter(&self, _submitter_id: &str) -> Result<Vec<Fir>> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn find_all(&self) -> Result<Vec<Fir>> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn find_by_priority(&self, _priority: Priority) -> Result<Vec<Fir>> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }
}
