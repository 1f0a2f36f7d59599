use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::firs::models::{Fir, Priority};
use crate::shared::validation::{validate_no_nul, SUBMITTER_ID_REGEX};

/// Request DTO for filing a FIR
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterFirDto {
    /// Identifier of the person filing the report
    #[validate(
        length(min = 1, max = 128, message = "Submitter ID must be 1-128 characters"),
        regex(
            path = *SUBMITTER_ID_REGEX,
            message = "Submitter ID may only contain letters, digits, '_', '.', '@' and '-'"
        ),
        custom(function = "validate_no_nul")
    )]
    pub submitter_id: String,

    /// Free-text category, e.g. "theft" or "cybercrime"
    #[validate(
        length(min = 1, max = 100, message = "Category must be 1-100 characters"),
        custom(function = "validate_no_nul")
    )]
    pub category: String,

    /// Narrative of the incident (may be empty or omitted)
    #[serde(default)]
    #[validate(
        length(max = 10000, message = "Description must not exceed 10000 characters"),
        custom(function = "validate_no_nul")
    )]
    pub description: String,

    #[validate(
        length(min = 1, max = 500, message = "Location must be 1-500 characters"),
        custom(function = "validate_no_nul")
    )]
    pub location: String,
}

/// Response DTO returned after a FIR is filed
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FirRegisteredDto {
    pub id: Uuid,
    /// 1 = High, 2 = Medium, 3 = Low
    #[schema(value_type = i16, minimum = 1, maximum = 3)]
    pub priority: Priority,
}

/// Response DTO for a stored FIR
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FirResponseDto {
    pub id: Uuid,
    pub submitter_id: String,
    pub category: String,
    pub description: String,
    pub location: String,
    pub filed_at: DateTime<Utc>,
    pub status: String,
    /// 1 = High, 2 = Medium, 3 = Low
    #[schema(value_type = i16, minimum = 1, maximum = 3)]
    pub priority: Priority,
}

impl From<Fir> for FirResponseDto {
    fn from(f: Fir) -> Self {
        Self {
            id: f.id,
            submitter_id: f.submitter_id,
            category: f.category,
            description: f.description,
            location: f.location,
            filed_at: f.filed_at,
            status: f.status,
            priority: f.priority,
        }
    }
}
