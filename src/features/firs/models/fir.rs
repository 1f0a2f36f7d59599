use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Status every FIR is filed with. No transitions exist yet.
pub const DEFAULT_STATUS: &str = "Pending";

/// Priority tier stored as SMALLINT, 1 being the most urgent
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Type,
)]
#[repr(i16)]
#[serde(into = "i16", try_from = "i16")]
pub enum Priority {
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Priority {
    pub fn as_i16(self) -> i16 {
        self as i16
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl From<Priority> for i16 {
    fn from(p: Priority) -> Self {
        p.as_i16()
    }
}

impl TryFrom<i64> for Priority {
    type Error = i64;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Priority::High),
            2 => Ok(Priority::Medium),
            3 => Ok(Priority::Low),
            other => Err(other),
        }
    }
}

impl TryFrom<i16> for Priority {
    type Error = String;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        Priority::try_from(i64::from(value))
            .map_err(|v| format!("priority must be 1, 2 or 3, got {}", v))
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.as_i16(), self.label())
    }
}

/// Database model for a First Information Report
#[derive(Debug, Clone, FromRow)]
pub struct Fir {
    pub id: Uuid,
    pub submitter_id: String,
    pub category: String,
    pub description: String,
    pub location: String,
    pub filed_at: DateTime<Utc>,
    pub status: String,
    pub priority: Priority,
}

/// Data for filing a new FIR. The store assigns id, filed_at and status.
#[derive(Debug, Clone)]
pub struct NewFir {
    pub submitter_id: String,
    pub category: String,
    pub description: String,
    pub location: String,
    pub priority: Priority,
}
