//! First Information Report (FIR) filing and triage.
//!
//! Every FIR gets a priority tier when it is filed (1 = High, 2 = Medium,
//! 3 = Low) from a [`services::PriorityClassifier`]: either the built-in
//! category/keyword rules or an external scoring program.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/firs` | No | File a FIR |
//! | GET | `/api/firs/by-submitter/{submitter_id}` | No | Submitter's own FIRs |
//! | GET | `/api/firs` | No | All FIRs, High priority first |
//! | GET | `/api/firs/alerts` | No | High priority FIRs, newest first |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::{FirService, PgFirStore};
